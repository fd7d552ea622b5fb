//! Rewards engine: watch timers, link classification and effect execution.
mod classify;
mod clock;
mod engine;
mod types;

pub use classify::{build_prompt, Classifier, ClassifierSettings, GeminiClassifier, REWARD_TIERS};
pub use clock::{TokioClock, WatchClock};
pub use engine::EngineHandle;
pub use types::{ClassifyError, EngineError, EngineEvent, FailureKind, LinkReview, VideoKey};
