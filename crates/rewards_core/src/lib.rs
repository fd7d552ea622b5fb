//! Rewards core: pure state machine and view-model helpers.
mod amount;
mod catalog;
mod effect;
mod ledger;
mod msg;
mod state;
mod update;
mod view_model;

pub use amount::Amount;
pub use catalog::{seed_catalog, VideoId, VideoItem, VideoStatus};
pub use effect::{Effect, Notice, ReviewFailure};
pub use ledger::{Referrals, UserStats, REFERRAL_RATES};
pub use msg::{ClassifiedLink, Msg, Tab};
pub use state::{AppState, WATCH_DURATION, WITHDRAW_MINIMUM};
pub use update::update;
pub use view_model::{AppViewModel, ReferralLevelView, VideoRowView};
