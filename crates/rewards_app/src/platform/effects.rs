use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use rewards_core::{ClassifiedLink, Effect, Msg, Notice, ReviewFailure, VideoId};
use rewards_engine::{ClassifierSettings, ClassifyError, EngineEvent, EngineHandle, FailureKind};
use rewards_logging::{rewards_error, rewards_info, rewards_warn};

use super::ui::command::ShellInput;

const EVENT_POLL: Duration = Duration::from_millis(250);

/// What running a batch of effects produced for the shell.
#[derive(Debug, Default, PartialEq)]
pub struct EffectOutput {
    pub notices: Vec<Notice>,
    /// Messages to apply right away, e.g. when the engine rejected a command.
    pub follow_ups: Vec<Msg>,
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClassifierSettings, inbox: mpsc::Sender<ShellInput>) -> Self {
        Self::with_engine(EngineHandle::new(settings), inbox)
    }

    pub fn with_engine(engine: EngineHandle, inbox: mpsc::Sender<ShellInput>) -> Self {
        let runner = Self { engine };
        runner.spawn_event_loop(inbox);
        runner
    }

    /// Hands IO effects to the engine and collects notices and follow-ups.
    pub fn run(&self, effects: Vec<Effect>) -> EffectOutput {
        let mut output = EffectOutput::default();
        for effect in effects {
            match effect {
                Effect::StartWatchTimer { video_id, delay } => {
                    rewards_info!(
                        "StartWatchTimer video_id={} delay_ms={}",
                        video_id,
                        delay.as_millis()
                    );
                    if let Err(err) = self.engine.start_watch(video_id.get(), delay) {
                        rewards_error!("Watch for video {} not started: {}", video_id, err);
                        output.follow_ups.push(Msg::WatchAborted { video_id });
                    }
                }
                Effect::ClassifyLink { url } => {
                    rewards_info!("ClassifyLink url_len={} url={}", url.len(), url);
                    if let Err(err) = self.engine.classify(url) {
                        rewards_error!("Review not started: {}", err);
                        output
                            .follow_ups
                            .push(Msg::ClassificationDone(Err(ReviewFailure::Unavailable)));
                    }
                }
                Effect::Notify(notice) => output.notices.push(notice),
            }
        }
        output
    }

    pub fn stop(&self) {
        self.engine.stop();
    }

    fn spawn_event_loop(&self, inbox: mpsc::Sender<ShellInput>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.recv_timeout(EVENT_POLL) {
                Ok(Some(event)) => {
                    if inbox.send(ShellInput::Dispatch(map_event(event))).is_err() {
                        break;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    rewards_warn!("Engine event loop ended: {}", err);
                    break;
                }
            }
        });
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::WatchElapsed { video_id } => Msg::WatchElapsed {
            video_id: VideoId::new(video_id),
        },
        EngineEvent::ClassificationCompleted { url, result } => {
            let result = result
                .map(|review| ClassifiedLink {
                    title: review.title,
                    reward: review.reward,
                })
                .map_err(|err| {
                    rewards_warn!("Review of {} failed: {}", url, err);
                    map_failure(&err)
                });
            Msg::ClassificationDone(result)
        }
    }
}

fn map_failure(err: &ClassifyError) -> ReviewFailure {
    match err.kind {
        FailureKind::Timeout => ReviewFailure::Timeout,
        FailureKind::MissingApiKey
        | FailureKind::HttpStatus(_)
        | FailureKind::MalformedResponse
        | FailureKind::Network => ReviewFailure::Unavailable,
    }
}
