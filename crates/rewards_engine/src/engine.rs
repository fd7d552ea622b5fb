use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use rewards_logging::{rewards_error, rewards_info, rewards_warn};

use crate::classify::{Classifier, ClassifierSettings, GeminiClassifier};
use crate::clock::{TokioClock, WatchClock};
use crate::{EngineError, EngineEvent, VideoKey};

enum EngineCommand {
    StartWatch { video_id: VideoKey, delay: Duration },
    Classify { url: String },
    Stop,
}

/// Runs timers and classification calls on a background tokio runtime and
/// reports their outcomes as [`EngineEvent`]s.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self::with_parts(Arc::new(GeminiClassifier::new(settings)), Arc::new(TokioClock))
    }

    pub fn with_parts(classifier: Arc<dyn Classifier>, clock: Arc<dyn WatchClock>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    rewards_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let command = match command {
                    EngineCommand::Stop => break,
                    command => command,
                };
                let classifier = classifier.clone();
                let clock = clock.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(classifier.as_ref(), clock.as_ref(), command, event_tx).await;
                });
            }
            // Refuse new commands before in-flight work is cancelled, so a
            // disconnected event channel always implies rejected commands.
            drop(cmd_rx);
            drop(runtime);
            drop(event_tx);
            rewards_info!("Engine stopped");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    /// Reports `WatchElapsed` after `delay`. Not cancellable.
    pub fn start_watch(&self, video_id: VideoKey, delay: Duration) -> Result<(), EngineError> {
        self.send(EngineCommand::StartWatch { video_id, delay })
    }

    pub fn classify(&self, url: impl Into<String>) -> Result<(), EngineError> {
        self.send(EngineCommand::Classify { url: url.into() })
    }

    /// Shuts the runtime down; pending timers and calls are dropped.
    pub fn stop(&self) {
        let _ = self.send(EngineCommand::Stop);
    }

    pub fn try_recv(&self) -> Result<Option<EngineEvent>, EngineError> {
        let rx = self.event_rx.lock().map_err(|_| EngineError::Stopped)?;
        match rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::TryRecvError::Empty) => Ok(None),
            Err(mpsc::TryRecvError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    /// `Ok(None)` means nothing arrived within `timeout`.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        let rx = self.event_rx.lock().map_err(|_| EngineError::Stopped)?;
        match rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineError> {
        self.cmd_tx.send(command).map_err(|_| {
            rewards_warn!("Engine is stopped; command rejected");
            EngineError::Stopped
        })
    }
}

async fn handle_command(
    classifier: &dyn Classifier,
    clock: &dyn WatchClock,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::StartWatch { video_id, delay } => {
            rewards_info!("Watch started video_id={} delay_ms={}", video_id, delay.as_millis());
            clock.wait(delay).await;
            rewards_info!("Watch elapsed video_id={}", video_id);
            let _ = event_tx.send(EngineEvent::WatchElapsed { video_id });
        }
        EngineCommand::Classify { url } => {
            let result = classifier.classify(&url).await;
            if let Err(err) = &result {
                rewards_warn!("Classification failed url_len={}: {}", url.len(), err);
            }
            let _ = event_tx.send(EngineEvent::ClassificationCompleted { url, result });
        }
        EngineCommand::Stop => {}
    }
}
