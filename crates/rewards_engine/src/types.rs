use std::fmt;

use serde::Deserialize;

/// Catalog entry identifier as seen by the engine.
pub type VideoKey = u64;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    WatchElapsed {
        video_id: VideoKey,
    },
    ClassificationCompleted {
        url: String,
        result: Result<LinkReview, ClassifyError>,
    },
}

/// The JSON object the classification service must answer with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinkReview {
    pub title: String,
    pub reward: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("engine is stopped")]
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingApiKey,
    HttpStatus(u16),
    Timeout,
    MalformedResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingApiKey => write!(f, "missing api key"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
