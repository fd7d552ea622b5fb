use std::time::Duration;

use crate::{Amount, VideoId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Report `Msg::WatchElapsed` for `video_id` once `delay` has passed.
    StartWatchTimer { video_id: VideoId, delay: Duration },
    /// Ask the classification service for a title and payout for `url`.
    ClassifyLink { url: String },
    /// Show a blocking message to the user.
    Notify(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFailure {
    /// The service did not answer in time.
    Timeout,
    /// Network, status, credential or response-shape failure.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    RewardCredited { amount: Amount },
    SubmissionAccepted { video_id: VideoId, title: String },
    SubmissionFailed { failure: ReviewFailure },
    WithdrawalUnavailable { minimum: Amount },
}
