use crate::{ReviewFailure, VideoId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Earn,
    Refer,
    Wallet,
}

/// Title and payout the classification service assigned to a link.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLink {
    pub title: String,
    /// Rupees as returned by the service; validated when the entry is created.
    pub reward: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User switched to another tab.
    TabSelected(Tab),
    /// User tapped a catalog entry to watch it.
    VideoTapped { video_id: VideoId },
    /// The simulated watch time for a claim has passed.
    WatchElapsed { video_id: VideoId },
    /// The watch timer for a claim could not be started.
    WatchAborted { video_id: VideoId },
    /// User edited the link input box.
    UploadInputChanged(String),
    /// User submitted the current link for review.
    SubmitClicked,
    /// Classification service answered (or failed) for the pending submission.
    ClassificationDone(Result<ClassifiedLink, ReviewFailure>),
    /// User clicked the withdraw button.
    WithdrawClicked,
}
