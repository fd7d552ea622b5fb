use crate::{Amount, Tab, VideoId, VideoStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub tab: Tab,
    pub balance: Amount,
    pub today_earnings: Amount,
    pub coins: u32,
    pub referral_levels: Vec<ReferralLevelView>,
    pub videos: Vec<VideoRowView>,
    pub upload_input: String,
    pub submitting: bool,
    pub submit_enabled: bool,
    pub withdraw_enabled: bool,
    pub withdraw_minimum: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferralLevelView {
    pub level: u8,
    pub users: u32,
    pub rate: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRowView {
    pub id: VideoId,
    pub title: String,
    pub url: String,
    pub reward: Amount,
    pub status: VideoStatus,
    pub views: u32,
    /// The claim lock is held for this entry.
    pub watching: bool,
}
