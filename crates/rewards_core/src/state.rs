use std::time::Duration;

use crate::catalog::{seed_catalog, VideoId, VideoItem, VideoStatus};
use crate::ledger::{UserStats, REFERRAL_RATES};
use crate::msg::Tab;
use crate::view_model::{AppViewModel, ReferralLevelView, VideoRowView};
use crate::Amount;

/// Simulated watch time before a claim is credited.
pub const WATCH_DURATION: Duration = Duration::from_millis(3_000);

/// Smallest balance at which the withdraw button is enabled.
pub const WITHDRAW_MINIMUM: Amount = Amount::from_major(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    stats: UserStats,
    catalog: Vec<VideoItem>,
    next_video_id: u64,
    /// Video whose reward is in flight; at most one process-wide.
    claim_lock: Option<VideoId>,
    watch_delay: Duration,
    tab: Tab,
    upload_input: String,
    /// Link handed to the classification service and not yet answered.
    pending_submission: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_seed(UserStats::seeded(), seed_catalog())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(stats: UserStats, catalog: Vec<VideoItem>) -> Self {
        let next_video_id = catalog
            .iter()
            .map(|item| item.id.get())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            stats,
            catalog,
            next_video_id,
            claim_lock: None,
            watch_delay: WATCH_DURATION,
            tab: Tab::default(),
            upload_input: String::new(),
            pending_submission: None,
            dirty: false,
        }
    }

    pub fn with_watch_delay(mut self, delay: Duration) -> Self {
        self.watch_delay = delay;
        self
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn catalog(&self) -> &[VideoItem] {
        &self.catalog
    }

    pub fn claim_lock(&self) -> Option<VideoId> {
        self.claim_lock
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submission.is_some()
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn upload_input(&self) -> &str {
        &self.upload_input
    }

    pub(crate) fn watch_delay(&self) -> Duration {
        self.watch_delay
    }

    pub fn view(&self) -> AppViewModel {
        let referral_levels = self
            .stats
            .referrals
            .counts()
            .into_iter()
            .zip(REFERRAL_RATES)
            .enumerate()
            .map(|(index, (users, rate))| ReferralLevelView {
                level: index as u8 + 1,
                users,
                rate,
            })
            .collect();

        let videos = self
            .catalog
            .iter()
            .map(|item| VideoRowView {
                id: item.id,
                title: item.title.clone(),
                url: item.url.clone(),
                reward: item.reward,
                status: item.status,
                views: item.views,
                watching: self.claim_lock == Some(item.id),
            })
            .collect();

        AppViewModel {
            tab: self.tab,
            balance: self.stats.balance,
            today_earnings: self.stats.today_earnings,
            coins: self.stats.coins,
            referral_levels,
            videos,
            upload_input: self.upload_input.clone(),
            submitting: self.is_submitting(),
            submit_enabled: !self.is_submitting() && !self.upload_input.is_empty(),
            withdraw_enabled: self.can_withdraw(),
            withdraw_minimum: WITHDRAW_MINIMUM,
        }
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_withdraw(&self) -> bool {
        self.stats.balance >= WITHDRAW_MINIMUM
    }

    pub(crate) fn select_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.dirty = true;
        }
    }

    /// Takes the claim lock for `video_id` if it is free and the video exists.
    pub(crate) fn try_begin_claim(&mut self, video_id: VideoId) -> bool {
        if self.claim_lock.is_some() || self.find_video(video_id).is_none() {
            return false;
        }
        self.claim_lock = Some(video_id);
        self.dirty = true;
        true
    }

    /// Credits the locked video's reward and releases the lock.
    /// Events for any other video are stale and credit nothing.
    pub(crate) fn complete_claim(&mut self, video_id: VideoId) -> Option<Amount> {
        if self.claim_lock != Some(video_id) {
            return None;
        }
        self.claim_lock = None;
        self.dirty = true;
        let reward = self.find_video(video_id)?.reward;
        self.stats.credit(reward);
        Some(reward)
    }

    /// Releases the lock without crediting; the claim never started.
    pub(crate) fn abort_claim(&mut self, video_id: VideoId) {
        if self.claim_lock == Some(video_id) {
            self.claim_lock = None;
            self.dirty = true;
        }
    }

    /// Returns false while a submission is in flight; the input is read-only then.
    pub(crate) fn set_upload_input(&mut self, text: String) -> bool {
        if self.is_submitting() {
            return false;
        }
        if self.upload_input != text {
            self.upload_input = text;
            self.dirty = true;
        }
        true
    }

    /// Marks the current input as in review and returns the link to classify.
    pub(crate) fn begin_submission(&mut self) -> Option<String> {
        if self.is_submitting() || self.upload_input.trim().is_empty() {
            return None;
        }
        let url = self.upload_input.clone();
        self.pending_submission = Some(url.clone());
        self.dirty = true;
        Some(url)
    }

    pub(crate) fn finish_submission(&mut self) -> Option<String> {
        let url = self.pending_submission.take()?;
        self.dirty = true;
        Some(url)
    }

    /// Prepends an approved entry and clears the input box.
    pub(crate) fn add_submitted_video(
        &mut self,
        title: String,
        url: String,
        reward: Amount,
    ) -> VideoId {
        let id = VideoId::new(self.next_video_id);
        self.next_video_id += 1;
        self.catalog.insert(
            0,
            VideoItem {
                id,
                title,
                url,
                reward,
                status: VideoStatus::Approved,
                views: 0,
            },
        );
        self.upload_input.clear();
        self.dirty = true;
        id
    }

    fn find_video(&self, video_id: VideoId) -> Option<&VideoItem> {
        self.catalog.iter().find(|item| item.id == video_id)
    }
}
