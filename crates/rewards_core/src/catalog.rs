use std::fmt;

use crate::Amount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VideoId(u64);

impl VideoId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Moderation status. Only `Approved` is produced today; the other two are
/// reserved for a review queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoItem {
    pub id: VideoId,
    pub title: String,
    pub url: String,
    /// Always positive; fixed once the entry exists.
    pub reward: Amount,
    pub status: VideoStatus,
    pub views: u32,
}

/// Catalog entries present at startup, in display order.
pub fn seed_catalog() -> Vec<VideoItem> {
    [
        (1, "Earn ₹10 Watching this", 10, 1_200),
        (2, "Daily Bonus Video", 5, 800),
        (3, "New Viral Status", 3, 2_400),
    ]
    .into_iter()
    .map(|(id, title, reward, views)| VideoItem {
        id: VideoId::new(id),
        title: title.to_string(),
        url: format!("https://youtube.com/watch?v={id}"),
        reward: Amount::from_major(reward),
        status: VideoStatus::Approved,
        views,
    })
    .collect()
}
