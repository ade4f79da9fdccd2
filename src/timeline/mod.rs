//! Calendar-day partitioning of the post stream and date-addressed paging.
//!
//! Posts are sorted by creation instant, projected into the archive's time
//! zone and grouped into one [`DateBucket`] per calendar day. A [`PageWindow`]
//! is a run of consecutive buckets addressed by the date of its first bucket,
//! so page links stay stable as new posts are appended to the archive.

mod cursor;
mod partition;

use serde::{Deserialize, Serialize};

pub use cursor::{locate, parse_anchor, CursorError, PageBounds, PageWindow};
pub use partition::{parse_instant, partition, DateBucket, DatedPost, MalformedPost, Partition};

/// Order of posts and buckets produced by [`partition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// Reading direction of the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Newest first; paging forward walks back in time.
    #[default]
    Until,
    /// Oldest first; paging forward walks forward in time.
    Since,
}

impl Direction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Until => "until",
            Self::Since => "since",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "until" => Some(Self::Until),
            "since" => Some(Self::Since),
            _ => None,
        }
    }

    /// Sort order the buckets must be partitioned with for this direction.
    #[must_use]
    pub fn order(self) -> SortOrder {
        match self {
            Self::Until => SortOrder::Descending,
            Self::Since => SortOrder::Ascending,
        }
    }
}
