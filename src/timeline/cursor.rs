use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::{DateBucket, Direction};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    /// The anchor date has no bucket (or is not a date at all).
    #[error("no page starts at {0}")]
    NotFound(String),
}

/// Navigation targets around a [`PageWindow`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageBounds {
    /// Date of the first bucket in the current order.
    pub first: Option<NaiveDate>,
    /// Chronologically earliest bucket, whichever the direction.
    pub oldest: Option<NaiveDate>,
    /// Anchor of the previous page, if this is not the first page.
    pub prev: Option<NaiveDate>,
    /// Anchor of the next page, if there is one.
    pub next: Option<NaiveDate>,
    /// Date of the first bucket shown on this page.
    pub current: Option<NaiveDate>,
}

/// A contiguous run of buckets selected by [`locate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow<'a> {
    pub direction: Direction,
    pub anchor_date: Option<NaiveDate>,
    /// Index of the first shown bucket.
    pub offset: usize,
    pub buckets: &'a [DateBucket],
    pub bounds: PageBounds,
}

impl PageWindow<'_> {
    /// Whether the window starts at the beginning of its order.
    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.offset == 0
    }
}

/// Parse an anchor date written as `YYYY-MM-DD`.
///
/// Only the canonical spelling is accepted, so `2024-3-1` does not address the
/// `2024-03-01` page.
#[must_use]
pub fn parse_anchor(raw: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    (date.format("%Y-%m-%d").to_string() == raw).then_some(date)
}

/// Select the page of `window_size` buckets starting at `anchor`.
///
/// Without an anchor the page starts at the first bucket. `buckets` must come
/// from [`partition`](super::partition) with `direction`'s sort order.
///
/// # Errors
///
/// Returns [`CursorError::NotFound`] if `anchor` is given and no bucket has
/// that date.
pub fn locate<'a>(
    buckets: &'a [DateBucket],
    direction: Direction,
    anchor: Option<&str>,
    window_size: usize,
) -> Result<PageWindow<'a>, CursorError> {
    let window_size = window_size.max(1);

    let (offset, anchor_date) = match anchor {
        None => (0, None),
        Some(raw) => {
            let not_found = || CursorError::NotFound(raw.to_string());
            let date = parse_anchor(raw).ok_or_else(not_found)?;
            let offset = buckets
                .iter()
                .position(|bucket| bucket.date == date)
                .ok_or_else(not_found)?;
            (offset, Some(date))
        }
    };

    let end = offset.saturating_add(window_size).min(buckets.len());
    let window = &buckets[offset..end];

    let bounds = PageBounds {
        first: buckets.first().map(|b| b.date),
        oldest: buckets.iter().map(|b| b.date).min(),
        prev: if offset == 0 {
            None
        } else {
            Some(buckets[offset.saturating_sub(window_size)].date)
        },
        next: offset
            .checked_add(window_size)
            .and_then(|i| buckets.get(i))
            .map(|b| b.date),
        current: window.first().map(|b| b.date),
    };

    Ok(PageWindow {
        direction,
        anchor_date,
        offset,
        buckets: window,
        bounds,
    })
}
