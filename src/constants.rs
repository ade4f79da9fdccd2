//! Shared constants used across the application.

/// Time zone used to project post instants onto calendar days.
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";

/// Number of date buckets shown on one page.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

/// Number of cells in the calendar day grid (six full weeks).
pub const CALENDAR_GRID_DAYS: usize = 42;

/// Base URL of the platform the archived posts were collected from.
pub const SOURCE_SITE_URL: &str = "https://x.com";
