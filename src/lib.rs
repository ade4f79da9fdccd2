//! Post archive browser library.
//!
//! Serves an archive of social-media posts as a date-paginated timeline:
//! posts are grouped into calendar days in the archive's time zone, shown a
//! window of days at a time, with translations, inline links and media, an
//! account filter and a calendar for jumping to a date.

pub mod browse;
pub mod calendar;
pub mod components;
pub mod config;
pub mod constants;
pub mod i18n;
pub mod overlay;
pub mod store;
pub mod timeline;
pub mod web;
