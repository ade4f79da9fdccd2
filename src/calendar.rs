//! Month grid and navigation state for the date-jump calendar.
//!
//! The calendar shows every day with posts as a link, independent of which
//! page is currently displayed. Navigation is limited to the months between
//! the earliest and latest such day.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::constants::CALENDAR_GRID_DAYS;

/// First and last month that contain a day with posts.
///
/// Both are `None` for an archive without posts, in which case navigation is
/// unrestricted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CalendarRange {
    pub min_month: Option<NaiveDate>,
    pub max_month: Option<NaiveDate>,
}

impl CalendarRange {
    /// Whether the month starting at `month` may be shown.
    #[must_use]
    pub fn contains(&self, month: NaiveDate) -> bool {
        let month = first_of_month(month);
        self.min_month.map_or(true, |min| month >= min)
            && self.max_month.map_or(true, |max| month <= max)
    }
}

/// Month bounds of a set of dates.
#[must_use]
pub fn bounds(dates_with_posts: &BTreeSet<NaiveDate>) -> CalendarRange {
    CalendarRange {
        min_month: dates_with_posts.first().copied().map(first_of_month),
        max_month: dates_with_posts.last().copied().map(first_of_month),
    }
}

/// One cell of the day grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Whether the day belongs to the displayed month rather than padding.
    pub in_month: bool,
    /// Whether the day has posts and can be jumped to.
    pub active: bool,
}

/// The 42 days (six weeks, Sunday first) of the grid covering `month`.
#[must_use]
pub fn visible_days(month: NaiveDate, dates_with_posts: &BTreeSet<NaiveDate>) -> Vec<CalendarDay> {
    let first = first_of_month(month);
    let lead = i64::from(first.weekday().num_days_from_sunday());
    let start = add_days(first, -lead);

    (0..CALENDAR_GRID_DAYS)
        .scan(start, |day, _| {
            let current = *day;
            *day = add_days(current, 1);
            Some(current)
        })
        .map(|date| CalendarDay {
            date,
            in_month: date.year() == first.year() && date.month() == first.month(),
            active: dates_with_posts.contains(&date),
        })
        .collect()
}

/// Which grid the calendar shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Days,
    Months,
}

impl CalendarView {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Months => "months",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "days" => Some(Self::Days),
            "months" => Some(Self::Months),
            _ => None,
        }
    }
}

/// Displayed view and month. `month` is always the first of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarState {
    pub view: CalendarView,
    pub month: NaiveDate,
}

impl CalendarState {
    #[must_use]
    pub fn new(view: CalendarView, month: NaiveDate) -> Self {
        Self {
            view,
            month: first_of_month(month),
        }
    }

    /// Day grid of the month containing `date`.
    #[must_use]
    pub fn showing(date: NaiveDate) -> Self {
        Self::new(CalendarView::Days, date)
    }
}

/// User or page events that change the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarEvent {
    /// Previous month (day grid) or previous year (month grid).
    NavigatePrev,
    /// Next month (day grid) or next year (month grid).
    NavigateNext,
    /// Pick a month (1-12) of the displayed year and return to the day grid.
    SelectMonth(u32),
    /// Flip between the day and month grids.
    ToggleView,
    /// Follow the page: show the day grid of this date's month.
    SyncToDate(NaiveDate),
}

/// Apply `event` to `state`.
///
/// Navigation to a month outside `range` leaves the state unchanged.
#[must_use]
pub fn reduce(state: CalendarState, event: CalendarEvent, range: &CalendarRange) -> CalendarState {
    match event {
        CalendarEvent::NavigatePrev => {
            let target = step(state, -1);
            if range.min_month.is_some_and(|min| target < min) {
                state
            } else {
                CalendarState { month: target, ..state }
            }
        }
        CalendarEvent::NavigateNext => {
            let target = step(state, 1);
            if range.max_month.is_some_and(|max| target > max) {
                state
            } else {
                CalendarState { month: target, ..state }
            }
        }
        CalendarEvent::SelectMonth(month) => {
            match NaiveDate::from_ymd_opt(state.month.year(), month, 1) {
                Some(candidate) if range.contains(candidate) => {
                    CalendarState::new(CalendarView::Days, candidate)
                }
                _ => state,
            }
        }
        CalendarEvent::ToggleView => CalendarState {
            view: match state.view {
                CalendarView::Days => CalendarView::Months,
                CalendarView::Months => CalendarView::Days,
            },
            ..state
        },
        CalendarEvent::SyncToDate(date) => CalendarState::showing(date),
    }
}

/// Whether `event` would change `state`; controls for no-op events are
/// rendered disabled.
#[must_use]
pub fn is_enabled(state: CalendarState, event: CalendarEvent, range: &CalendarRange) -> bool {
    match event {
        CalendarEvent::SelectMonth(month) => NaiveDate::from_ymd_opt(state.month.year(), month, 1)
            .is_some_and(|candidate| range.contains(candidate)),
        _ => reduce(state, event, range) != state,
    }
}

fn step(state: CalendarState, direction: i32) -> NaiveDate {
    match state.view {
        CalendarView::Days => shift_months(state.month, direction),
        CalendarView::Months => shift_months(state.month, direction * 12),
    }
}

/// Parse a `YYYY-MM` month.
#[must_use]
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.split_once('-')?;
    if month.len() != 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}

/// Format a month as `YYYY-MM`.
#[must_use]
pub fn format_month(month: NaiveDate) -> String {
    month.format("%Y-%m").to_string()
}

#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn shift_months(month: NaiveDate, months: i32) -> NaiveDate {
    let total = month.year() * 12 + month.month0() as i32 + months;
    NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1).unwrap_or(month)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn dates(list: &[NaiveDate]) -> BTreeSet<NaiveDate> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_bounds_empty_set() {
        let range = bounds(&BTreeSet::new());
        assert_eq!(range.min_month, None);
        assert_eq!(range.max_month, None);
        assert!(range.contains(d(1999, 12, 31)));
    }

    #[test]
    fn test_bounds_normalizes_to_first_of_month() {
        let range = bounds(&dates(&[d(2024, 3, 15), d(2023, 11, 2), d(2024, 1, 31)]));
        assert_eq!(range.min_month, Some(d(2023, 11, 1)));
        assert_eq!(range.max_month, Some(d(2024, 3, 1)));
        assert!(range.contains(d(2024, 3, 31)));
        assert!(!range.contains(d(2024, 4, 1)));
        assert!(!range.contains(d(2023, 10, 31)));
    }

    #[test]
    fn test_visible_days_grid() {
        // March 2024 starts on a Friday.
        let active = dates(&[d(2024, 3, 1), d(2024, 4, 2)]);
        let days = visible_days(d(2024, 3, 20), &active);

        assert_eq!(days.len(), 42);
        assert_eq!(days[0].date, d(2024, 2, 25));
        assert_eq!(days[0].date.weekday(), chrono::Weekday::Sun);
        assert!(!days[0].in_month);
        assert_eq!(days[5].date, d(2024, 3, 1));
        assert!(days[5].in_month);
        assert!(days[5].active);
        assert_eq!(days[41].date, d(2024, 4, 6));

        // Padding days use the same membership rule.
        let april_second = days.iter().find(|day| day.date == d(2024, 4, 2)).unwrap();
        assert!(!april_second.in_month);
        assert!(april_second.active);

        assert_eq!(days.iter().filter(|day| day.active).count(), 2);
        assert!(days.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
    }

    #[test]
    fn test_visible_days_month_starting_sunday() {
        // September 2024 starts on a Sunday: no leading padding.
        let days = visible_days(d(2024, 9, 1), &BTreeSet::new());
        assert_eq!(days[0].date, d(2024, 9, 1));
        assert!(days.iter().all(|day| !day.active));
    }

    #[test]
    fn test_navigation_respects_bounds() {
        let range = bounds(&dates(&[d(2024, 1, 10), d(2024, 3, 5)]));
        let state = CalendarState::showing(d(2024, 1, 10));

        assert_eq!(reduce(state, CalendarEvent::NavigatePrev, &range), state);
        assert!(!is_enabled(state, CalendarEvent::NavigatePrev, &range));

        let next = reduce(state, CalendarEvent::NavigateNext, &range);
        assert_eq!(next.month, d(2024, 2, 1));
        let next = reduce(next, CalendarEvent::NavigateNext, &range);
        assert_eq!(next.month, d(2024, 3, 1));
        assert_eq!(reduce(next, CalendarEvent::NavigateNext, &range), next);
    }

    #[test]
    fn test_navigation_unbounded_for_empty_archive() {
        let range = CalendarRange::default();
        let state = CalendarState::showing(d(2024, 1, 1));
        assert_eq!(
            reduce(state, CalendarEvent::NavigatePrev, &range).month,
            d(2023, 12, 1)
        );
    }

    #[test]
    fn test_months_view_steps_by_year() {
        let range = bounds(&dates(&[d(2022, 6, 1), d(2024, 8, 1)]));
        let state = CalendarState::new(CalendarView::Months, d(2023, 5, 1));

        let next = reduce(state, CalendarEvent::NavigateNext, &range);
        assert_eq!(next.month, d(2024, 5, 1));
        assert_eq!(next.view, CalendarView::Months);

        // 2022-05 is before 2022-06.
        assert_eq!(reduce(state, CalendarEvent::NavigatePrev, &range), state);
    }

    #[test]
    fn test_select_month() {
        let range = bounds(&dates(&[d(2024, 2, 1), d(2024, 10, 1)]));
        let state = CalendarState::new(CalendarView::Months, d(2024, 5, 1));

        let selected = reduce(state, CalendarEvent::SelectMonth(9), &range);
        assert_eq!(selected, CalendarState::new(CalendarView::Days, d(2024, 9, 1)));

        assert_eq!(reduce(state, CalendarEvent::SelectMonth(1), &range), state);
        assert_eq!(reduce(state, CalendarEvent::SelectMonth(13), &range), state);
        assert!(is_enabled(state, CalendarEvent::SelectMonth(5), &range));
        assert!(!is_enabled(state, CalendarEvent::SelectMonth(11), &range));
    }

    #[test]
    fn test_toggle_keeps_month() {
        let range = CalendarRange::default();
        let state = CalendarState::showing(d(2024, 7, 19));
        let toggled = reduce(state, CalendarEvent::ToggleView, &range);
        assert_eq!(toggled.view, CalendarView::Months);
        assert_eq!(toggled.month, state.month);
        assert_eq!(reduce(toggled, CalendarEvent::ToggleView, &range), state);
    }

    #[test]
    fn test_sync_to_date_resets_view() {
        let range = CalendarRange::default();
        let state = CalendarState::new(CalendarView::Months, d(2020, 1, 1));
        let synced = reduce(state, CalendarEvent::SyncToDate(d(2024, 3, 3)), &range);
        assert_eq!(synced, CalendarState::new(CalendarView::Days, d(2024, 3, 1)));
    }

    #[test]
    fn test_shift_months_wraps_years() {
        assert_eq!(shift_months(d(2024, 1, 1), -1), d(2023, 12, 1));
        assert_eq!(shift_months(d(2024, 12, 1), 1), d(2025, 1, 1));
        assert_eq!(shift_months(d(2024, 3, 1), -24), d(2022, 3, 1));
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03"), Some(d(2024, 3, 1)));
        assert_eq!(parse_month("2024-3"), None);
        assert_eq!(parse_month("2024-13"), None);
        assert_eq!(parse_month("march"), None);
        assert_eq!(format_month(d(2024, 3, 17)), "2024-03");
    }
}
