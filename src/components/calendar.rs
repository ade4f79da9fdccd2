//! Calendar popover for jumping to a date.
//!
//! The calendar has no client-side state: every control is a link to the same
//! page with the calendar state the control would produce.

use chrono::{Datelike, NaiveDate};
use maud::{html, Markup, Render};

use super::links::PageLinks;
use crate::browse::CalendarModel;
use crate::calendar::{is_enabled, reduce, CalendarEvent, CalendarState, CalendarView};
use crate::i18n::Language;

/// Day or month grid with navigation controls.
#[derive(Debug, Clone)]
pub struct CalendarWidget<'a> {
    model: &'a CalendarModel,
    links: &'a PageLinks<'a>,
    language: Language,
    /// Anchor of the page the calendar is shown on.
    current: Option<NaiveDate>,
    /// First day shown on the page, highlighted in the day grid.
    current_day: Option<NaiveDate>,
    /// Whether the popover starts expanded.
    open: bool,
}

impl<'a> CalendarWidget<'a> {
    #[must_use]
    pub fn new(
        model: &'a CalendarModel,
        links: &'a PageLinks<'a>,
        language: Language,
        current: Option<NaiveDate>,
    ) -> Self {
        Self {
            model,
            links,
            language,
            current,
            current_day: current,
            open: false,
        }
    }

    #[must_use]
    pub fn current_day(mut self, date: Option<NaiveDate>) -> Self {
        self.current_day = date;
        self
    }

    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// Link for `event`, or `None` when the event would not change anything.
    fn event_url(&self, event: CalendarEvent) -> Option<String> {
        let state = self.model.state;
        let range = &self.model.range;
        is_enabled(state, event, range).then(|| self.state_url(reduce(state, event, range)))
    }

    fn state_url(&self, state: CalendarState) -> String {
        self.links.calendar(self.current, state)
    }

    fn render_control(url: Option<String>, label: &str, class: &str) -> Markup {
        html! {
            @if let Some(url) = url {
                a class=(class) href=(url) aria-label=(label) { (label) }
            } @else {
                span class=(format!("{class} disabled")) aria-disabled="true" { (label) }
            }
        }
    }

    fn render_header(&self) -> Markup {
        let state = self.model.state;
        let title = match state.view {
            CalendarView::Days => self.language.format_month_title(state.month),
            CalendarView::Months => state.month.year().to_string(),
        };
        html! {
            div class="calendar-header" {
                (Self::render_control(self.event_url(CalendarEvent::NavigatePrev), "\u{2039}", "calendar-prev"))
                a class="calendar-title" href=(self.state_url(reduce(state, CalendarEvent::ToggleView, &self.model.range))) {
                    (title)
                }
                (Self::render_control(self.event_url(CalendarEvent::NavigateNext), "\u{203a}", "calendar-next"))
            }
        }
    }

    fn render_days(&self) -> Markup {
        let weekdays = self.language.strings().weekdays;
        html! {
            div class="calendar-grid days" role="grid" {
                @for weekday in weekdays {
                    span class="weekday" { (weekday) }
                }
                @for day in &self.model.days {
                    @let class = day_class(day.in_month, self.current_day == Some(day.date));
                    @if day.active {
                        a class=(class) href=(self.links.page(Some(day.date))) { (day.date.day()) }
                    } @else {
                        span class=(format!("{class} empty")) { (day.date.day()) }
                    }
                }
            }
        }
    }

    fn render_months(&self) -> Markup {
        let state = self.model.state;
        html! {
            div class="calendar-grid months" role="grid" {
                @for month in 1..=12u32 {
                    @let label = self.language.month_label(month);
                    @let current = month == state.month.month();
                    @if let Some(url) = self.event_url(CalendarEvent::SelectMonth(month)) {
                        a class=(if current { "month current" } else { "month" }) href=(url) { (label) }
                    } @else {
                        span class="month disabled" { (label) }
                    }
                }
            }
        }
    }
}

fn day_class(in_month: bool, current: bool) -> String {
    let mut class = String::from("day");
    if !in_month {
        class.push_str(" outside");
    }
    if current {
        class.push_str(" current");
    }
    class
}

impl Render for CalendarWidget<'_> {
    fn render(&self) -> Markup {
        let strings = self.language.strings();
        let (label, grid) = match self.model.state.view {
            CalendarView::Days => (strings.choose_day, self.render_days()),
            CalendarView::Months => (strings.choose_month, self.render_months()),
        };
        html! {
            details class="calendar" open[self.open] {
                summary { (strings.go_to_date) }
                div class="calendar-body" aria-label=(label) {
                    (self.render_header())
                    (grid)
                }
            }
        }
    }
}
