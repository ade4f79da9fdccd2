//! Date-based page navigation.
//!
//! Archive pages are addressed by the date of their first day rather than a
//! page number, so the controls link to neighbouring anchor dates.

use maud::{html, Markup, Render};

use super::links::PageLinks;
use crate::i18n::Strings;
use crate::timeline::{Direction, PageBounds};

/// Previous/next controls for a page window.
///
/// Renders nothing when the archive fits on one page.
#[derive(Debug, Clone)]
pub struct DateNav {
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
    prev_label: &'static str,
    next_label: &'static str,
}

impl DateNav {
    #[must_use]
    pub fn new(bounds: &PageBounds, links: &PageLinks<'_>, strings: &Strings) -> Self {
        Self {
            prev_url: bounds.prev.map(|prev| links.prev_page(prev, bounds.first)),
            next_url: bounds.next.map(|next| links.page(Some(next))),
            prev_label: strings.prev_page,
            next_label: strings.next_page,
        }
    }

    /// Check if navigation should be displayed.
    #[must_use]
    pub fn should_display(&self) -> bool {
        self.prev_url.is_some() || self.next_url.is_some()
    }
}

impl Render for DateNav {
    fn render(&self) -> Markup {
        if !self.should_display() {
            return html! {};
        }

        html! {
            nav class="pagination" {
                @if let Some(ref url) = self.prev_url {
                    a href=(url) rel="prev" { "\u{00ab} " (self.prev_label) }
                } @else {
                    span class="disabled" { "\u{00ab} " (self.prev_label) }
                }

                @if let Some(ref url) = self.next_url {
                    a href=(url) rel="next" { (self.next_label) " \u{00bb}" }
                } @else {
                    span class="disabled" { (self.next_label) " \u{00bb}" }
                }
            }
        }
    }
}

/// Latest-first / oldest-first switch.
///
/// Both links go to the first page of their order, which for oldest-first
/// is the day of the oldest post.
#[derive(Debug, Clone)]
pub struct DirectionSwitch {
    current: Direction,
    until_url: String,
    since_url: String,
    until_label: &'static str,
    since_label: &'static str,
}

impl DirectionSwitch {
    #[must_use]
    pub fn new(current: Direction, links: &PageLinks<'_>, strings: &Strings) -> Self {
        Self {
            current,
            until_url: links.direction(Direction::Until),
            since_url: links.direction(Direction::Since),
            until_label: strings.sort_by_latest,
            since_label: strings.sort_by_oldest,
        }
    }
}

impl Render for DirectionSwitch {
    fn render(&self) -> Markup {
        let options = [
            (Direction::Until, &self.until_url, self.until_label),
            (Direction::Since, &self.since_url, self.since_label),
        ];
        html! {
            nav class="direction-switch" {
                @for (direction, url, label) in options {
                    @if direction == self.current {
                        span class="current" aria-current="page" { (label) }
                    } @else {
                        a href=(url) { (label) }
                    }
                }
            }
        }
    }
}
