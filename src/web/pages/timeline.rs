//! Archive timeline page.

use maud::{html, Markup};

use crate::browse::ArchivePage;
use crate::components::{
    AccountFilter, BaseLayout, CalendarWidget, DateNav, DaySection, DirectionSwitch, PageLinks,
};
use crate::i18n::Language;

/// Render a page of the archive.
///
/// `calendar_open` expands the calendar, which is used when the request
/// carried calendar navigation parameters.
#[must_use]
pub fn render_timeline_page(page: &ArchivePage, calendar_open: bool) -> Markup {
    let links = PageLinks::for_page(page);
    let strings = page.language.strings();
    let nav = DateNav::new(&page.bounds, &links, strings);

    let title = page.anchor_date.map(|date| page.language.format_date(date));
    let language_links = Language::ALL
        .iter()
        .map(|lang| (*lang, links.language(*lang, page.anchor_date)))
        .collect();

    let content = html! {
        div class="toolbar" {
            (DirectionSwitch::new(page.direction, &links, strings))
            (CalendarWidget::new(&page.calendar, &links, page.language, page.anchor_date)
                .current_day(page.bounds.current)
                .open(calendar_open))
            (AccountFilter::new(page, &links))
        }

        @if page.days.is_empty() {
            p class="empty-state" { (strings.no_posts) }
        } @else {
            @for day in &page.days {
                (DaySection::new(day, page, &links))
            }
        }

        (nav)
    };

    let mut layout = BaseLayout::new(page.language).with_language_links(language_links);
    if let Some(ref title) = title {
        layout = layout.with_title(title);
    }
    layout.render(content)
}
