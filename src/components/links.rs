//! URL builder for archive pages.
//!
//! Every link on a page keeps the visitor's language, direction and account
//! filter; calendar links additionally carry the calendar month and view.

use chrono::NaiveDate;
use urlencoding::encode;

use crate::browse::ArchivePage;
use crate::calendar::{format_month, CalendarState, CalendarView};
use crate::i18n::Language;
use crate::timeline::Direction;

/// Builds links relative to the page being rendered.
#[derive(Debug, Clone)]
pub struct PageLinks<'a> {
    language: Language,
    direction: Direction,
    /// Account filter to preserve, `None` for the default selection.
    accounts: Option<&'a [String]>,
}

impl<'a> PageLinks<'a> {
    #[must_use]
    pub fn new(language: Language, direction: Direction) -> Self {
        Self {
            language,
            direction,
            accounts: None,
        }
    }

    /// Links for `page`, keeping its account filter if one was requested.
    #[must_use]
    pub fn for_page(page: &'a ArchivePage) -> Self {
        Self {
            language: page.language,
            direction: page.direction,
            accounts: page
                .explicit_selection
                .then_some(page.selected_accounts.as_slice()),
        }
    }

    /// Same links with the account filter replaced by `accounts`.
    #[must_use]
    pub fn with_accounts<'b>(&self, accounts: &'b [String]) -> PageLinks<'b> {
        PageLinks {
            language: self.language,
            direction: self.direction,
            accounts: Some(accounts),
        }
    }

    /// Page starting at `date`, or the first page when `date` is `None`.
    #[must_use]
    pub fn page(&self, date: Option<NaiveDate>) -> String {
        self.with_query(self.page_path(date), &[])
    }

    /// Previous page link. Returning to the first page uses the short form.
    #[must_use]
    pub fn prev_page(&self, prev: NaiveDate, first: Option<NaiveDate>) -> String {
        if first == Some(prev) {
            self.page(None)
        } else {
            self.page(Some(prev))
        }
    }

    /// First page in `direction`, keeping the filter.
    #[must_use]
    pub fn direction(&self, direction: Direction) -> String {
        let links = Self {
            direction,
            ..self.clone()
        };
        links.page(None)
    }

    /// Same page in another language. The account filter is kept.
    #[must_use]
    pub fn language(&self, language: Language, date: Option<NaiveDate>) -> String {
        let links = Self {
            language,
            ..self.clone()
        };
        links.page(date)
    }

    /// Current page with the calendar opened at `state`.
    #[must_use]
    pub fn calendar(&self, current: Option<NaiveDate>, state: CalendarState) -> String {
        let month = format_month(state.month);
        let mut extra = vec![("month", month.as_str())];
        if state.view == CalendarView::Months {
            extra.push(("view", state.view.as_str()));
        }
        self.with_query(self.page_path(current), &extra)
    }

    /// Form action for the account filter: the first page in this direction.
    #[must_use]
    pub fn filter_action(&self) -> String {
        self.page_path(None)
    }

    fn page_path(&self, date: Option<NaiveDate>) -> String {
        let lang = self.language.code();
        match (self.direction, date) {
            (Direction::Until, None) => format!("/{lang}"),
            (direction, None) => format!("/{lang}/{}", direction.as_str()),
            (direction, Some(date)) => format!("/{lang}/{}/{date}", direction.as_str()),
        }
    }

    fn with_query(&self, path: String, extra: &[(&str, &str)]) -> String {
        let mut params = Vec::new();

        if let Some(accounts) = self.accounts {
            params.push("filter=1".to_string());
            for id in accounts {
                params.push(format!("account={}", encode(id)));
            }
        }

        for (key, value) in extra {
            params.push(format!("{key}={}", encode(value)));
        }

        if params.is_empty() {
            path
        } else {
            format!("{path}?{}", params.join("&"))
        }
    }
}
