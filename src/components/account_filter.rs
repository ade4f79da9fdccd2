//! Account filter form.

use maud::{html, Markup, Render};

use super::links::PageLinks;
use super::post::Avatar;
use crate::browse::ArchivePage;

/// GET form with one checkbox per account.
///
/// Submitting always sends `filter=1` so that clearing every box is not
/// mistaken for "use the default selection". The select-all link toggles:
/// once every account is selected it clears the selection instead.
#[derive(Debug, Clone, Copy)]
pub struct AccountFilter<'a> {
    page: &'a ArchivePage,
    links: &'a PageLinks<'a>,
}

impl<'a> AccountFilter<'a> {
    #[must_use]
    pub fn new(page: &'a ArchivePage, links: &'a PageLinks<'a>) -> Self {
        Self { page, links }
    }
}

impl Render for AccountFilter<'_> {
    fn render(&self) -> Markup {
        let strings = self.page.language.strings();
        let lang = self.page.language.code();
        let all_selected = !self.page.accounts.is_empty()
            && self
                .page
                .accounts
                .iter()
                .all(|account| self.page.is_selected(&account.id));
        let toggled: Vec<String> = if all_selected {
            Vec::new()
        } else {
            self.page.accounts.iter().map(|a| a.id.clone()).collect()
        };
        let select_all_url = self.links.with_accounts(&toggled).page(None);
        html! {
            details class="account-filter" {
                summary { (strings.account_filter) }
                form method="get" action=(self.links.filter_action()) {
                    input type="hidden" name="filter" value="1";
                    fieldset {
                        @for account in &self.page.accounts {
                            label title=(account.display_name(lang)) {
                                input
                                    type="checkbox"
                                    name="account"
                                    value=(account.id)
                                    checked[self.page.is_selected(&account.id)];
                                (Avatar::new(account, self.page.language))
                                (account.short_name(lang))
                            }
                        }
                    }
                    div class="filter-actions" {
                        a class="select-all" href=(select_all_url) aria-pressed=(all_selected) {
                            (strings.select_all)
                        }
                        button type="submit" { (strings.apply_filter) }
                    }
                }
            }
        }
    }
}
