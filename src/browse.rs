//! Builds the model of one archive page from the repository.
//!
//! Everything is recomputed per request from a fresh read of the archive:
//! partition all posts, pick the page window, then resolve translations and
//! rich text only for the posts that are actually shown.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calendar::{
    bounds, parse_month, visible_days, CalendarDay, CalendarRange, CalendarState, CalendarView,
};
use crate::config::Config;
use crate::constants::SOURCE_SITE_URL;
use crate::i18n::Language;
use crate::overlay::{overlay, Segment};
use crate::store::{Account, PostRepository, StoreError};
use crate::timeline::{locate, partition, CursorError, DatedPost, Direction, PageBounds};

#[derive(Debug, Error)]
pub enum BrowseError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    #[error("unknown direction: {0}")]
    UnknownDirection(String),
    #[error(transparent)]
    Page(#[from] CursorError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BrowseError {
    /// Whether the request addressed a page that does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

/// Address and view options of a page, as received from the client.
#[derive(Debug, Clone, Default)]
pub struct BrowseRequest<'a> {
    pub lang: &'a str,
    /// `until` or `since`; `None` means `until`.
    pub direction: Option<&'a str>,
    /// `YYYY-MM-DD` date of the page's first day.
    pub anchor: Option<&'a str>,
    /// Account ids to show; `None` selects the default accounts.
    pub accounts: Option<Vec<String>>,
    /// Calendar month override, `YYYY-MM`.
    pub month: Option<&'a str>,
    /// Calendar view override, `days` or `months`.
    pub view: Option<&'a str>,
}

/// Everything needed to render one page.
#[derive(Debug, Clone, Serialize)]
pub struct ArchivePage {
    pub language: Language,
    pub direction: Direction,
    pub anchor_date: Option<NaiveDate>,
    pub bounds: PageBounds,
    pub accounts: Vec<Account>,
    /// Ids of the accounts whose posts are shown, in account order.
    pub selected_accounts: Vec<String>,
    /// Whether `selected_accounts` came from the request rather than defaults.
    pub explicit_selection: bool,
    pub days: Vec<DayView>,
    pub calendar: CalendarModel,
    /// Number of posts left out because their timestamp did not parse.
    pub malformed_posts: usize,
}

impl ArchivePage {
    #[must_use]
    pub fn account(&self, id: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_accounts.iter().any(|selected| selected == id)
    }
}

/// One calendar day of the page, restricted to the selected accounts.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: NaiveDate,
    /// Accounts posting that day, in order of their first post.
    pub account_ids: Vec<String>,
    pub posts: Vec<PostView>,
}

/// A post ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: String,
    pub account_id: String,
    /// Creation time in the archive's time zone.
    pub posted_at: DateTime<FixedOffset>,
    /// Translated text if available, otherwise the original.
    pub text: Vec<Segment>,
    /// Original text, present only when `text` is a translation.
    pub original: Option<Vec<Segment>>,
    pub translator: Option<String>,
    pub source_url: String,
}

/// Calendar popover contents.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarModel {
    pub state: CalendarState,
    pub range: CalendarRange,
    /// Days on which a selected account posted.
    pub active_dates: BTreeSet<NaiveDate>,
    pub days: Vec<CalendarDay>,
}

/// Build the page addressed by `request`.
///
/// # Errors
///
/// Returns a not-found [`BrowseError`] for an unknown language or direction
/// or an anchor date without posts, and [`BrowseError::Store`] if the archive
/// cannot be read.
pub async fn browse(
    repo: &dyn PostRepository,
    config: &Config,
    request: &BrowseRequest<'_>,
) -> Result<ArchivePage, BrowseError> {
    let language = Language::from_code(request.lang)
        .ok_or_else(|| BrowseError::UnknownLanguage(request.lang.to_string()))?;
    let direction = match request.direction {
        None => Direction::default(),
        Some(raw) => {
            Direction::from_str(raw).ok_or_else(|| BrowseError::UnknownDirection(raw.to_string()))?
        }
    };

    let accounts = repo.list_accounts().await?;
    let mut posts = Vec::new();
    for account in &accounts {
        posts.extend(repo.list_posts(account).await?);
    }

    let timeline = partition(posts, direction.order(), config.timezone);
    let window = locate(
        &timeline.buckets,
        direction,
        request.anchor,
        config.window_days,
    )?;
    debug!(
        direction = direction.as_str(),
        offset = window.offset,
        first_page = window.is_first_page(),
        buckets = timeline.buckets.len(),
        posts = timeline.post_count(),
        malformed = timeline.malformed.len(),
        "Located page"
    );

    let (selected_accounts, explicit_selection) = select_accounts(&accounts, request.accounts.as_deref());
    let by_id: HashMap<&str, &Account> = accounts.iter().map(|a| (a.id.as_str(), a)).collect();
    let is_selected = |id: &str| selected_accounts.iter().any(|s| s == id);

    let mut days = Vec::new();
    for bucket in window.buckets {
        let mut account_ids: Vec<String> = Vec::new();
        let mut views = Vec::new();
        for dated in bucket.posts.iter().filter(|p| is_selected(&p.post.account_id)) {
            if !account_ids.contains(&dated.post.account_id) {
                account_ids.push(dated.post.account_id.clone());
            }
            let Some(account) = by_id.get(dated.post.account_id.as_str()) else {
                continue;
            };
            views.push(post_view(repo, account, dated, language, config.timezone).await);
        }
        if !views.is_empty() {
            days.push(DayView {
                date: bucket.date,
                account_ids,
                posts: views,
            });
        }
    }

    let active_dates: BTreeSet<NaiveDate> = timeline
        .buckets
        .iter()
        .filter(|bucket| bucket.posts.iter().any(|p| is_selected(&p.post.account_id)))
        .map(|bucket| bucket.date)
        .collect();
    let calendar = calendar_model(
        active_dates,
        window.bounds.current,
        request.month,
        request.view,
        config.timezone,
    );

    Ok(ArchivePage {
        language,
        direction,
        anchor_date: window.anchor_date,
        bounds: window.bounds,
        accounts,
        selected_accounts,
        explicit_selection,
        days,
        calendar,
        malformed_posts: timeline.malformed.len(),
    })
}

/// Resolve the account filter. Unknown ids are dropped; without a request the
/// accounts marked `default_selected` are used.
fn select_accounts(accounts: &[Account], requested: Option<&[String]>) -> (Vec<String>, bool) {
    match requested {
        Some(ids) => (
            accounts
                .iter()
                .filter(|account| ids.contains(&account.id))
                .map(|account| account.id.clone())
                .collect(),
            true,
        ),
        None => (
            accounts
                .iter()
                .filter(|account| account.default_selected)
                .map(|account| account.id.clone())
                .collect(),
            false,
        ),
    }
}

async fn post_view(
    repo: &dyn PostRepository,
    account: &Account,
    dated: &DatedPost,
    language: Language,
    tz: Tz,
) -> PostView {
    let post = &dated.post;
    let translation = match repo.get_translation(account, &post.id, language.code()).await {
        Ok(translation) => translation,
        Err(e) => {
            warn!(post_id = %post.id, lang = language.code(), error = %e, "Ignoring unreadable translation");
            None
        }
    };

    let (text, original, translator) = match translation {
        Some(translated) => (
            overlay(&translated.translated_text, &post.text, &post.entities),
            Some(overlay(&post.text, &post.text, &post.entities)),
            translated.translator,
        ),
        None => (overlay(&post.text, &post.text, &post.entities), None, None),
    };

    PostView {
        id: post.id.clone(),
        account_id: post.account_id.clone(),
        posted_at: dated.posted_at.with_timezone(&tz).fixed_offset(),
        text,
        original,
        translator,
        source_url: format!(
            "{SOURCE_SITE_URL}/{}/status/{}",
            account.screen_name(),
            post.id
        ),
    }
}

fn calendar_model(
    active_dates: BTreeSet<NaiveDate>,
    current: Option<NaiveDate>,
    month: Option<&str>,
    view: Option<&str>,
    tz: Tz,
) -> CalendarModel {
    let range = bounds(&active_dates);
    let anchor = current
        .or(range.max_month)
        .unwrap_or_else(|| Utc::now().with_timezone(&tz).date_naive());

    let mut state = CalendarState::showing(anchor);
    if let Some(month) = month.and_then(parse_month).filter(|m| range.contains(*m)) {
        state = CalendarState::new(state.view, month);
    }
    if let Some(view) = view.and_then(CalendarView::from_str) {
        state = CalendarState::new(view, state.month);
    }

    let days = visible_days(state.month, &active_dates);
    CalendarModel {
        state,
        range,
        active_dates,
        days,
    }
}
