use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::pages::render_timeline_page;
use super::AppState;
use crate::browse::{browse, ArchivePage, BrowseError, BrowseRequest};

/// Create the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health))
        // JSON API
        .route("/api/:lang/:dir", get(api_page))
        .route("/api/:lang/:dir/:date", get(api_page_at))
        // HTML pages
        .route("/:lang", get(first_page))
        .route("/:lang/:dir", get(direction_page))
        .route("/:lang/:dir/:date", get(dated_page))
}

/// Query parameters shared by page routes.
///
/// Parsed from raw pairs because `account` repeats once per checked box.
#[derive(Debug, Default, PartialEq, Eq)]
struct PageQuery {
    /// `None` unless the request carried `filter` or any `account`.
    accounts: Option<Vec<String>>,
    month: Option<String>,
    view: Option<String>,
}

impl PageQuery {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "filter" => {
                    query.accounts.get_or_insert_with(Vec::new);
                }
                "account" => {
                    let accounts = query.accounts.get_or_insert_with(Vec::new);
                    if !value.is_empty() && !accounts.contains(&value) {
                        accounts.push(value);
                    }
                }
                "month" => query.month = Some(value),
                "view" => query.view = Some(value),
                _ => {}
            }
        }
        query
    }

    fn has_calendar_params(&self) -> bool {
        self.month.is_some() || self.view.is_some()
    }
}

// ========== HTML Routes ==========

async fn root(State(state): State<AppState>) -> Redirect {
    Redirect::to(&format!("/{}", state.config.default_language.code()))
}

async fn first_page(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    html_page(&state, &lang, None, None, PageQuery::from_pairs(pairs)).await
}

async fn direction_page(
    State(state): State<AppState>,
    Path((lang, dir)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    html_page(&state, &lang, Some(dir.as_str()), None, PageQuery::from_pairs(pairs)).await
}

async fn dated_page(
    State(state): State<AppState>,
    Path((lang, dir, date)): Path<(String, String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    html_page(
        &state,
        &lang,
        Some(dir.as_str()),
        Some(date.as_str()),
        PageQuery::from_pairs(pairs),
    )
    .await
}

async fn html_page(
    state: &AppState,
    lang: &str,
    dir: Option<&str>,
    date: Option<&str>,
    query: PageQuery,
) -> Response {
    match load_page(state, lang, dir, date, &query).await {
        Ok(page) => {
            let html = render_timeline_page(&page, query.has_calendar_params());
            Html(html.into_string()).into_response()
        }
        Err(response) => response,
    }
}

async fn health() -> &'static str {
    "OK"
}

// ========== API Routes ==========

async fn api_page(
    State(state): State<AppState>,
    Path((lang, dir)): Path<(String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    json_page(&state, &lang, &dir, None, PageQuery::from_pairs(pairs)).await
}

async fn api_page_at(
    State(state): State<AppState>,
    Path((lang, dir, date)): Path<(String, String, String)>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    json_page(&state, &lang, &dir, Some(date.as_str()), PageQuery::from_pairs(pairs)).await
}

async fn json_page(
    state: &AppState,
    lang: &str,
    dir: &str,
    date: Option<&str>,
    query: PageQuery,
) -> Response {
    match load_page(state, lang, Some(dir), date, &query).await {
        Ok(page) => Json(page).into_response(),
        Err(response) => response,
    }
}

// ========== Helpers ==========

async fn load_page(
    state: &AppState,
    lang: &str,
    dir: Option<&str>,
    date: Option<&str>,
    query: &PageQuery,
) -> Result<ArchivePage, Response> {
    let request = BrowseRequest {
        lang,
        direction: dir,
        anchor: date,
        accounts: query.accounts.clone(),
        month: query.month.as_deref(),
        view: query.view.as_deref(),
    };

    browse(state.repo.as_ref(), &state.config, &request)
        .await
        .map_err(|e| error_response(&e))
}

fn error_response(error: &BrowseError) -> Response {
    if error.is_not_found() {
        tracing::debug!(error = %error, "Page not found");
        (StatusCode::NOT_FOUND, "Page not found").into_response()
    } else {
        tracing::error!("Failed to load archive: {error}");
        (StatusCode::INTERNAL_SERVER_ERROR, "Archive error").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_query_without_filter() {
        let query = PageQuery::from_pairs(pairs(&[("month", "2024-03")]));
        assert_eq!(query.accounts, None);
        assert_eq!(query.month.as_deref(), Some("2024-03"));
        assert!(query.has_calendar_params());
    }

    #[test]
    fn test_query_repeated_accounts() {
        let query = PageQuery::from_pairs(pairs(&[
            ("filter", "1"),
            ("account", "alice"),
            ("account", "bob"),
            ("account", "alice"),
            ("utm_source", "x"),
        ]));
        assert_eq!(
            query.accounts,
            Some(vec!["alice".to_string(), "bob".to_string()])
        );
        assert!(!query.has_calendar_params());
    }

    #[test]
    fn test_query_empty_filter() {
        let query = PageQuery::from_pairs(pairs(&[("filter", "1")]));
        assert_eq!(query.accounts, Some(Vec::new()));
    }
}
