//! UI string tables and date formatting per language.

use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

/// A language the archive can be browsed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ko,
    En,
}

/// Display strings for one language.
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub title: &'static str,
    pub account_filter: &'static str,
    pub select_all: &'static str,
    pub apply_filter: &'static str,
    pub show_original: &'static str,
    pub translated_by: &'static str,
    pub prev_page: &'static str,
    pub next_page: &'static str,
    pub sort_by_latest: &'static str,
    pub sort_by_oldest: &'static str,
    pub no_posts: &'static str,
    pub go_to_date: &'static str,
    pub choose_month: &'static str,
    pub choose_day: &'static str,
    pub view_source: &'static str,
    pub disclaimer: &'static str,
    pub weekdays: [&'static str; 7],
}

const KO: Strings = Strings {
    title: "이키즈라이브! 아카이브",
    account_filter: "계정 필터",
    select_all: "모두 선택",
    apply_filter: "적용",
    show_original: "원문 보기",
    translated_by: "번역",
    prev_page: "이전 페이지",
    next_page: "다음 페이지",
    sort_by_latest: "최신순",
    sort_by_oldest: "날짜순",
    no_posts: "게시물이 없습니다. 필터를 변경하거나 다른 날짜를 선택해 보세요.",
    go_to_date: "날짜로 이동",
    choose_month: "월 선택",
    choose_day: "날짜 선택",
    view_source: "원본 게시물",
    disclaimer: "이 아카이브는 비공식 팬사이트이며, 프로젝트 이키즈라이브!와 무관합니다.\n모든 저작권은 원작자(©プロジェクトイキヅライブ！)에 있습니다.",
    weekdays: ["일", "월", "화", "수", "목", "금", "토"],
};

const EN: Strings = Strings {
    title: "Ikizu Live! Archive",
    account_filter: "Accounts",
    select_all: "Select all",
    apply_filter: "Apply",
    show_original: "Show original",
    translated_by: "Translated by",
    prev_page: "Previous page",
    next_page: "Next page",
    sort_by_latest: "Latest",
    sort_by_oldest: "Oldest",
    no_posts: "No posts. Try changing the filter or picking another date.",
    go_to_date: "Go to date",
    choose_month: "Choose month",
    choose_day: "Choose day",
    view_source: "Original post",
    disclaimer: "This archive is an unofficial fan site and is not affiliated with Project Ikizu Live!.\nAll rights belong to their respective owners (©プロジェクトイキヅライブ！).",
    weekdays: ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
};

impl Language {
    pub const ALL: [Self; 2] = [Self::Ko, Self::En];

    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ko => "ko",
            Self::En => "en",
        }
    }

    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    #[must_use]
    pub fn strings(&self) -> &'static Strings {
        match self {
            Self::Ko => &KO,
            Self::En => &EN,
        }
    }

    /// Full date for day headers, e.g. `2024년 3월 1일 금요일`.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self {
            Self::Ko => format!(
                "{}년 {}월 {}일 {}요일",
                date.year(),
                date.month(),
                date.day(),
                KO.weekdays[date.weekday().num_days_from_sunday() as usize]
            ),
            Self::En => date.format("%A, %B %-d, %Y").to_string(),
        }
    }

    /// Short local time of a post, e.g. `오후 3:05`.
    #[must_use]
    pub fn format_time<Tz>(&self, time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Self::Ko => {
                let (pm, hour) = time.hour12();
                format!(
                    "{} {}:{:02}",
                    if pm { "오후" } else { "오전" },
                    hour,
                    time.minute()
                )
            }
            Self::En => time.format("%-I:%M %p").to_string(),
        }
    }

    /// Calendar heading for a month, e.g. `March 2024`.
    #[must_use]
    pub fn format_month_title(&self, month: NaiveDate) -> String {
        match self {
            Self::Ko => format!("{}년 {}월", month.year(), month.month()),
            Self::En => month.format("%B %Y").to_string(),
        }
    }

    /// Short month label (1-12) for the month grid.
    #[must_use]
    pub fn month_label(&self, month: u32) -> String {
        match self {
            Self::Ko => format!("{month}월"),
            Self::En => NaiveDate::from_ymd_opt(2000, month, 1)
                .map(|first| first.format("%b").to_string())
                .unwrap_or_default(),
        }
    }
}
