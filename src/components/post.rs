//! Post cards and day sections.

use maud::{html, Markup, Render};

use super::links::PageLinks;
use crate::browse::{ArchivePage, DayView, PostView};
use crate::i18n::Language;
use crate::overlay::{Marker, Segment};
use crate::store::Account;

/// Rich text made of literal runs, links and inline media.
#[derive(Debug, Clone, Copy)]
pub struct RichTextBlock<'a> {
    segments: &'a [Segment],
}

impl<'a> RichTextBlock<'a> {
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }
}

impl Render for RichTextBlock<'_> {
    fn render(&self) -> Markup {
        html! {
            div class="post-text" {
                @for segment in self.segments {
                    @match segment {
                        Segment::Literal(text) => { (text) }
                        Segment::Marker(Marker::Link { href, display }) => {
                            a href=(href) target="_blank" rel="noopener noreferrer" { (display) }
                        }
                        Segment::Marker(Marker::Media { href, media_url, display }) => {
                            a class="post-media" href=(href) target="_blank" rel="noopener noreferrer" {
                                img src=(media_url) alt=(display) loading="lazy";
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Avatar image, or the first letter of the name when there is none.
#[derive(Debug, Clone, Copy)]
pub struct Avatar<'a> {
    account: &'a Account,
    language: Language,
}

impl<'a> Avatar<'a> {
    #[must_use]
    pub fn new(account: &'a Account, language: Language) -> Self {
        Self { account, language }
    }
}

impl Render for Avatar<'_> {
    fn render(&self) -> Markup {
        let name = self.account.display_name(self.language.code());
        html! {
            @if let Some(ref url) = self.account.profile.profile_image_url_https {
                img class="avatar" src=(url) alt=(name) title=(name) loading="lazy";
            } @else {
                span class="avatar placeholder" title=(name) {
                    (name.chars().next().unwrap_or('?'))
                }
            }
        }
    }
}

/// A single post.
#[derive(Debug, Clone, Copy)]
pub struct PostCard<'a> {
    post: &'a PostView,
    account: Option<&'a Account>,
    language: Language,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub fn new(post: &'a PostView, account: Option<&'a Account>, language: Language) -> Self {
        Self {
            post,
            account,
            language,
        }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let strings = self.language.strings();
        let lang = self.language.code();
        let post = self.post;
        html! {
            article class="post-card" id=(format!("post-{}", post.id)) {
                header class="post-header" {
                    @if let Some(account) = self.account {
                        (Avatar::new(account, self.language))
                        span class="post-author" {
                            strong { (account.display_name(lang)) }
                            " "
                            span class="screen-name" { "@" (account.screen_name()) }
                        }
                    }
                    a class="post-time" href=(format!("#post-{}", post.id)) {
                        time datetime=(post.posted_at.to_rfc3339()) {
                            (self.language.format_time(&post.posted_at))
                        }
                    }
                }
                (RichTextBlock::new(&post.text))
                @if let Some(ref original) = post.original {
                    details class="post-original" {
                        summary {
                            (strings.show_original)
                            @if let Some(ref translator) = post.translator {
                                " \u{00b7} " (strings.translated_by) ": " (translator)
                            }
                        }
                        (RichTextBlock::new(original))
                    }
                }
                footer class="post-footer" {
                    a href=(post.source_url) target="_blank" rel="noopener noreferrer" {
                        (strings.view_source) " \u{2197}"
                    }
                }
            }
        }
    }
}

/// Posts of one day under a localized date heading.
#[derive(Debug, Clone, Copy)]
pub struct DaySection<'a> {
    day: &'a DayView,
    page: &'a ArchivePage,
    links: &'a PageLinks<'a>,
}

impl<'a> DaySection<'a> {
    #[must_use]
    pub fn new(day: &'a DayView, page: &'a ArchivePage, links: &'a PageLinks<'a>) -> Self {
        Self { day, page, links }
    }
}

impl Render for DaySection<'_> {
    fn render(&self) -> Markup {
        let language = self.page.language;
        html! {
            section class="day" id=(self.day.date.to_string()) {
                h2 class="day-header" {
                    a href=(self.links.page(Some(self.day.date))) {
                        time datetime=(self.day.date.to_string()) { (language.format_date(self.day.date)) }
                    }
                    span class="day-accounts" {
                        @for id in &self.day.account_ids {
                            @if let Some(account) = self.page.account(id) {
                                (Avatar::new(account, language))
                            }
                        }
                    }
                }
                @for post in &self.day.posts {
                    (PostCard::new(post, self.page.account(&post.account_id), language))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};

    use super::*;

    fn view(original: Option<Vec<Segment>>, translator: Option<&str>) -> PostView {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        PostView {
            id: "42".to_string(),
            account_id: "alice".to_string(),
            posted_at: tokyo.with_ymd_and_hms(2024, 3, 1, 15, 5, 0).unwrap(),
            text: vec![
                Segment::Literal("안녕 ".to_string()),
                Segment::Marker(Marker::Link {
                    href: "https://example.com".to_string(),
                    display: "example.com".to_string(),
                }),
            ],
            original,
            translator: translator.map(str::to_string),
            source_url: "https://x.com/alice/status/42".to_string(),
        }
    }

    #[test]
    fn test_rich_text_escapes_literals() {
        let segments = vec![Segment::Literal("<b>&".to_string())];
        let html = RichTextBlock::new(&segments).render().into_string();
        assert_eq!(html, r#"<div class="post-text">&lt;b&gt;&amp;</div>"#);
    }

    #[test]
    fn test_rich_text_media() {
        let segments = vec![Segment::Marker(Marker::Media {
            href: "https://x.com/a/status/1/photo/1".to_string(),
            media_url: "https://pbs.twimg.com/media/a.jpg".to_string(),
            display: "pic.x.com/a".to_string(),
        })];
        let html = RichTextBlock::new(&segments).render().into_string();
        assert!(html.contains(r#"<img src="https://pbs.twimg.com/media/a.jpg" alt="pic.x.com/a" loading="lazy">"#));
    }

    #[test]
    fn test_post_card_translated() {
        let account = Account::new("alice");
        let post = view(
            Some(vec![Segment::Literal("こんにちは".to_string())]),
            Some("gemini"),
        );
        let html = PostCard::new(&post, Some(&account), Language::Ko)
            .render()
            .into_string();

        assert!(html.contains("오후 3:05"));
        assert!(html.contains(r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">example.com</a>"#));
        assert!(html.contains("원문 보기"));
        assert!(html.contains("번역: gemini"));
        assert!(html.contains("こんにちは"));
        assert!(html.contains(r#"href="https://x.com/alice/status/42""#));
        assert!(html.contains("@alice"));
    }

    #[test]
    fn test_post_card_untranslated_has_no_original() {
        let post = view(None, None);
        let html = PostCard::new(&post, None, Language::En).render().into_string();
        assert!(!html.contains("post-original"));
        assert!(html.contains("3:05 PM"));
    }
}
