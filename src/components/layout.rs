//! Base layout components for the web UI.
//!
//! This module provides the page skeleton: head, site header with the
//! language switcher, and the disclaimer footer.

use maud::{html, Markup, DOCTYPE};

use crate::i18n::Language;

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new(Language::Ko).render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    language: Language,
    title: Option<&'a str>,
    /// Link target for each language in the switcher.
    language_links: Vec<(Language, String)>,
}

impl<'a> BaseLayout<'a> {
    /// Create a layout in `language`. The switcher links to each language's
    /// first page until [`BaseLayout::with_language_links`] is used.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            title: None,
            language_links: Language::ALL
                .iter()
                .map(|lang| (*lang, format!("/{}", lang.code())))
                .collect(),
        }
    }

    /// Page title shown before the site name.
    #[must_use]
    pub fn with_title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn with_language_links(mut self, links: Vec<(Language, String)>) -> Self {
        self.language_links = links;
        self
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        let strings = self.language.strings();
        html! {
            (DOCTYPE)
            html lang=(self.language.code()) {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    meta name="color-scheme" content="light dark";
                    title {
                        @if let Some(title) = self.title {
                            (title) " - "
                        }
                        (strings.title)
                    }
                    link rel="stylesheet" href="/static/css/style.css";
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (self.render_footer())
                }
            }
        }
    }

    fn render_header(&self) -> Markup {
        let strings = self.language.strings();
        html! {
            header class="container site-header" {
                nav {
                    a href=(format!("/{}", self.language.code())) class="site-logo" {
                        strong { (strings.title) }
                    }
                    ul class="language-switch" {
                        @for (lang, href) in &self.language_links {
                            li {
                                @if *lang == self.language {
                                    span class="current" { (lang.code().to_uppercase()) }
                                } @else {
                                    a href=(href) hreflang=(lang.code()) { (lang.code().to_uppercase()) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn render_footer(&self) -> Markup {
        html! {
            footer class="container disclaimer" {
                @for line in self.language.strings().disclaimer.lines() {
                    p { small { (line) } }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sets_language() {
        let html = BaseLayout::new(Language::En)
            .render(html! { p { "Body" } })
            .into_string();
        assert!(html.contains(r#"<html lang="en">"#));
        assert!(html.contains("<title>Ikizu Live! Archive</title>"));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn test_layout_title_and_switcher() {
        let html = BaseLayout::new(Language::Ko)
            .with_title("2024-03-01")
            .with_language_links(vec![
                (Language::Ko, "/ko/until/2024-03-01".to_string()),
                (Language::En, "/en/until/2024-03-01".to_string()),
            ])
            .render(html! {})
            .into_string();
        assert!(html.contains("2024-03-01 - "));
        assert!(html.contains(r#"href="/en/until/2024-03-01""#));
        assert!(html.contains(r#"<span class="current">KO</span>"#));
    }

    #[test]
    fn test_layout_footer_disclaimer() {
        let html = BaseLayout::new(Language::Ko).render(html! {}).into_string();
        assert!(html.contains("비공식 팬사이트"));
    }
}
