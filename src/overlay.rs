//! Re-inserting link and media references into possibly translated text.
//!
//! Entities are recorded against a post's original text. Translation moves
//! everything around, but short links survive it verbatim, so each entity is
//! located again by searching the displayed text for its original substring.
//! That holds only while the translator leaves the substring untouched; when
//! it does not, the link silently stays plain text. Two entities with the same
//! substring cannot be told apart either: the first one claims every
//! occurrence.

use serde::Serialize;
use tracing::debug;

use crate::store::{Entities, MediaEntity, UrlEntity};

/// An opaque element replacing part of the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marker {
    Link {
        href: String,
        display: String,
    },
    Media {
        href: String,
        media_url: String,
        display: String,
    },
}

impl Marker {
    #[must_use]
    pub fn link(entity: &UrlEntity) -> Self {
        Self::Link {
            href: entity.target.clone(),
            display: non_empty_or(&entity.display, &entity.original),
        }
    }

    #[must_use]
    pub fn media(entity: &MediaEntity) -> Self {
        Self::Media {
            href: entity.target.clone(),
            media_url: entity.media_url.clone(),
            display: non_empty_or(&entity.display, &entity.original),
        }
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    let chosen = if value.is_empty() { fallback } else { value };
    chosen.to_string()
}

/// One element of rendered text, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Segment {
    Literal(String),
    Marker(Marker),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    /// `source_len` is the number of bytes of the source text the marker
    /// stands for; appended markers cover none.
    Marker { marker: Marker, source_len: usize },
}

/// Text split into literal runs and markers.
///
/// Positions passed to [`RichText::replace_range`] are byte offsets into the
/// text the value was created from, regardless of earlier replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    nodes: Vec<Node>,
}

impl RichText {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            nodes: vec![Node::Text(text.to_string())],
        }
    }

    /// Replace source bytes `start..end` with `marker`.
    ///
    /// The range must lie inside a single literal run; otherwise the text is
    /// returned unchanged. The flag reports whether the replacement happened.
    #[must_use]
    pub fn replace_range(self, start: usize, end: usize, marker: Marker) -> (Self, bool) {
        let mut pending = Some(marker);
        let mut nodes = Vec::with_capacity(self.nodes.len() + 2);
        let mut node_start = 0;

        for node in self.nodes {
            match node {
                Node::Marker { source_len, .. } => {
                    node_start += source_len;
                    nodes.push(node);
                }
                Node::Text(text) => {
                    let node_end = node_start + text.len();
                    let inside = node_start <= start && end <= node_end;
                    match pending.take() {
                        Some(marker) if inside && start < end => {
                            let head = &text[..start - node_start];
                            let tail = &text[end - node_start..];
                            if !head.is_empty() {
                                nodes.push(Node::Text(head.to_string()));
                            }
                            nodes.push(Node::Marker {
                                marker,
                                source_len: end - start,
                            });
                            if !tail.is_empty() {
                                nodes.push(Node::Text(tail.to_string()));
                            }
                        }
                        other => {
                            pending = other;
                            nodes.push(Node::Text(text));
                        }
                    }
                    node_start = node_end;
                }
            }
        }

        let replaced = pending.is_none();
        (Self { nodes }, replaced)
    }

    /// Add a marker after everything else.
    #[must_use]
    pub fn append(mut self, marker: Marker) -> Self {
        self.nodes.push(Node::Marker {
            marker,
            source_len: 0,
        });
        self
    }

    /// The flat segment sequence, without empty literal runs.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.nodes
            .into_iter()
            .filter_map(|node| match node {
                Node::Text(text) if text.is_empty() => None,
                Node::Text(text) => Some(Segment::Literal(text)),
                Node::Marker { marker, .. } => Some(Segment::Marker(marker)),
            })
            .collect()
    }
}

/// Render `displayed` (a translation, or the original itself) with the
/// entities recorded against `original`.
///
/// URL entities are applied first, then media, each in list order. Every
/// non-overlapping occurrence of an entity's substring becomes a marker,
/// scanning left to right. A media entity whose substring does not occur in
/// `displayed` at all is appended once at the end so attachments stay visible;
/// a URL entity with no occurrence is dropped.
#[must_use]
pub fn overlay(displayed: &str, original: &str, entities: &Entities) -> Vec<Segment> {
    let mut text = RichText::new(displayed);

    for url in &entities.urls {
        text = substitute(text, displayed, original, &url.original, &Marker::link(url)).0;
    }

    for media in &entities.media {
        let marker = Marker::media(media);
        let (next, found) = substitute(text, displayed, original, &media.original, &marker);
        text = if found == 0 {
            next.append(marker)
        } else {
            next
        };
    }

    text.into_segments()
}

/// Replace every occurrence of `needle` in `displayed`. Returns the number of
/// occurrences found, including those already covered by a marker.
fn substitute(
    mut text: RichText,
    displayed: &str,
    original: &str,
    needle: &str,
    marker: &Marker,
) -> (RichText, usize) {
    if needle.is_empty() {
        return (text, 0);
    }

    let mut found = 0;
    for (index, _) in displayed.match_indices(needle) {
        found += 1;
        text = text.replace_range(index, index + needle.len(), marker.clone()).0;
    }

    let expected = original.matches(needle).count();
    if found < expected {
        debug!(
            needle = %needle,
            expected,
            found,
            "Entity substring missing from displayed text"
        );
    }

    (text, found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(original: &str, display: &str, target: &str) -> UrlEntity {
        UrlEntity {
            original: original.to_string(),
            display: display.to_string(),
            target: target.to_string(),
        }
    }

    fn media(original: &str) -> MediaEntity {
        MediaEntity {
            original: original.to_string(),
            display: "pic.x.com/abc".to_string(),
            target: "https://x.com/a/status/1/photo/1".to_string(),
            media_url: "https://pbs.twimg.com/media/abc.jpg".to_string(),
        }
    }

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.to_string())
    }

    fn link(display: &str, href: &str) -> Segment {
        Segment::Marker(Marker::Link {
            href: href.to_string(),
            display: display.to_string(),
        })
    }

    #[test]
    fn test_plain_text_is_one_literal() {
        let segments = overlay("hello", "hello", &Entities::default());
        assert_eq!(segments, vec![lit("hello")]);
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(overlay("", "", &Entities::default()).is_empty());
    }

    #[test]
    fn test_non_overlapping_replacement() {
        let entities = Entities {
            urls: vec![url("aa", "AA", "https://a.example")],
            media: Vec::new(),
        };
        let segments = overlay("aaa", "aaa", &entities);
        assert_eq!(segments, vec![link("AA", "https://a.example"), lit("a")]);
    }

    #[test]
    fn test_media_always_visible() {
        let entities = Entities {
            urls: Vec::new(),
            media: vec![media("http://img")],
        };
        let segments = overlay("hello", "hello", &entities);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], lit("hello"));
        assert!(matches!(
            segments.last(),
            Some(Segment::Marker(Marker::Media { .. }))
        ));
    }

    #[test]
    fn test_media_replaced_in_place_is_not_appended() {
        let entities = Entities {
            urls: Vec::new(),
            media: vec![media("https://t.co/img")],
        };
        let segments = overlay("look https://t.co/img !", "look https://t.co/img !", &entities);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], lit("look "));
        assert!(matches!(segments[1], Segment::Marker(Marker::Media { .. })));
        assert_eq!(segments[2], lit(" !"));
    }

    #[test]
    fn test_translated_text_keeps_links() {
        let entities = Entities {
            urls: vec![url("https://t.co/x1", "example.com/live", "https://example.com/live")],
            media: Vec::new(),
        };
        let original = "配信はこちら https://t.co/x1 よろしく";
        let translated = "방송은 여기 https://t.co/x1 잘 부탁해";
        let segments = overlay(translated, original, &entities);
        assert_eq!(
            segments,
            vec![
                lit("방송은 여기 "),
                link("example.com/live", "https://example.com/live"),
                lit(" 잘 부탁해"),
            ]
        );
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let entities = Entities {
            urls: vec![url("t.co/1", "one", "https://one")],
            media: Vec::new(),
        };
        let segments = overlay("t.co/1 and t.co/1", "t.co/1 and t.co/1", &entities);
        assert_eq!(
            segments,
            vec![link("one", "https://one"), lit(" and "), link("one", "https://one")]
        );
    }

    #[test]
    fn test_markers_are_opaque() {
        // The second entity only occurs inside the first one's replacement.
        let entities = Entities {
            urls: vec![
                url("https://t.co/abc", "first", "https://first"),
                url("t.co", "second", "https://second"),
            ],
            media: Vec::new(),
        };
        let segments = overlay("go https://t.co/abc", "go https://t.co/abc", &entities);
        assert_eq!(segments, vec![lit("go "), link("first", "https://first")]);
    }

    #[test]
    fn test_media_inside_link_is_not_appended() {
        // The substring is present, only already claimed by the link.
        let entities = Entities {
            urls: vec![url("https://t.co/abc", "first", "https://first")],
            media: vec![media("https://t.co/abc")],
        };
        let segments = overlay("x https://t.co/abc", "x https://t.co/abc", &entities);
        assert_eq!(segments, vec![lit("x "), link("first", "https://first")]);
    }

    #[test]
    fn test_missing_url_is_noop() {
        let entities = Entities {
            urls: vec![url("https://t.co/gone", "gone", "https://gone")],
            media: Vec::new(),
        };
        let segments = overlay("번역된 문장", "元の文 https://t.co/gone", &entities);
        assert_eq!(segments, vec![lit("번역된 문장")]);
    }

    #[test]
    fn test_empty_substring_is_ignored() {
        let entities = Entities {
            urls: vec![url("", "nothing", "https://nothing")],
            media: Vec::new(),
        };
        assert_eq!(overlay("abc", "abc", &entities), vec![lit("abc")]);
    }

    #[test]
    fn test_missing_display_falls_back_to_substring() {
        let entities = Entities {
            urls: vec![url("https://t.co/z", "", "https://z")],
            media: Vec::new(),
        };
        assert_eq!(
            overlay("https://t.co/z", "https://t.co/z", &entities),
            vec![link("https://t.co/z", "https://z")]
        );
    }

    #[test]
    fn test_overlay_is_idempotent() {
        let entities = Entities {
            urls: vec![url("https://t.co/1", "one", "https://one")],
            media: vec![media("https://t.co/2"), media("https://t.co/missing")],
        };
        let text = "a https://t.co/1 b https://t.co/2 c";
        assert_eq!(overlay(text, text, &entities), overlay(text, text, &entities));
    }

    #[test]
    fn test_replace_range_across_segments_has_no_effect() {
        let marker = Marker::Link {
            href: "h".to_string(),
            display: "d".to_string(),
        };
        let (text, ok) = RichText::new("abcdef").replace_range(2, 4, marker.clone());
        assert!(ok);
        // 1..3 straddles the literal "ab" and the marker.
        let (text, ok) = text.replace_range(1, 3, marker.clone());
        assert!(!ok);
        // Offsets after the marker still address the source text.
        let (text, ok) = text.replace_range(4, 5, marker);
        assert!(ok);
        assert_eq!(
            text.into_segments(),
            vec![
                lit("ab"),
                link("d", "h"),
                link("d", "h"),
                lit("f"),
            ]
        );
    }
}
