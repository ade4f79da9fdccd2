use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An archived account as listed in `accounts.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    /// Display name keyed by language code.
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    /// Profile on the source platform.
    #[serde(rename = "x")]
    pub profile: Profile,
    /// Whether the account is part of the default filter selection.
    #[serde(default = "default_true")]
    pub default_selected: bool,
}

fn default_true() -> bool {
    true
}

impl Account {
    /// Create an account whose id and screen name are the same.
    #[must_use]
    pub fn new(screen_name: &str) -> Self {
        Self {
            id: screen_name.to_string(),
            name: BTreeMap::new(),
            profile: Profile {
                screen_name: screen_name.to_string(),
                name: None,
                profile_image_url_https: None,
            },
            default_selected: true,
        }
    }

    /// Name to show for this account in the given language.
    ///
    /// Falls back to the profile name and finally the screen name.
    #[must_use]
    pub fn display_name(&self, lang: &str) -> &str {
        self.name
            .get(lang)
            .or_else(|| self.profile.name.as_ref())
            .map_or(self.profile.screen_name.as_str(), String::as_str)
    }

    /// Last word of the display name, used for compact filter labels.
    #[must_use]
    pub fn short_name(&self, lang: &str) -> &str {
        let name = self.display_name(lang);
        name.rsplit(' ').next().unwrap_or(name)
    }

    #[must_use]
    pub fn screen_name(&self) -> &str {
        &self.profile.screen_name
    }
}

/// Profile data captured from the source platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub screen_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub profile_image_url_https: Option<String>,
}

/// A single archived post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    /// Creation instant exactly as stored. Parsed during partitioning so that
    /// malformed values can be reported instead of silently bucketed.
    pub created_at: String,
    /// Original, untranslated text.
    pub text: String,
    #[serde(default)]
    pub entities: Entities,
    /// Id of the [`Account`] this post belongs to.
    pub account_id: String,
}

/// Link and media references recorded against a post's original text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Entities {
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub media: Vec<MediaEntity>,
}

impl Entities {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty() && self.media.is_empty()
    }
}

/// A hyperlink embedded in the original text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlEntity {
    /// Substring as it appears in the original text (usually a short link).
    #[serde(rename = "url")]
    pub original: String,
    /// Text to show in place of the substring.
    #[serde(rename = "display_url", default)]
    pub display: String,
    /// Destination of the link.
    #[serde(rename = "expanded_url", default)]
    pub target: String,
}

/// An image or video attached to the post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaEntity {
    #[serde(rename = "url")]
    pub original: String,
    #[serde(rename = "display_url", default)]
    pub display: String,
    #[serde(rename = "expanded_url", default)]
    pub target: String,
    /// Direct URL of the image.
    #[serde(rename = "media_url_https", default)]
    pub media_url: String,
}

/// A machine translation of a post into one language.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslatedPost {
    pub id: String,
    pub translated_text: String,
    /// Name of the model or service that produced the translation.
    #[serde(default)]
    pub translator: Option<String>,
}
