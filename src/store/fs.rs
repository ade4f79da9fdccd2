use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{Account, Entities, Post, PostRepository, StoreError, TranslatedPost};

/// Repository over the on-disk archive layout:
///
/// ```text
/// <root>/accounts.json
/// <root>/posts/x/<screen_name>/<post_id>.json
/// <root>/posts/x/<screen_name>/<post_id>.<lang>.json
/// ```
#[derive(Debug, Clone)]
pub struct FsRepository {
    root: PathBuf,
}

impl FsRepository {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn account_dir(&self, account: &Account) -> PathBuf {
        self.root
            .join("posts")
            .join("x")
            .join(account.screen_name())
    }
}

/// Post file as written by the collector.
#[derive(Debug, Deserialize)]
struct StoredPost {
    id: String,
    #[serde(default)]
    created_at: Option<String>,
    raw_data: RawPost,
}

#[derive(Debug, Deserialize)]
struct RawPost {
    legacy: RawLegacy,
}

#[derive(Debug, Deserialize)]
struct RawLegacy {
    full_text: String,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    entities: Entities,
}

/// Translation file as written by the translator.
#[derive(Debug, Deserialize)]
struct StoredTranslation {
    id: String,
    translated_text: String,
    #[serde(default)]
    raw_data: Option<TranslationMeta>,
}

#[derive(Debug, Deserialize)]
struct TranslationMeta {
    #[serde(default)]
    model: Option<String>,
}

impl StoredPost {
    fn into_post(self, account_id: &str) -> Post {
        // Fall back to the platform timestamp; an empty value is reported as
        // malformed during partitioning.
        let created_at = self
            .created_at
            .or(self.raw_data.legacy.created_at)
            .unwrap_or_default();

        Post {
            id: self.id,
            created_at,
            text: self.raw_data.legacy.full_text,
            entities: self.raw_data.legacy.entities,
            account_id: account_id.to_string(),
        }
    }
}

impl From<StoredTranslation> for TranslatedPost {
    fn from(stored: StoredTranslation) -> Self {
        Self {
            id: stored.id,
            translated_text: stored.translated_text,
            translator: stored.raw_data.and_then(|meta| meta.model),
        }
    }
}

/// Whether a file name is an original post (`<id>.json`), as opposed to a
/// translation (`<id>.<lang>.json`) or a downloaded attachment.
fn is_post_file(name: &str) -> bool {
    name.strip_suffix(".json")
        .is_some_and(|stem| !stem.is_empty() && !stem.contains('.'))
}

async fn read_file(path: &Path) -> Result<Option<String>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[async_trait]
impl PostRepository for FsRepository {
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        let path = self.root.join("accounts.json");
        let Some(data) = read_file(&path).await? else {
            warn!(path = %path.display(), "No account list, archive is empty");
            return Ok(Vec::new());
        };
        serde_json::from_str(&data).map_err(|e| StoreError::Json { path, source: e })
    }

    async fn list_posts(&self, account: &Account) -> Result<Vec<Post>, StoreError> {
        let dir = self.account_dir(account);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(account = %account.id, dir = %dir.display(), "No post directory for account");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Io { path: dir, source: e }),
        };

        let mut posts = Vec::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    return Err(StoreError::Io {
                        path: dir.clone(),
                        source: e,
                    })
                }
            };

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !is_post_file(name) {
                continue;
            }

            let path = entry.path();
            let Some(data) = read_file(&path).await? else {
                continue;
            };
            match serde_json::from_str::<StoredPost>(&data) {
                Ok(stored) => posts.push(stored.into_post(&account.id)),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable post file");
                }
            }
        }

        // Directory order is platform dependent; fix it so timestamp ties
        // partition the same way on every request.
        posts.sort_by(|a, b| a.id.cmp(&b.id));

        debug!(account = %account.id, count = posts.len(), "Loaded posts");
        Ok(posts)
    }

    async fn get_translation(
        &self,
        account: &Account,
        post_id: &str,
        lang: &str,
    ) -> Result<Option<TranslatedPost>, StoreError> {
        let path = self.account_dir(account).join(format!("{post_id}.{lang}.json"));
        let Some(data) = read_file(&path).await? else {
            return Ok(None);
        };
        let stored: StoredTranslation =
            serde_json::from_str(&data).map_err(|e| StoreError::Json { path, source: e })?;
        Ok(Some(stored.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_post_file() {
        assert!(is_post_file("1234567890.json"));
        assert!(!is_post_file("1234567890.ko.json"));
        assert!(!is_post_file("1234567890.photo.abc.jpg"));
        assert!(!is_post_file(".json"));
        assert!(!is_post_file("playwright_state.json.enc"));
    }

    #[test]
    fn test_stored_post_prefers_top_level_timestamp() {
        let json = r#"{
            "id": "1",
            "created_at": "2024-03-01T10:00:00Z",
            "raw_data": {"legacy": {"full_text": "hi", "created_at": "Fri Mar 01 10:00:00 +0000 2024"}}
        }"#;
        let post = serde_json::from_str::<StoredPost>(json)
            .unwrap()
            .into_post("acct");
        assert_eq!(post.created_at, "2024-03-01T10:00:00Z");
        assert_eq!(post.account_id, "acct");
        assert!(post.entities.is_empty());
    }

    #[test]
    fn test_stored_post_falls_back_to_legacy_timestamp() {
        let json = r#"{
            "id": "2",
            "raw_data": {"legacy": {"full_text": "hi", "created_at": "Fri Mar 01 10:00:00 +0000 2024"}}
        }"#;
        let post = serde_json::from_str::<StoredPost>(json)
            .unwrap()
            .into_post("acct");
        assert_eq!(post.created_at, "Fri Mar 01 10:00:00 +0000 2024");
    }

    #[test]
    fn test_stored_translation_model_label() {
        let json = r#"{"id": "1", "translated_text": "안녕", "lang": "ko", "raw_data": {"model": "gemini-2.0-flash"}}"#;
        let translated: TranslatedPost = serde_json::from_str::<StoredTranslation>(json)
            .unwrap()
            .into();
        assert_eq!(translated.translator.as_deref(), Some("gemini-2.0-flash"));

        let json = r#"{"id": "1", "translated_text": "안녕"}"#;
        let translated: TranslatedPost = serde_json::from_str::<StoredTranslation>(json)
            .unwrap()
            .into();
        assert!(translated.translator.is_none());
    }
}
