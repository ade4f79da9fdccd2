//! Archive storage.
//!
//! The rest of the crate only sees the [`PostRepository`] trait. Two
//! implementations are provided: [`FsRepository`] reads the JSON layout written
//! by the collection and translation jobs, and [`MemoryRepository`] holds
//! everything in memory.

mod fs;
mod memory;
mod models;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsRepository;
pub use memory::MemoryRepository;
pub use models::{Account, Entities, MediaEntity, Post, Profile, TranslatedPost, UrlEntity};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read access to archived accounts, posts and translations.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All archived accounts, in configuration order.
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError>;

    /// Every post of one account, in no particular order.
    async fn list_posts(&self, account: &Account) -> Result<Vec<Post>, StoreError>;

    /// The translation of a post into `lang`, if one exists.
    ///
    /// A missing translation is `Ok(None)`, not an error.
    async fn get_translation(
        &self,
        account: &Account,
        post_id: &str,
        lang: &str,
    ) -> Result<Option<TranslatedPost>, StoreError>;
}
