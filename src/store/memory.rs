use std::collections::HashMap;

use async_trait::async_trait;

use super::{Account, Post, PostRepository, StoreError, TranslatedPost};

/// Repository holding a fixed snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    accounts: Vec<Account>,
    posts: HashMap<String, Vec<Post>>,
    translations: HashMap<(String, String), TranslatedPost>,
}

impl MemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts.push(account);
        self
    }

    /// Add a post. It is listed under the account named by `post.account_id`.
    #[must_use]
    pub fn with_post(mut self, post: Post) -> Self {
        self.posts
            .entry(post.account_id.clone())
            .or_default()
            .push(post);
        self
    }

    #[must_use]
    pub fn with_translation(mut self, lang: &str, translation: TranslatedPost) -> Self {
        self.translations
            .insert((translation.id.clone(), lang.to_string()), translation);
        self
    }
}

#[async_trait]
impl PostRepository for MemoryRepository {
    async fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.clone())
    }

    async fn list_posts(&self, account: &Account) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.get(&account.id).cloned().unwrap_or_default())
    }

    async fn get_translation(
        &self,
        _account: &Account,
        post_id: &str,
        lang: &str,
    ) -> Result<Option<TranslatedPost>, StoreError> {
        Ok(self
            .translations
            .get(&(post_id.to_string(), lang.to_string()))
            .cloned())
    }
}
