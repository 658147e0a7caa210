//! Bookmarks module.
//!
//! In-memory bookmark store exposed as a shared service and searchable by
//! title, URL, and tag.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::registry::contract::{Module, ModuleDescriptor, ModuleSearch, ServiceProvider};
use crate::registry::services::ServiceCollection;
use crate::search::cancel::CancelSignal;
use crate::search::error::ModuleSearchError;
use crate::search::types::{ResultItem, SearchPage};

/// One bookmark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
}

/// In-memory bookmark store, shared through the service collection.
#[derive(Debug, Default)]
pub struct BookmarkStore {
    inner: RwLock<Vec<Bookmark>>,
}

impl BookmarkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with a few starter bookmarks.
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(vec![
                Bookmark {
                    id: 1,
                    title: "Weekly meal planner".to_string(),
                    url: "https://example.com/meals".to_string(),
                    tags: vec!["kitchen".to_string(), "planning".to_string()],
                },
                Bookmark {
                    id: 2,
                    title: "Local library".to_string(),
                    url: "https://example.com/library".to_string(),
                    tags: vec!["reading".to_string()],
                },
            ]),
        }
    }

    /// Add a bookmark.
    pub async fn add(&self, bookmark: Bookmark) {
        self.inner.write().await.push(bookmark);
    }

    /// All bookmarks in insertion order.
    pub async fn list(&self) -> Vec<Bookmark> {
        self.inner.read().await.clone()
    }

    /// Case-insensitive substring match over title, url, and tags.
    pub async fn find(&self, query: &str) -> Vec<Bookmark> {
        let needle = query.to_lowercase();

        self.inner
            .read()
            .await
            .iter()
            .filter(|bookmark| {
                bookmark.title.to_lowercase().contains(&needle)
                    || bookmark.url.to_lowercase().contains(&needle)
                    || bookmark.tags.iter().any(|t| t.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }
}

/// The bookmarks feature module.
pub struct BookmarksModule {
    descriptor: ModuleDescriptor,
    store: Arc<BookmarkStore>,
}

impl BookmarksModule {
    /// Module key.
    pub const KEY: &'static str = "bookmarks";

    /// Create the module with the seeded store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(BookmarkStore::seeded()))
    }

    /// Create the module over an existing store.
    pub fn with_store(store: Arc<BookmarkStore>) -> Self {
        Self {
            descriptor: ModuleDescriptor::new(
                Self::KEY,
                "Bookmarks",
                "Shared household bookmarks",
                "Hearth",
                "0.1.0",
            ),
            store,
        }
    }

    /// The module's store, for tests and seeding.
    pub fn store(&self) -> Arc<BookmarkStore> {
        self.store.clone()
    }
}

impl Default for BookmarksModule {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceProvider for BookmarksModule {
    fn register_services(&self, services: &mut ServiceCollection) {
        services.insert(self.store.clone());
    }
}

struct BookmarksSearch {
    store: Arc<BookmarkStore>,
}

#[async_trait]
impl ModuleSearch for BookmarksSearch {
    async fn search(
        &self,
        query: &str,
        cancel: CancelSignal,
    ) -> Result<SearchPage, ModuleSearchError> {
        if cancel.is_cancelled() {
            return Err(ModuleSearchError::Cancelled);
        }

        let items = self
            .store
            .find(query)
            .await
            .into_iter()
            .map(|bookmark| {
                ResultItem::new(bookmark.title, bookmark.url)
                    .with_description(bookmark.tags.join(", "))
                    .with_icon("bookmark")
                    .with_color("#1e88e5")
            })
            .collect();

        Ok(SearchPage::from_items(items))
    }
}

impl Module for BookmarksModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn services(&self) -> Option<&dyn ServiceProvider> {
        Some(self)
    }

    fn search(&self) -> Option<Arc<dyn ModuleSearch>> {
        Some(Arc::new(BookmarksSearch {
            store: self.store.clone(),
        }))
    }
}
