//! Notes module.
//!
//! In-memory note store with HTTP endpoints, a dashboard widget, and a
//! search handler over note titles and bodies.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::registry::contract::{
    EndpointProvider, Module, ModuleDescriptor, ModuleSearch, WidgetProvider,
};
use crate::registry::widgets::WidgetDescriptor;
use crate::search::cancel::CancelSignal;
use crate::search::error::ModuleSearchError;
use crate::search::types::{ResultItem, SearchPage};

/// One note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a note.
#[derive(Debug, Deserialize)]
pub struct CreateNote {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// In-memory note store.
#[derive(Debug, Default)]
pub struct NoteStore {
    inner: RwLock<NoteStoreInner>,
}

#[derive(Debug, Default)]
struct NoteStoreInner {
    notes: Vec<Note>,
    next_id: u64,
}

impl NoteStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note and return it.
    pub async fn add(&self, title: impl Into<String>, body: impl Into<String>) -> Note {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;

        let note = Note {
            id: inner.next_id,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
        };
        inner.notes.push(note.clone());
        note
    }

    /// All notes, newest first.
    pub async fn list(&self) -> Vec<Note> {
        let inner = self.inner.read().await;
        let mut notes = inner.notes.clone();
        notes.reverse();
        notes
    }

    /// Case-insensitive substring match over title and body.
    pub async fn find(&self, query: &str) -> Vec<Note> {
        let needle = query.to_lowercase();
        let inner = self.inner.read().await;

        inner
            .notes
            .iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || note.body.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }
}

/// The notes feature module.
pub struct NotesModule {
    descriptor: ModuleDescriptor,
    store: Arc<NoteStore>,
}

impl NotesModule {
    /// Module key.
    pub const KEY: &'static str = "notes";

    /// Create the module with an empty store.
    pub fn new() -> Self {
        Self::with_store(Arc::new(NoteStore::new()))
    }

    /// Create the module over an existing store.
    pub fn with_store(store: Arc<NoteStore>) -> Self {
        Self {
            descriptor: ModuleDescriptor::new(
                Self::KEY,
                "Notes",
                "Shared household notes",
                "Hearth",
                "0.1.0",
            ),
            store,
        }
    }

    /// The module's store, for tests and seeding.
    pub fn store(&self) -> Arc<NoteStore> {
        self.store.clone()
    }
}

impl Default for NotesModule {
    fn default() -> Self {
        Self::new()
    }
}

async fn list_notes(State(store): State<Arc<NoteStore>>) -> Json<Vec<Note>> {
    Json(store.list().await)
}

async fn create_note(
    State(store): State<Arc<NoteStore>>,
    Json(request): Json<CreateNote>,
) -> Json<Note> {
    Json(store.add(request.title, request.body).await)
}

impl EndpointProvider for NotesModule {
    fn router(&self) -> Router {
        Router::new()
            .route("/", get(list_notes).post(create_note))
            .with_state(self.store.clone())
    }
}

impl WidgetProvider for NotesModule {
    fn widgets(&self) -> Vec<WidgetDescriptor> {
        vec![WidgetDescriptor::new("notes.recent", "Recent notes").with_sort_order(10)]
    }
}

struct NotesSearch {
    store: Arc<NoteStore>,
}

#[async_trait]
impl ModuleSearch for NotesSearch {
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
            .map(|note| {
                ResultItem::new(note.title, format!("/notes/{}", note.id))
                    .with_description(note.body)
                    .with_icon("note")
                    .with_color("#fbc02d")
            })
            .collect();

        Ok(SearchPage::from_items(items))
    }
}

impl Module for NotesModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    fn endpoints(&self) -> Option<&dyn EndpointProvider> {
        Some(self)
    }

    fn widgets(&self) -> Option<&dyn WidgetProvider> {
        Some(self)
    }

    fn search(&self) -> Option<Arc<dyn ModuleSearch>> {
        Some(Arc::new(NotesSearch {
            store: self.store.clone(),
        }))
    }
}
