//! Generic paginated entity store.
//!
//! # Design
//! - One implementation backs quotes and movies; the entity type supplies
//!   its collection path and form encodings through [`Resource`].
//! - The list only grows by appending whole pages, prepending confirmed
//!   creations, or replacing entries with server responses. Nothing is
//!   inserted before the server confirms it.
//! - Page loads are keyed by the active search query. A load that finishes
//!   after the query changed is discarded instead of mixing result sets.
//! - The state lock is never held across a remote call.

use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::{InFlight, PageCursor, PageLoad, SkipReason, page_path};
use crate::error::RemoteResult;
use crate::navigation::Navigator;
use crate::remote::{RemoteClient, RequestBody, fetch_json};

/// Entity kept in a [`ListStore`].
pub trait Resource: Clone + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type.
    type Id: Copy + Eq + Hash + Display + Debug + Send + Sync + 'static;
    /// Payload for creating an entity.
    type Draft: Send + Sync;
    /// Payload for editing an entity.
    type Patch: Send + Sync;

    /// Entity label used in logs.
    const KIND: &'static str;
    /// Collection path, e.g. `/api/quotes`.
    const COLLECTION: &'static str;

    /// Identifier of this entity.
    fn id(&self) -> Self::Id;
    /// Encode a creation payload.
    fn draft_body(draft: &Self::Draft) -> RequestBody;
    /// Encode an edit payload.
    fn patch_body(patch: &Self::Patch) -> RequestBody;

    /// Path of a single entity.
    fn item_path(id: Self::Id) -> String {
        format!("{}/{id}", Self::COLLECTION)
    }
}

/// Key identifying a result set: the active search query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
struct QueryKey {
    search: Option<String>,
}

struct ListState<R: Resource> {
    items: Vec<R>,
    details: HashMap<R::Id, R>,
    cursor: PageCursor,
    query: QueryKey,
    inflight: InFlight<QueryKey>,
}

impl<R: Resource> Default for ListState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            details: HashMap::new(),
            cursor: PageCursor::new(),
            query: QueryKey::default(),
            inflight: InFlight::new(),
        }
    }
}

impl<R: Resource> ListState<R> {
    fn replace(&mut self, entity: &R) {
        let id = entity.id();
        if let Some(slot) = self.items.iter_mut().find(|item| item.id() == id) {
            *slot = entity.clone();
        }
        self.details.insert(id, entity.clone());
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    FirstPage,
    Append,
}

/// Paginated list plus single-entity cache for one resource type.
pub struct ListStore<R: Resource> {
    remote: Arc<dyn RemoteClient>,
    navigator: Arc<dyn Navigator>,
    state: Mutex<ListState<R>>,
}

impl<R: Resource> ListStore<R> {
    /// Empty store.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            remote,
            navigator,
            state: Mutex::new(ListState::default()),
        }
    }

    /// Loaded entities in display order.
    #[must_use]
    pub fn items(&self) -> Vec<R> {
        self.lock().items.clone()
    }

    /// Ids of loaded entities in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<R::Id> {
        self.lock().items.iter().map(Resource::id).collect()
    }

    /// Number of loaded entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Whether nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Cached entity, preferring the single-fetch cache over list entries.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<R> {
        let state = self.lock();
        state
            .details
            .get(&id)
            .or_else(|| state.items.iter().find(|item| item.id() == id))
            .cloned()
    }

    /// Whether the entity was fetched on its own.
    #[must_use]
    pub fn is_cached(&self, id: R::Id) -> bool {
        self.lock().details.contains_key(&id)
    }

    /// Pagination cursor for the active query.
    #[must_use]
    pub fn cursor(&self) -> PageCursor {
        self.lock().cursor
    }

    /// Whether a page load for the active query is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        let state = self.lock();
        state.inflight.is_pending(&state.query)
    }

    /// Active search query.
    #[must_use]
    pub fn query(&self) -> Option<String> {
        self.lock().query.search.clone()
    }

    /// Switch to a new search query, dropping the current result set.
    ///
    /// Loads still running for the old query complete as stale.
    pub fn set_query(&self, search: Option<String>) {
        let search = search
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty());
        let mut state = self.lock();
        if state.query.search == search {
            return;
        }
        debug!(kind = R::KIND, query = ?search, "search query changed");
        state.query = QueryKey { search };
        state.items.clear();
        state.cursor.reset();
        state.inflight.clear();
    }

    /// Load the first page unless a load is running or entities are present.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the cursor does not advance.
    pub async fn load_next_page(&self) -> RemoteResult<PageLoad> {
        self.load_page(LoadMode::FirstPage).await
    }

    /// Append the next page unless a load is running.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the cursor does not advance.
    pub async fn load_more(&self) -> RemoteResult<PageLoad> {
        self.load_page(LoadMode::Append).await
    }

    async fn load_page(&self, mode: LoadMode) -> RemoteResult<PageLoad> {
        let (token, page, path) = {
            let mut state = self.lock();
            if state.inflight.is_pending(&state.query) {
                debug!(kind = R::KIND, "page load already in flight");
                return Ok(PageLoad::Skipped(SkipReason::InFlight));
            }
            if mode == LoadMode::FirstPage && !state.items.is_empty() {
                return Ok(PageLoad::Skipped(SkipReason::AlreadyLoaded));
            }
            let key = state.query.clone();
            let page = state.cursor.next_page();
            let path = page_path(R::COLLECTION, page, key.search.as_deref());
            let Some(token) = state.inflight.begin(key) else {
                return Ok(PageLoad::Skipped(SkipReason::InFlight));
            };
            (token, page, path)
        };

        let result = fetch_json::<Vec<R>>(self.remote.as_ref(), &path).await;
        let mut state = self.lock();
        let current = state.inflight.finish(&token);
        match result {
            Ok(_) if !current => {
                debug!(kind = R::KIND, page, "discarding page for a previous query");
                Ok(PageLoad::Stale)
            }
            Ok(entities) => {
                // Entities already shown, e.g. a prepended creation, keep their slot.
                let before = state.items.len();
                let mut seen: HashSet<R::Id> = state.items.iter().map(Resource::id).collect();
                state
                    .items
                    .extend(entities.into_iter().filter(|entity| seen.insert(entity.id())));
                let count = state.items.len() - before;
                state.cursor.advance();
                debug!(kind = R::KIND, page, count, "page appended");
                Ok(PageLoad::Loaded { page, count })
            }
            Err(err) => {
                warn!(kind = R::KIND, page, error = %err, "page load failed");
                Err(err)
            }
        }
    }

    /// Re-fetch every loaded page and replace the list with the result.
    ///
    /// # Errors
    ///
    /// Propagates the first remote failure; the list is left untouched.
    pub async fn refresh_visible(&self) -> RemoteResult<PageLoad> {
        let (token, pages, search) = {
            let mut state = self.lock();
            let pages = state.cursor.loaded_pages();
            if pages == 0 {
                return Ok(PageLoad::Skipped(SkipReason::NothingLoaded));
            }
            let key = state.query.clone();
            let search = key.search.clone();
            let Some(token) = state.inflight.begin(key) else {
                return Ok(PageLoad::Skipped(SkipReason::InFlight));
            };
            (token, pages, search)
        };

        let fetched = self.fetch_pages(pages, search.as_deref()).await;
        let mut state = self.lock();
        let current = state.inflight.finish(&token);
        match fetched {
            Ok(_) if !current => Ok(PageLoad::Stale),
            Ok(entities) => {
                let count = entities.len();
                state.items = entities;
                debug!(kind = R::KIND, pages, count, "visible pages refreshed");
                Ok(PageLoad::Loaded { page: pages, count })
            }
            Err(err) => {
                warn!(kind = R::KIND, error = %err, "visible page refresh failed");
                Err(err)
            }
        }
    }

    async fn fetch_pages(&self, pages: u32, search: Option<&str>) -> RemoteResult<Vec<R>> {
        let mut entities = Vec::new();
        let mut seen = HashSet::new();
        for page in 1..=pages {
            let path = page_path(R::COLLECTION, page, search);
            let fetched = fetch_json::<Vec<R>>(self.remote.as_ref(), &path).await?;
            entities.extend(fetched.into_iter().filter(|entity| seen.insert(entity.id())));
        }
        Ok(entities)
    }

    /// Fetch one entity for a detail view; on failure navigate back.
    pub async fn get_one(&self, id: R::Id) -> Option<R> {
        match self.refresh(id).await {
            Ok(entity) => Some(entity),
            Err(_) => {
                self.navigator.back().await;
                None
            }
        }
    }

    /// Re-fetch one entity and patch it in place wherever it is cached.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; cached entries are left untouched.
    pub async fn refresh(&self, id: R::Id) -> RemoteResult<R> {
        let path = R::item_path(id);
        match fetch_json::<R>(self.remote.as_ref(), &path).await {
            Ok(entity) => {
                self.lock().replace(&entity);
                Ok(entity)
            }
            Err(err) => {
                warn!(kind = R::KIND, %id, error = %err, "entity fetch failed");
                Err(err)
            }
        }
    }

    /// Create an entity and prepend the server's copy.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; the list is left untouched.
    pub async fn create(&self, draft: &R::Draft) -> RemoteResult<R> {
        let entity: R = self
            .remote
            .post(R::COLLECTION, R::draft_body(draft))
            .await?
            .decode(R::COLLECTION)?;
        self.prepend(entity.clone());
        debug!(kind = R::KIND, id = %entity.id(), "entity created");
        Ok(entity)
    }

    /// Edit an entity and replace cached copies with the server's response.
    ///
    /// # Errors
    ///
    /// Propagates the remote failure; cached entries are left untouched.
    pub async fn edit(&self, id: R::Id, patch: &R::Patch) -> RemoteResult<R> {
        let path = R::item_path(id);
        let entity: R = self
            .remote
            .post(&path, R::patch_body(patch))
            .await?
            .decode(&path)?;
        self.lock().replace(&entity);
        debug!(kind = R::KIND, %id, "entity updated");
        Ok(entity)
    }

    /// Insert a confirmed entity at the head of the list.
    pub fn prepend(&self, entity: R) {
        let mut state = self.lock();
        let id = entity.id();
        state.items.retain(|item| item.id() != id);
        state.items.insert(0, entity);
    }

    fn lock(&self) -> MutexGuard<'_, ListState<R>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

