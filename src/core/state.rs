//! # Application State
//!
//! The Pokédex store: the fetched list, the favorites mirror and a loading
//! flag. It knows nothing about terminals. Presentation state lives in `tui`.
//!
//! ```text
//! App
//! ├── store: Store
//! │   ├── gateway: Arc<dyn PokemonGateway>   // injected data source
//! │   ├── state: PokedexState
//! │   │   ├── list: Vec<PokemonSummary>      // pagination order, grows only
//! │   │   ├── favorites: Vec<PokemonSummary> // mirror of flagged entries
//! │   │   └── is_loading: bool               // a page load is running
//! │   └── pending_page: Option<PageRequest>  // single-flight guard
//! ├── status_message: String                 // title bar text
//! └── error: Option<String>                  // initial load failure
//! ```
//!
//! Every async action is built from synchronous halves (`begin_*`,
//! `finish_page`, `attach_details`) so the TUI reducer can run the network
//! call on a background task and still mutate state in one place.
//!
//! Invariant kept by every mutation: the ids flagged `favorite` in `list` are
//! exactly the ids in `favorites`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::gateway::{GatewayError, PokemonDetails, PokemonGateway, PokemonSummary};

/// Which page load is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// First page; replaces the list.
    Initial,
    /// Next page at `offset`; appends to the list.
    More { offset: usize },
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PokedexState {
    pub list: Vec<PokemonSummary>,
    pub favorites: Vec<PokemonSummary>,
    pub is_loading: bool,
}

pub struct Store {
    gateway: Arc<dyn PokemonGateway>,
    state: PokedexState,
    pending_page: Option<PageRequest>,
}

impl Store {
    pub fn new(gateway: Arc<dyn PokemonGateway>) -> Self {
        Self {
            gateway,
            state: PokedexState::default(),
            pending_page: None,
        }
    }

    pub fn gateway(&self) -> Arc<dyn PokemonGateway> {
        self.gateway.clone()
    }

    pub fn state(&self) -> &PokedexState {
        &self.state
    }

    pub fn list(&self) -> &[PokemonSummary] {
        &self.state.list
    }

    pub fn favorites(&self) -> &[PokemonSummary] {
        &self.state.favorites
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn pending_page(&self) -> Option<PageRequest> {
        self.pending_page
    }

    pub fn get(&self, id: u32) -> Option<&PokemonSummary> {
        self.state.list.iter().find(|p| p.id == id)
    }

    pub fn favorite_ids(&self) -> HashSet<u32> {
        self.state.favorites.iter().map(|f| f.id).collect()
    }

    // ------------------------------------------------------------------
    // Synchronous halves
    // ------------------------------------------------------------------

    /// Starts the initial load. Returns `false` when the list is already
    /// populated or another page is in flight.
    pub fn begin_initial_load(&mut self) -> bool {
        if !self.state.list.is_empty() {
            debug!("Initial list already loaded ({} entries)", self.state.list.len());
            return false;
        }
        if let Some(pending) = self.pending_page {
            debug!("Initial load skipped, {:?} in flight", pending);
            return false;
        }
        self.state.is_loading = true;
        self.pending_page = Some(PageRequest::Initial);
        true
    }

    /// Starts loading the next page and returns its offset, or `None` while
    /// another page is in flight.
    pub fn begin_load_more(&mut self) -> Option<usize> {
        if let Some(pending) = self.pending_page {
            debug!("Load more skipped, {:?} in flight", pending);
            return None;
        }
        let offset = self.state.list.len();
        self.state.is_loading = true;
        self.pending_page = Some(PageRequest::More { offset });
        Some(offset)
    }

    /// Applies a page result: clears the loading flag, marks favorites by id
    /// and replaces or appends. Returns the number of entries added.
    pub fn finish_page(
        &mut self,
        request: PageRequest,
        result: Result<Vec<PokemonSummary>, GatewayError>,
    ) -> Result<usize, GatewayError> {
        self.state.is_loading = false;
        self.pending_page = None;

        let page = result.inspect_err(|e| {
            warn!("Error applying {:?} page: {}", request, e);
        })?;
        let page = self.mark_favorites(page);

        match request {
            PageRequest::Initial => {
                let count = page.len();
                self.state.list = page;
                info!("Initial list loaded: {} entries", count);
                Ok(count)
            }
            PageRequest::More { offset } => {
                let known: HashSet<u32> = self.state.list.iter().map(|p| p.id).collect();
                let before = self.state.list.len();
                for summary in page {
                    if known.contains(&summary.id) {
                        warn!("Dropping duplicate pokemon id {} from page at {}", summary.id, offset);
                        continue;
                    }
                    self.state.list.push(summary);
                }
                let added = self.state.list.len() - before;
                info!("Page at offset {} appended {} entries", offset, added);
                Ok(added)
            }
        }
    }

    /// Attaches details to the list entry whose name matches
    /// case-insensitively, and to its favorites copy. Returns `false` when no
    /// entry matches.
    pub fn attach_details(&mut self, name: &str, details: PokemonDetails) -> bool {
        let wanted = name.to_lowercase();
        let Some(entry) = self
            .state
            .list
            .iter_mut()
            .find(|p| p.name.to_lowercase() == wanted)
        else {
            debug!("No list entry named {} to attach details to", name);
            return false;
        };

        let id = entry.id;
        if let Some(favorite) = self.state.favorites.iter_mut().find(|f| f.id == id) {
            favorite.details = Some(details.clone());
        }
        entry.details = Some(details);
        true
    }

    /// Flips the favorite flag of the entry with `id` and mirrors the change
    /// into `favorites`. Returns `None` if the id is not in the list.
    pub fn toggle_favorite(&mut self, id: u32) -> Option<&PokemonSummary> {
        let index = self.state.list.iter().position(|p| p.id == id)?;

        let entry = &mut self.state.list[index];
        entry.favorite = !entry.favorite;

        if entry.favorite {
            if !self.state.favorites.iter().any(|f| f.id == id) {
                self.state.favorites.push(entry.clone());
            }
        } else {
            self.state.favorites.retain(|f| f.id != id);
        }

        debug!(
            "Toggled favorite for {} (id={}): {}",
            self.state.list[index].name, id, self.state.list[index].favorite
        );
        Some(&self.state.list[index])
    }

    fn mark_favorites(&self, page: Vec<PokemonSummary>) -> Vec<PokemonSummary> {
        let favorite_ids = self.favorite_ids();
        page.into_iter()
            .map(|summary| PokemonSummary {
                favorite: favorite_ids.contains(&summary.id),
                ..summary
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Async actions
    // ------------------------------------------------------------------

    /// Fetches the first page unless the list is already populated.
    pub async fn fetch_initial_list(&mut self) -> Result<&[PokemonSummary], GatewayError> {
        if !self.begin_initial_load() {
            return Ok(&self.state.list);
        }
        let result = self.gateway.fetch_list().await;
        self.finish_page(PageRequest::Initial, result)?;
        Ok(&self.state.list)
    }

    /// Fetches details for `name` and attaches them to the matching entry.
    /// Does not touch the loading flag.
    pub async fn fetch_details_for(&mut self, name: &str) -> Result<PokemonDetails, GatewayError> {
        let details = self.gateway.fetch_details(name).await?;
        self.attach_details(name, details.clone());
        Ok(details)
    }

    /// Appends the page starting at the current list length.
    pub async fn load_more(&mut self) -> Result<&[PokemonSummary], GatewayError> {
        let Some(offset) = self.begin_load_more() else {
            return Ok(&self.state.list);
        };
        let result = self.gateway.load_more(offset).await;
        self.finish_page(PageRequest::More { offset }, result)?;
        Ok(&self.state.list)
    }
}

/// Top-level application state: the store plus user-facing status.
pub struct App {
    pub store: Store,
    pub status_message: String,
    pub error: Option<String>,
    /// Lower-cased names with a details request in flight.
    pub details_in_flight: HashSet<String>,
    /// Last details failure per lower-cased name, cleared on retry.
    pub details_errors: HashMap<String, String>,
}

impl App {
    pub fn new(gateway: Arc<dyn PokemonGateway>) -> Self {
        Self {
            store: Store::new(gateway),
            status_message: String::from("Welcome to the Pokédex!"),
            error: None,
            details_in_flight: HashSet::new(),
            details_errors: HashMap::new(),
        }
    }

    /// Why the details for `name` could not be loaded, if the last try failed.
    pub fn details_error(&self, name: &str) -> Option<&str> {
        self.details_errors.get(&name.to_lowercase()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubGateway, details, summaries, test_app};

    fn flagged_ids(store: &Store) -> HashSet<u32> {
        store.list().iter().filter(|p| p.favorite).map(|p| p.id).collect()
    }

    fn loaded_store(names: &[&str]) -> Store {
        let mut store = Store::new(Arc::new(StubGateway::default()));
        assert!(store.begin_initial_load());
        store
            .finish_page(PageRequest::Initial, Ok(summaries(0, names)))
            .unwrap();
        store
    }

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert!(app.store.list().is_empty());
        assert!(app.store.favorites().is_empty());
        assert!(!app.store.is_loading());
        assert!(app.error.is_none());
    }

    #[test]
    fn test_toggle_adds_then_removes_favorite() {
        let mut store = loaded_store(&["bulbasaur", "ivysaur"]);

        let toggled = store.toggle_favorite(1).unwrap();
        assert!(toggled.favorite);
        assert_eq!(store.favorites().len(), 1);
        assert_eq!(store.favorites()[0].id, 1);

        let toggled = store.toggle_favorite(1).unwrap();
        assert!(!toggled.favorite);
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn test_toggle_unknown_id_is_none() {
        let mut store = loaded_store(&["bulbasaur"]);
        assert!(store.toggle_favorite(99).is_none());
        assert!(store.favorites().is_empty());
        assert!(!store.list()[0].favorite);
    }

    #[test]
    fn test_toggle_pairs_restore_state() {
        let mut store = loaded_store(&["bulbasaur", "ivysaur", "venusaur"]);
        store.toggle_favorite(2);
        let before = store.state().clone();

        store.toggle_favorite(3);
        store.toggle_favorite(3);
        store.toggle_favorite(2);
        store.toggle_favorite(2);

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_favorites_stay_in_sync_over_toggle_sequence() {
        let mut store = loaded_store(&["a", "b", "c", "d", "e"]);
        for id in [1, 3, 5, 3, 2, 9, 1, 4, 4, 4] {
            store.toggle_favorite(id);
            assert_eq!(flagged_ids(&store), store.favorite_ids());
        }
        assert_eq!(store.favorite_ids(), HashSet::from([2, 4, 5]));
    }

    #[test]
    fn test_finish_page_marks_existing_favorites() {
        let mut store = loaded_store(&["a", "b"]);
        store.toggle_favorite(2);

        let offset = store.begin_load_more().unwrap();
        assert_eq!(offset, 2);
        // Overlapping id 2 is dropped, favorite flag survives on the original
        let mut page = summaries(1, &["b", "c"]);
        page[0].favorite = false;
        let added = store
            .finish_page(PageRequest::More { offset }, Ok(page))
            .unwrap();

        assert_eq!(added, 1);
        assert_eq!(store.list().len(), 3);
        assert!(store.get(2).unwrap().favorite);
        assert_eq!(flagged_ids(&store), store.favorite_ids());
    }

    #[test]
    fn test_begin_load_more_is_single_flight() {
        let mut store = loaded_store(&["a"]);
        assert_eq!(store.begin_load_more(), Some(1));
        assert!(store.is_loading());
        assert_eq!(store.begin_load_more(), None);
        assert!(!store.begin_initial_load());

        store
            .finish_page(PageRequest::More { offset: 1 }, Ok(Vec::new()))
            .unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.begin_load_more(), Some(1));
    }

    #[test]
    fn test_finish_page_failure_clears_loading() {
        let mut store = loaded_store(&["a"]);
        let offset = store.begin_load_more().unwrap();
        let err = store
            .finish_page(
                PageRequest::More { offset },
                Err(GatewayError::Http { status: 500 }),
            )
            .unwrap_err();

        assert_eq!(err, GatewayError::Http { status: 500 });
        assert!(!store.is_loading());
        assert!(store.pending_page().is_none());
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_attach_details_matches_case_insensitively() {
        let mut store = loaded_store(&["bulbasaur", "ivysaur"]);
        store.toggle_favorite(2);

        assert!(store.attach_details("IVYSAUR", details("ivysaur", &["grass"])));
        assert!(store.get(2).unwrap().details.is_some());
        assert!(store.favorites()[0].details.is_some());
        assert!(store.get(1).unwrap().details.is_none());
    }

    #[test]
    fn test_attach_details_without_match() {
        let mut store = loaded_store(&["bulbasaur"]);
        assert!(!store.attach_details("mew", details("mew", &["psychic"])));
        assert!(store.get(1).unwrap().details.is_none());
    }

    #[tokio::test]
    async fn test_fetch_initial_list_is_memoized() {
        let gateway = Arc::new(StubGateway::with_pages(vec![Ok(summaries(0, &["a", "b"]))]));
        let mut store = Store::new(gateway.clone());

        assert_eq!(store.fetch_initial_list().await.unwrap().len(), 2);
        assert_eq!(store.fetch_initial_list().await.unwrap().len(), 2);
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_initial_list_failure_propagates() {
        let gateway = Arc::new(StubGateway::with_pages(vec![Err(GatewayError::Network(
            "down".to_string(),
        ))]));
        let mut store = Store::new(gateway);

        let err = store.fetch_initial_list().await.unwrap_err();
        assert!(matches!(err, GatewayError::Network(_)));
        assert!(!store.is_loading());
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn test_load_more_uses_list_length_as_offset() {
        let gateway = Arc::new(StubGateway::with_pages(vec![
            Ok(summaries(0, &["a", "b"])),
            Ok(summaries(2, &["c"])),
        ]));
        let mut store = Store::new(gateway.clone());

        store.fetch_initial_list().await.unwrap();
        let list = store.load_more().await.unwrap();
        assert_eq!(list.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(gateway.offsets(), vec![2]);
    }

    #[tokio::test]
    async fn test_fetch_details_for_leaves_loading_alone() {
        let gateway = Arc::new(StubGateway::with_pages(vec![Ok(summaries(0, &["bulbasaur"]))]));
        let mut store = Store::new(gateway);
        store.fetch_initial_list().await.unwrap();

        let fetched = store.fetch_details_for("Bulbasaur").await.unwrap();
        assert_eq!(fetched.name, "Bulbasaur");
        assert!(!store.is_loading());
        assert_eq!(store.get(1).unwrap().details.as_ref(), Some(&fetched));
    }
}
