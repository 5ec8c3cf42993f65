//! The coordination core: composes the catalog, favorites, and
//! preference stores into one coherent observable view and funnels all
//! presentation-layer writes through itself.

use crate::application::{CatalogStore, FavoritesStore, PreferenceStore};
use crate::domain::{Airport, Favorite, StoreError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Unified repository over the three stores.
///
/// Constructed once with explicit handles; no other component talks to
/// the stores directly. Exposes three continuously-updated streams
/// (`airports`, `favorites`, `search_query`) and five operations.
pub struct FlightRepository {
    catalog: Arc<CatalogStore>,
    favorites: Arc<FavoritesStore>,
    preferences: Arc<PreferenceStore>,

    airports: Arc<watch::Sender<Vec<Airport>>>,
    favorites_rx: watch::Receiver<Vec<Favorite>>,
    search_query: Arc<watch::Sender<String>>,

    /// Latest issued catalog query. Results are applied to the
    /// `airports` stream only while their captured value is still
    /// current (last-issued-wins).
    query_seq: Arc<AtomicU64>,
}

impl FlightRepository {
    /// Compose the three stores. Fails with `StoreError::Unavailable`
    /// when the initial catalog read cannot be served.
    pub async fn new(
        catalog: CatalogStore,
        favorites: FavoritesStore,
        preferences: PreferenceStore,
    ) -> Result<Self, StoreError> {
        let catalog = Arc::new(catalog);
        let favorites = Arc::new(favorites);
        let preferences = Arc::new(preferences);

        let favorites_rx = favorites.all();

        // Outward search-query stream: seeded from the store, updated
        // by optimistic local echo on save and by the store's own
        // notifications (most recently produced value wins).
        let store_query_rx = preferences.get();
        let (search_query, _) = watch::channel(store_query_rx.borrow().clone());
        let search_query = Arc::new(search_query);
        tokio::spawn(forward_query(store_query_rx, search_query.clone()));

        // The airports stream starts as the full catalog.
        let initial_rx = catalog.all().await?;
        let (airports, _) = watch::channel(initial_rx.borrow().clone());
        let airports = Arc::new(airports);

        let query_seq = Arc::new(AtomicU64::new(1));
        tokio::spawn(follow_results(
            1,
            initial_rx,
            query_seq.clone(),
            airports.clone(),
        ));

        Ok(Self {
            catalog,
            favorites,
            preferences,
            airports,
            favorites_rx,
            search_query,
            query_seq,
        })
    }

    /// Current result of the last issued catalog query.
    pub fn airports(&self) -> watch::Receiver<Vec<Airport>> {
        self.airports.subscribe()
    }

    /// Current full favorites set.
    pub fn favorites(&self) -> watch::Receiver<Vec<Favorite>> {
        self.favorites_rx.clone()
    }

    /// Current persisted search text, with optimistic local echo.
    pub fn search_query(&self) -> watch::Receiver<String> {
        self.search_query.subscribe()
    }

    /// Issue a new catalog query. The `airports` stream switches to the
    /// latest issued query's results; stale in-flight results are
    /// discarded and never shown after a newer query was issued.
    pub fn search_airports(&self, text: &str) {
        let seq = self.query_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let catalog = self.catalog.clone();
        let query_seq = self.query_seq.clone();
        let airports = self.airports.clone();
        let text = text.to_string();

        tokio::spawn(async move {
            let rx = match catalog.search(&text).await {
                Ok(rx) => rx,
                Err(err) => {
                    log::error!("catalog query {text:?} failed: {err}");
                    return;
                }
            };
            follow_results(seq, rx, query_seq, airports).await;
        });
    }

    /// Persist the search text, echoing it into the `search_query`
    /// stream before the store's own notification round-trip.
    pub async fn save_search_query(&self, text: &str) -> Result<(), StoreError> {
        self.search_query.send_replace(text.to_string());
        self.preferences.set(text).await
    }

    /// Write-through favorite insert. The store's stream is the single
    /// source of truth; no local echo.
    pub async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), StoreError> {
        self.favorites.insert(favorite).await
    }

    /// Write-through favorite delete; a no-op for unknown ids.
    pub async fn delete_favorite(&self, favorite: &Favorite) -> Result<(), StoreError> {
        self.favorites.delete(favorite).await
    }

    /// Voice boundary: each non-empty recognized-text event behaves
    /// exactly like a save followed by a search. Empty events are
    /// ignored.
    pub async fn submit_recognized_text(&self, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.save_search_query(text).await?;
        self.search_airports(text);
        Ok(())
    }
}

/// Forward one query's live results into the shared `airports` stream
/// while `seq` is still the latest issued query.
///
/// The staleness check runs inside the watch channel's send lock, so an
/// older query can never overwrite a newer query's results after the
/// newer one has landed, and two queries' results never interleave.
async fn follow_results(
    seq: u64,
    mut rx: watch::Receiver<Vec<Airport>>,
    query_seq: Arc<AtomicU64>,
    airports: Arc<watch::Sender<Vec<Airport>>>,
) {
    loop {
        let value = rx.borrow_and_update().clone();
        let applied = airports.send_if_modified(|slot| {
            if query_seq.load(Ordering::SeqCst) != seq {
                return false;
            }
            *slot = value;
            true
        });
        if !applied {
            // A newer query owns the stream now; dropping `rx`
            // abandons this query without side effects.
            break;
        }
        if rx.changed().await.is_err() {
            break;
        }
    }
}

/// Relay the preference store's notifications into the outward stream.
/// The local echo lands first on save; the store echo agrees with it
/// because the repository is the sole writer.
async fn forward_query(
    mut store_rx: watch::Receiver<String>,
    outward: Arc<watch::Sender<String>>,
) {
    while store_rx.changed().await.is_ok() {
        let value = store_rx.borrow_and_update().clone();
        outward.send_replace(value);
    }
}
