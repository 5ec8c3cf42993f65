//! Reactive store over the read-only airport catalog.

use crate::application::live::live_query;
use crate::domain::{Airport, StoreError};
use crate::infra::db::repository::AirportRepository;
use crate::infra::db::Database;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Read-only reactive surface over the airport catalog.
///
/// Every subscription is a live query: the receiver always holds the
/// query's current result set and is refreshed when the catalog's
/// change generation bumps. The catalog never changes after seeding in
/// normal operation, but the contract holds generally.
pub struct CatalogStore {
    conn: Arc<Mutex<Connection>>,
    changed: watch::Sender<u64>,
}

impl CatalogStore {
    pub fn new(db: &Database) -> Self {
        let (changed, _) = watch::channel(0);
        Self {
            conn: db.connection(),
            changed,
        }
    }

    /// Live query: airports whose name or code contains `substring`,
    /// ranked by passenger volume, ties broken by ascending id.
    pub async fn search(
        &self,
        substring: &str,
    ) -> Result<watch::Receiver<Vec<Airport>>, StoreError> {
        let repo = AirportRepository::new(self.conn.clone());
        let substring = substring.to_string();
        live_query(self.changed.subscribe(), "catalog search", move || {
            repo.search(&substring)
        })
        .map_err(StoreError::unavailable)
    }

    /// Live query over the full catalog, same ordering as `search`.
    pub async fn all(&self) -> Result<watch::Receiver<Vec<Airport>>, StoreError> {
        let repo = AirportRepository::new(self.conn.clone());
        live_query(self.changed.subscribe(), "catalog listing", move || {
            repo.list_all()
        })
        .map_err(StoreError::unavailable)
    }

    /// Bump the change generation. Normal operation never mutates the
    /// catalog, so only maintenance paths (re-seeding) call this.
    pub fn notify_changed(&self) {
        self.changed.send_modify(|generation| *generation += 1);
    }
}
