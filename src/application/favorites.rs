//! Reactive store over favorite routes.

use crate::domain::{Favorite, StoreError};
use crate::infra::db::repository::FavoriteRepository;
use crate::infra::db::Database;
use tokio::sync::watch;

/// Durable favorites with a live full-set stream.
///
/// Writes commit before the stream updates, and the stream already
/// reflects a write by the time the write's future resolves, so a
/// caller's next observation after an awaited write always sees it.
pub struct FavoritesStore {
    repo: FavoriteRepository,
    value: watch::Sender<Vec<Favorite>>,
}

impl FavoritesStore {
    pub fn new(db: &Database) -> Result<Self, StoreError> {
        let repo = db.favorite_repo();
        let initial = repo.list_all().map_err(StoreError::unavailable)?;
        let (value, _) = watch::channel(initial);
        Ok(Self { repo, value })
    }

    /// Upsert by id; an existing favorite with the same id is replaced
    /// entirely.
    pub async fn insert(&self, favorite: &Favorite) -> Result<(), StoreError> {
        self.repo
            .insert(favorite)
            .map_err(StoreError::write_failed)?;
        self.refresh();
        Ok(())
    }

    /// Delete by identity; a no-op when no matching row exists.
    pub async fn delete(&self, favorite: &Favorite) -> Result<(), StoreError> {
        self.repo
            .delete(favorite.id)
            .map_err(StoreError::write_failed)?;
        self.refresh();
        Ok(())
    }

    /// Live stream of the full favorites set, ascending id order.
    pub fn all(&self) -> watch::Receiver<Vec<Favorite>> {
        self.value.subscribe()
    }

    fn refresh(&self) {
        match self.repo.list_all() {
            Ok(favorites) => {
                self.value.send_replace(favorites);
            }
            Err(err) => {
                // The write committed; only the re-read failed.
                log::error!("favorites refresh failed, stream is stale: {err}");
            }
        }
    }
}
