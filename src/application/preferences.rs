//! Reactive store over the persisted search query.

use crate::domain::StoreError;
use crate::infra::prefs::{PreferenceFile, Preferences};
use tokio::sync::{watch, Mutex};

/// Single-key preference store with a live value stream.
///
/// Concurrent `set` calls are serialized by the internal lock; the last
/// completed write wins. The durable write lands before the stream
/// updates.
pub struct PreferenceStore {
    file: Mutex<PreferenceFile>,
    value: watch::Sender<String>,
}

impl PreferenceStore {
    /// Wrap a preference file, reading the current value up front.
    /// A missing or corrupt file yields the empty default.
    pub fn open(file: PreferenceFile) -> Self {
        let initial = file.load().search_query;
        let (value, _) = watch::channel(initial);
        Self {
            file: Mutex::new(file),
            value,
        }
    }

    /// Live stream of the persisted search query.
    pub fn get(&self) -> watch::Receiver<String> {
        self.value.subscribe()
    }

    /// Durably overwrite the stored query. Idempotent.
    pub async fn set(&self, query: &str) -> Result<(), StoreError> {
        let file = self.file.lock().await;
        file.store(&Preferences {
            search_query: query.to_string(),
        })
        .map_err(StoreError::write_failed)?;
        self.value.send_replace(query.to_string());
        Ok(())
    }
}
