//! Live-query plumbing: a watch channel that re-runs a snapshot query
//! whenever the owning store signals a change.

use tokio::sync::watch;

/// Subscribe to a store's change generation with a snapshot closure.
///
/// The returned receiver holds the query's current result and is
/// refreshed on every generation bump. The background task exits when
/// every receiver is dropped (unsubscribe cancels the in-flight query)
/// or when a refresh fails, in which case the stream is closed with a
/// logged error instead of going silently stale.
pub(crate) fn live_query<T, F>(
    mut changed: watch::Receiver<u64>,
    label: &'static str,
    snapshot: F,
) -> anyhow::Result<watch::Receiver<Vec<T>>>
where
    T: Clone + Send + Sync + 'static,
    F: Fn() -> anyhow::Result<Vec<T>> + Send + 'static,
{
    let initial = snapshot()?;
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            if changed.changed().await.is_err() {
                // Store dropped; nothing left to observe.
                break;
            }
            let value = match snapshot() {
                Ok(value) => value,
                Err(err) => {
                    log::error!("{label} refresh failed, closing stream: {err}");
                    break;
                }
            };
            if tx.send(value).is_err() {
                // All observers unsubscribed.
                break;
            }
        }
    });

    Ok(rx)
}
