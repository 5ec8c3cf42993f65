use crate::application::*;
use crate::domain::Favorite;
use crate::infra::db::Database;
use crate::infra::prefs::PreferenceFile;
use anyhow::Result;
use std::time::Duration;
use tokio::sync::watch;

// "kennedy" matches only JFK's name, "guardia" only LGA's.
const TEST_SEED: &str = "\
JFK,John F. Kennedy International Airport,62551072
LGA,LaGuardia Airport,31084894
";

fn test_database() -> Result<Database> {
    Database::open_in_memory_with(TEST_SEED)
}

async fn test_repository(dir: &tempfile::TempDir) -> Result<FlightRepository> {
    let db = test_database()?;
    let catalog = CatalogStore::new(&db);
    let favorites = FavoritesStore::new(&db)?;
    let preferences = PreferenceStore::open(PreferenceFile::at(dir.path().join("prefs.toml")));
    Ok(FlightRepository::new(catalog, favorites, preferences).await?)
}

/// Wait until the stream value satisfies the predicate, or time out.
async fn wait_for<T, P>(rx: &mut watch::Receiver<T>, mut pred: P) -> Result<()>
where
    P: FnMut(&T) -> bool,
{
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            {
                let current = rx.borrow_and_update();
                if pred(&current) {
                    return anyhow::Ok(());
                }
            }
            rx.changed().await?;
        }
    })
    .await?
}

#[tokio::test]
async fn test_airports_stream_starts_with_full_catalog() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;

    let airports = repo.airports().borrow().clone();
    assert_eq!(airports.len(), 2);
    // Ranked by passenger volume descending.
    assert_eq!(airports[0].iata_code, "JFK");
    assert_eq!(airports[1].iata_code, "LGA");
    Ok(())
}

#[tokio::test]
async fn test_search_switches_airports_stream() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;
    let mut rx = repo.airports();

    repo.search_airports("guardia");
    wait_for(&mut rx, |airports| {
        airports.len() == 1 && airports[0].iata_code == "LGA"
    })
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_last_issued_query_wins() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;
    let mut rx = repo.airports();

    repo.search_airports("kennedy");
    repo.search_airports("guardia");

    wait_for(&mut rx, |airports| {
        airports.len() == 1 && airports[0].iata_code == "LGA"
    })
    .await?;

    // The older query's results must never land after the newer one.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let airports = rx.borrow().clone();
    assert_eq!(airports.len(), 1);
    assert_eq!(airports[0].iata_code, "LGA");
    Ok(())
}

#[tokio::test]
async fn test_save_search_query_echoes_locally() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;

    repo.save_search_query("JFK").await?;
    // Visible immediately, no store round-trip needed.
    assert_eq!(*repo.search_query().borrow(), "JFK");

    // And durably persisted.
    let on_disk = PreferenceFile::at(dir.path().join("prefs.toml")).load();
    assert_eq!(on_disk.search_query, "JFK");
    Ok(())
}

#[tokio::test]
async fn test_search_query_restored_across_restart() -> Result<()> {
    let dir = tempfile::tempdir()?;
    {
        let repo = test_repository(&dir).await?;
        repo.save_search_query("laguardia").await?;
    }

    let repo = test_repository(&dir).await?;
    assert_eq!(*repo.search_query().borrow(), "laguardia");
    Ok(())
}

#[tokio::test]
async fn test_corrupt_preference_file_reads_as_empty() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("prefs.toml");
    std::fs::write(&path, "search_query = [not toml")?;

    let store = PreferenceStore::open(PreferenceFile::at(path));
    assert_eq!(*store.get().borrow(), "");
    Ok(())
}

#[tokio::test]
async fn test_favorite_insert_visible_after_write_resolves() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;

    repo.insert_favorite(&Favorite::new(1, "JFK", "LGA")).await?;
    let favorites = repo.favorites().borrow().clone();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].departure_code, "JFK");
    Ok(())
}

#[tokio::test]
async fn test_favorite_upsert_and_noop_delete_through_repository() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;

    repo.insert_favorite(&Favorite::new(1, "JFK", "LGA")).await?;
    repo.insert_favorite(&Favorite::new(1, "LGA", "JFK")).await?;

    let favorites = repo.favorites().borrow().clone();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].departure_code, "LGA");

    repo.delete_favorite(&Favorite::new(99, "XXX", "YYY")).await?;
    assert_eq!(repo.favorites().borrow().len(), 1);

    repo.delete_favorite(&Favorite::new(1, "LGA", "JFK")).await?;
    assert!(repo.favorites().borrow().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_recognized_text_saves_and_searches() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let repo = test_repository(&dir).await?;
    let mut rx = repo.airports();

    // Empty recognition events are ignored.
    repo.submit_recognized_text("   ").await?;
    assert_eq!(*repo.search_query().borrow(), "");

    repo.submit_recognized_text("kennedy").await?;
    assert_eq!(*repo.search_query().borrow(), "kennedy");
    wait_for(&mut rx, |airports| {
        airports.len() == 1 && airports[0].iata_code == "JFK"
    })
    .await?;
    Ok(())
}

#[tokio::test]
async fn test_catalog_stream_reemits_on_change() -> Result<()> {
    let db = test_database()?;
    let catalog = CatalogStore::new(&db);

    let mut rx = catalog.search("airport").await?;
    assert_eq!(rx.borrow().len(), 2);

    db.connection().lock().unwrap().execute(
        "INSERT INTO airport (iata_code, name, passengers) VALUES ('SXF', 'Berlin Airport', 100)",
        [],
    )?;
    catalog.notify_changed();

    wait_for(&mut rx, |airports| airports.len() == 3).await?;
    Ok(())
}
