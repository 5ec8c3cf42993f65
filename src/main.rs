//! CLI presentation adapter.
//!
//! A thin consumer of the repository's streams and producer of intents:
//! typed lines become search queries, `:fav`/`:unfav` manage favorite
//! routes, and an empty line shows the favorites list (the derived
//! filtering rule: non-empty text renders airports, empty renders
//! favorites).

use flightsearch::application::{CatalogStore, FavoritesStore, FlightRepository, PreferenceStore};
use flightsearch::domain::{Airport, Favorite};
use flightsearch::infra::db::Database;
use flightsearch::infra::prefs::PreferenceFile;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser, Debug)]
#[command(name = "flightsearch", about = "Search airports and save favorite routes")]
struct Args {
    /// Database file (defaults to the per-user data directory).
    #[arg(long)]
    db: Option<PathBuf>,

    /// Preference file (defaults to the per-user data directory).
    #[arg(long)]
    prefs: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let db = match args.db {
        Some(path) => Database::open_at(path)?,
        None => Database::open()?,
    };
    let prefs = match args.prefs {
        Some(path) => PreferenceFile::at(path),
        None => PreferenceFile::open(),
    };

    let repository = FlightRepository::new(
        CatalogStore::new(&db),
        FavoritesStore::new(&db)?,
        PreferenceStore::open(prefs),
    )
    .await?;

    // Restore the persisted query and re-issue it as the initial search.
    let last_query = repository.search_query().borrow().clone();
    if !last_query.is_empty() {
        println!("restoring last search: {last_query:?}");
        repository.search_airports(&last_query);
    }

    println!("type to search, ':fav DEP DST' / ':unfav ID' for favorites, ':quit' to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        match line.as_str() {
            ":quit" | ":q" => break,
            "" => render_favorites(&repository),
            _ if line.starts_with(":fav") => fav(&repository, &line).await,
            _ if line.starts_with(":unfav") => unfav(&repository, &line).await,
            text => {
                if let Err(err) = repository.save_search_query(text).await {
                    log::warn!("could not persist search query: {err}");
                }
                repository.search_airports(text);
                render_airports(&repository, text).await;
            }
        }
    }

    Ok(())
}

/// Wait briefly for the issued query to land, then render the airports
/// stream filtered by the live-typed text.
async fn render_airports(repository: &FlightRepository, typed: &str) {
    let mut rx = repository.airports();
    let _ = tokio::time::timeout(Duration::from_millis(500), rx.changed()).await;

    let airports: Vec<Airport> = rx
        .borrow()
        .iter()
        .filter(|airport| airport.matches(typed))
        .cloned()
        .collect();

    if airports.is_empty() {
        println!("no airports match {typed:?}");
        return;
    }
    for airport in airports {
        println!(
            "  {}  {}  ({} passengers/year)",
            airport.iata_code, airport.name, airport.passengers
        );
    }
}

fn render_favorites(repository: &FlightRepository) {
    let favorites = repository.favorites().borrow().clone();
    if favorites.is_empty() {
        println!("no favorite routes saved");
        return;
    }
    for favorite in favorites {
        println!(
            "  [{}] {} -> {}",
            favorite.id, favorite.departure_code, favorite.destination_code
        );
    }
}

async fn fav(repository: &FlightRepository, line: &str) {
    let mut parts = line.split_whitespace().skip(1);
    let (Some(departure), Some(destination)) = (parts.next(), parts.next()) else {
        println!("usage: :fav DEP DST");
        return;
    };

    // Two distinct legs for a route; the id continues from the last one.
    let next_id = repository
        .favorites()
        .borrow()
        .last()
        .map(|favorite| favorite.id + 1)
        .unwrap_or(1);

    let favorite = Favorite::new(
        next_id,
        &departure.to_uppercase(),
        &destination.to_uppercase(),
    );
    match repository.insert_favorite(&favorite).await {
        Ok(()) => render_favorites(repository),
        // Transient failure: report it, never crash.
        Err(err) => println!("could not save favorite: {err}"),
    }
}

async fn unfav(repository: &FlightRepository, line: &str) {
    let Some(id) = line
        .split_whitespace()
        .nth(1)
        .and_then(|raw| raw.parse::<i64>().ok())
    else {
        println!("usage: :unfav ID");
        return;
    };

    let Some(favorite) = repository
        .favorites()
        .borrow()
        .iter()
        .find(|favorite| favorite.id == id)
        .cloned()
    else {
        println!("no favorite with id {id}");
        return;
    };

    match repository.delete_favorite(&favorite).await {
        Ok(()) => render_favorites(repository),
        Err(err) => println!("could not delete favorite: {err}"),
    }
}
