//! SQLite database setup and connection management.
//! Handles database initialization, schema creation, and first-run
//! catalog seeding from the bundled dataset.

use anyhow::Result;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Bundled catalog dataset: one `code,name,passengers` row per line.
const CATALOG_SEED: &str = include_str!("../../../assets/airports.csv");

const SCHEMA_VERSION: i32 = 1;

/// Database wrapper that manages the SQLite connection.
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Create or open the database at the default location.
    pub fn open() -> Result<Self> {
        Self::open_at(Self::default_path())
    }

    /// Create an in-memory database (useful for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Create an in-memory database seeded from a caller-provided
    /// dataset instead of the bundled one (useful for testing ordering
    /// and filtering against literal rows).
    pub fn open_in_memory_with(dataset: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_with(dataset)?;
        Ok(db)
    }

    /// Create or open the database at a specific path.
    pub fn open_at(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Get the default database path.
    fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var("FLIGHTSEARCH_DB_PATH") {
            return PathBuf::from(path);
        }
        crate::infra::data_dir().join("db.sqlite")
    }

    /// Initialize the schema and seed the catalog on first run.
    fn init(&self) -> Result<()> {
        self.init_with(CATALOG_SEED)
    }

    fn init_with(&self, dataset: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();

        let existing_version: i32 =
            conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

        if existing_version == 0 {
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM airport", [], |row| row.get(0))?;
        if count == 0 {
            Self::seed_catalog(&conn, dataset)?;
        }

        Ok(())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS airport (
                id INTEGER PRIMARY KEY,
                iata_code TEXT NOT NULL,
                name TEXT NOT NULL,
                passengers INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS favorite (
                id INTEGER PRIMARY KEY,
                departure_code TEXT NOT NULL,
                destination_code TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    /// Load `code,name,passengers` rows into the airport table.
    ///
    /// Rows with an empty code or a negative count are skipped with a
    /// warning rather than aborting the seed.
    fn seed_catalog(conn: &Connection, dataset: &str) -> Result<()> {
        let mut stmt = conn
            .prepare("INSERT INTO airport (iata_code, name, passengers) VALUES (?1, ?2, ?3)")?;

        let mut loaded = 0usize;
        for (lineno, line) in dataset.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.splitn(3, ',');
            let (code, name, passengers) = match (fields.next(), fields.next(), fields.next()) {
                (Some(c), Some(n), Some(p)) => (c.trim(), n.trim(), p.trim()),
                _ => {
                    log::warn!("skipping malformed seed row {}: {:?}", lineno + 1, line);
                    continue;
                }
            };
            let passengers: i64 = match passengers.parse() {
                Ok(p) => p,
                Err(_) => {
                    log::warn!("skipping seed row {} with bad count: {:?}", lineno + 1, line);
                    continue;
                }
            };
            if code.is_empty() || passengers < 0 {
                log::warn!("skipping invalid seed row {}: {:?}", lineno + 1, line);
                continue;
            }
            stmt.execute((code, name, passengers))?;
            loaded += 1;
        }

        log::info!("seeded catalog with {} airports", loaded);
        Ok(())
    }

    /// Get a reference to the connection.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    pub fn airport_repo(&self) -> crate::infra::db::repository::AirportRepository {
        crate::infra::db::repository::AirportRepository::new(self.connection())
    }

    pub fn favorite_repo(&self) -> crate::infra::db::repository::FavoriteRepository {
        crate::infra::db::repository::FavoriteRepository::new(self.connection())
    }
}
