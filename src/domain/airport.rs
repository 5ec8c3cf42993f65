use serde::{Deserialize, Serialize};

/// Unique identifier for a catalog airport (store-assigned row id).
pub type AirportId = i64;

/// A single airport in the read-only catalog.
///
/// The catalog is bulk-seeded once at first database initialization and
/// never mutated afterwards; `passengers` exists only to rank search
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// Store-assigned id, stable and never reused.
    pub id: AirportId,
    /// Three-letter IATA code, uppercase, unique within the loaded catalog.
    pub iata_code: String,
    /// Display name.
    pub name: String,
    /// Annual passenger volume, non-negative.
    pub passengers: i64,
}

impl Airport {
    /// Case-insensitive substring match on name or IATA code.
    ///
    /// Used by the presentation layer to filter against the live-typed
    /// text, which may trail the last committed search query.
    pub fn matches(&self, substring: &str) -> bool {
        let needle = substring.to_ascii_lowercase();
        self.name.to_ascii_lowercase().contains(&needle)
            || self.iata_code.to_ascii_lowercase().contains(&needle)
    }
}
