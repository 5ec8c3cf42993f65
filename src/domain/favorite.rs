use serde::{Deserialize, Serialize};

/// Unique identifier for a favorite route.
pub type FavoriteId = i64;

/// A user-saved departure/destination route.
///
/// The codes reference catalog IATA codes but are not enforced as
/// foreign keys; the store accepts whatever codes the caller provides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: FavoriteId,
    pub departure_code: String,
    pub destination_code: String,
}

impl Favorite {
    pub fn new(id: FavoriteId, departure_code: &str, destination_code: &str) -> Self {
        Self {
            id,
            departure_code: departure_code.to_string(),
            destination_code: destination_code.to_string(),
        }
    }
}
