//! Domain types for the flight search core.
//! Defines the airport catalog entry, the favorite route, and the
//! store-layer error taxonomy.

pub mod airport;
pub mod error;
pub mod favorite;

pub use airport::*;
pub use error::*;
pub use favorite::*;
