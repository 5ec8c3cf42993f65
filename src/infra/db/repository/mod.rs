//! Row-level repositories for the airport catalog and favorite routes.
//!
//! These are the synchronous storage surface; the reactive stores in
//! the application layer wrap them with change notifications.

mod airport;
mod favorite;

pub use airport::AirportRepository;
pub use favorite::FavoriteRepository;

use rusqlite::Connection;
use std::sync::{Arc, Mutex};

pub(super) type DbConn = Arc<Mutex<Connection>>;

#[cfg(test)]
mod tests;
