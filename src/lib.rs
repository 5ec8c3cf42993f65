//! Flight search core: an airport catalog, favorite routes, and the
//! persisted last search query, exposed as continuously-updated
//! watch-channel streams behind a single [`FlightRepository`].

pub mod application;
pub mod domain;
pub mod infra;
