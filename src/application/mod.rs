//! Application layer: the reactive stores and the repository that
//! composes them into one observable view.

pub mod catalog;
pub mod favorites;
mod live;
pub mod preferences;
pub mod repository;

pub use catalog::CatalogStore;
pub use favorites::FavoritesStore;
pub use preferences::PreferenceStore;
pub use repository::FlightRepository;

#[cfg(test)]
mod tests;
