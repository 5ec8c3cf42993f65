//! Infrastructure: SQLite persistence and the preference file.

pub mod db;
pub mod prefs;

use std::path::PathBuf;

/// Per-user data directory holding the database and preference file.
pub fn data_dir() -> PathBuf {
    if let Ok(path) = std::env::var("FLIGHTSEARCH_DATA_HOME") {
        return PathBuf::from(path);
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = home::home_dir() {
            return home
                .join("Library")
                .join("Application Support")
                .join("FlightSearch");
        }
    }

    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("FlightSearch");
        }
    }

    #[cfg(target_os = "linux")]
    {
        if let Some(xdg) = std::env::var_os("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("flightsearch");
        }
        if let Some(home) = home::home_dir() {
            return home.join(".local").join("share").join("flightsearch");
        }
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".flightsearch")
}
