mod config;
pub mod store;

pub use config::{Config, FeedbackConfig, StatsConfig};
pub use store::{keys, Store};

use std::path::PathBuf;

/// Returns the data directory, creating it if needed.
///
/// `DAYSTREAK_HOME` overrides the location. Otherwise this is
/// `~/.config/daystreak[-dev]/`, with `DAYSTREAK_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("DAYSTREAK_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYSTREAK_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("daystreak-dev")
            } else {
                base_dir.join("daystreak")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
