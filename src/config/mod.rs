// Configuration: TOML loading, validation, and hot reload.

pub mod types;
pub mod watcher;

pub use types::{Config, ConfigDelta, ConfigError};

/// Get the config file path (~/.config/quadview/config.toml).
pub fn default_config_path() -> std::path::PathBuf {
    let home = std::env::var("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("."));
    home.join(".config").join("quadview").join("config.toml")
}
