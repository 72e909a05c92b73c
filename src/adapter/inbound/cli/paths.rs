//! Path utilities for fanpulse.
//!
//! Local state lives under `~/.fanpulse/`:
//! - `~/.fanpulse/config.toml` - main configuration
//! - `~/.fanpulse/.env` - optional token file loaded at startup

use std::path::PathBuf;

/// Returns the fanpulse home directory (`~/.fanpulse/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fanpulse")
}

/// Returns the default config file path (`~/.fanpulse/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the home-directory env file (`~/.fanpulse/.env`).
pub fn env_file() -> PathBuf {
    home_dir().join(".env")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_fanpulse_home() {
        assert!(home_dir().ends_with(".fanpulse"));
        assert!(default_config().ends_with(".fanpulse/config.toml"));
        assert!(env_file().ends_with(".fanpulse/.env"));
    }
}
