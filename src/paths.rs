//! Path resolution for the config and state files
//!
//! # Environment Variables
//!
//! - `NOTNULL_CONFIG` - Config file to use instead of `./notnull.toml`
//! - `NOTNULL_STATE_DIR` - Override state directory
//!
//! # Path Resolution Priority
//!
//! For config_file():
//! 1. `--config` flag
//! 2. `NOTNULL_CONFIG` environment variable
//! 3. `notnull.toml` in the current directory
//!
//! For state_dir():
//! 1. `NOTNULL_STATE_DIR` environment variable
//! 2. `XDG_STATE_HOME/notnull` (if set)
//! 3. Platform default:
//!    - Windows: `%LOCALAPPDATA%\notnull`
//!    - macOS/Linux: `~/.local/state/notnull`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for the config file
pub const ENV_CONFIG: &str = "NOTNULL_CONFIG";

/// Environment variable for state directory override
pub const ENV_STATE_DIR: &str = "NOTNULL_STATE_DIR";

/// Default config file name, looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "notnull.toml";

/// State file name inside the state directory
pub const STATE_FILE: &str = "state.json";

/// Resolve the config file path
pub fn config_file(flag: Option<&Path>) -> PathBuf {
    if let Some(path) = flag {
        return expand(&path.to_string_lossy());
    }

    if let Ok(path) = std::env::var(ENV_CONFIG) {
        let path = expand(&path);
        log::debug!("Using config file from {}: {}", ENV_CONFIG, path.display());
        return path;
    }

    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Resolve the state file path
pub fn state_file(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(expand(&path.to_string_lossy())),
        None => Ok(state_dir()?.join(STATE_FILE)),
    }
}

/// Get the notnull state directory path
pub fn state_dir() -> Result<PathBuf> {
    // 1. Check environment variable override
    if let Ok(dir) = std::env::var(ENV_STATE_DIR) {
        let path = expand(&dir);
        log::debug!("Using state dir from {}: {}", ENV_STATE_DIR, path.display());
        return Ok(path);
    }

    // 2. Check XDG_STATE_HOME
    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(xdg_state).join("notnull");
        log::debug!("Using XDG_STATE_HOME: {}", path.display());
        return Ok(path);
    }

    // 3. Platform default
    #[cfg(windows)]
    {
        if let Some(local_app_data) = dirs::data_local_dir() {
            let path = local_app_data.join("notnull");
            log::debug!("Using Windows state dir: {}", path.display());
            return Ok(path);
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".local").join("state").join("notnull");
    log::debug!("Using default state dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}
