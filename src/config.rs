use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IconError, Result};

pub const CONFIG_FILE_NAME: &str = "oxide-icon.json";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where icons go when no output path is given.
    pub output_dir: PathBuf,
    /// Resize every icon to this size; `None` keeps the native size.
    pub default_size: Option<u32>,
    pub require_larger: bool,
    pub allow_splash_fallback: bool,
    /// Explicit resize tool; `magick` on PATH otherwise.
    pub resize_tool: Option<PathBuf>,
    pub open_after: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("icons"),
            default_size: None,
            require_larger: false,
            allow_splash_fallback: false,
            resize_tool: None,
            open_after: false,
        }
    }
}

/// Load the config at `path`, falling back to defaults when it is absent.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path).map_err(|e| IconError::io(path, e))?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// First existing config file: next to the executable, then the current
/// directory.
pub fn find_config() -> Option<PathBuf> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()));

    let candidates = [
        exe_dir.map(|d| d.join(CONFIG_FILE_NAME)),
        Some(PathBuf::from(CONFIG_FILE_NAME)),
    ];
    candidates.into_iter().flatten().find(|candidate| candidate.exists())
}
