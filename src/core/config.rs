//! # Configuration
//!
//! Where the API lives, how many Pokémon a page holds and how sharing
//! reaches the clipboard. Later sources win:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.pokedex/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::gateway::pokeapi::{DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};

// ============================================================================
// File layout (every field optional so partial files parse)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PokedexConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShareConfig {
    pub clipboard_command: Option<Vec<String>>,
    pub terminal_clipboard: Option<bool>,
    pub storage_file: Option<String>,
}

// ============================================================================
// Effective settings handed to the TUI
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub page_size: usize,
    /// Explicit clipboard program; `None` means detect per platform.
    pub clipboard_command: Option<Vec<String>>,
    pub terminal_clipboard: bool,
    /// `None` when no home directory is available.
    pub storage_path: Option<PathBuf>,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub page_size: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.pokedex`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".pokedex"))
}

/// Returns the path to `~/.pokedex/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.pokedex/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PokedexConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PokedexConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PokedexConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PokedexConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<PokedexConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: PokedexConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Writes a fully commented template so every option is discoverable.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Pokedex Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "https://pokeapi.co/api/v2"   # Or set POKEDEX_BASE_URL
# page_size = 20                            # Or set POKEDEX_PAGE_SIZE

# [share]
# clipboard_command = ["wl-copy"]           # Detected per platform when unset
# terminal_clipboard = true                 # OSC 52 fallback
# storage_file = "storage.json"             # Path relative to ~/.pokedex/
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapses file values, environment and CLI flags into concrete settings.
pub fn resolve(config: &PokedexConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("POKEDEX_BASE_URL").ok())
        .or_else(|| config.general.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Page size: CLI → env → config → default, skipping zero at every layer
    let non_zero = |size: &usize| *size > 0;
    let page_size = cli
        .page_size
        .filter(non_zero)
        .or_else(|| {
            std::env::var("POKEDEX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(non_zero)
        })
        .or(config.general.page_size.filter(non_zero))
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let storage_path = resolve_storage_path(config.share.storage_file.as_deref(), config_dir());

    ResolvedConfig {
        base_url,
        page_size,
        clipboard_command: config
            .share
            .clipboard_command
            .clone()
            .filter(|argv| !argv.is_empty()),
        terminal_clipboard: config.share.terminal_clipboard.unwrap_or(true),
        storage_path,
    }
}

/// Relative storage files live under `~/.pokedex/`; absolute ones are kept.
fn resolve_storage_path(file: Option<&str>, dir: Option<PathBuf>) -> Option<PathBuf> {
    let file = Path::new(file.unwrap_or("storage.json"));
    if file.is_absolute() {
        return Some(file.to_path_buf());
    }
    dir.map(|d| d.join(file))
}
