//! # Sharing
//!
//! Builds a one-line summary of a Pokémon and places it on the clipboard.
//!
//! The copy goes through an ordered chain of targets; the first one that
//! succeeds wins:
//!
//! ```text
//! SystemClipboard ──fail──▶ TerminalClipboard ──fail──▶ PersistentSlot
//!  (pbcopy, wl-copy…)        (OSC 52 escape)             (storage.json)
//! ```
//!
//! [`share`] is fire-and-forget: it returns the text at once and logs the
//! outcome. [`ShareChain::copy`] reports which tier succeeded.

pub mod targets;

use std::fmt;
use std::sync::Arc;

use log::{info, warn};

use crate::core::config::ResolvedConfig;
use crate::core::storage::{KeyValueStore, LAST_SHARED_KEY};
use crate::gateway::PokemonSummary;

pub use targets::{PersistentSlot, SystemClipboard, TerminalClipboard};

/// `"Name: …, Weight: …, Height: …, Types: a, b"`, or empty without details.
pub fn build_share_text(summary: &PokemonSummary) -> String {
    let Some(details) = &summary.details else {
        return String::new();
    };

    format!(
        "Name: {}, Weight: {}, Height: {}, Types: {}",
        summary.name,
        details.weight,
        details.height,
        details.type_names().join(", ")
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTier {
    SystemClipboard,
    TerminalClipboard,
    PersistentSlot,
}

impl ShareTier {
    pub fn label(self) -> &'static str {
        match self {
            ShareTier::SystemClipboard => "clipboard",
            ShareTier::TerminalClipboard => "terminal clipboard",
            ShareTier::PersistentSlot => "storage",
        }
    }
}

#[derive(Debug)]
pub enum ShareError {
    /// Nothing to share (no details loaded).
    Empty,
    /// The tier cannot run here (no tool installed, not a terminal).
    Unavailable(String),
    Io(std::io::Error),
    /// Every tier failed.
    AllTiersFailed,
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareError::Empty => write!(f, "nothing to share"),
            ShareError::Unavailable(msg) => write!(f, "unavailable: {msg}"),
            ShareError::Io(e) => write!(f, "I/O error: {e}"),
            ShareError::AllTiersFailed => write!(f, "could not copy with any method"),
        }
    }
}

impl std::error::Error for ShareError {}

impl From<std::io::Error> for ShareError {
    fn from(e: std::io::Error) -> Self {
        ShareError::Io(e)
    }
}

/// One step of the fallback chain.
pub trait ShareTarget: Send + Sync {
    fn tier(&self) -> ShareTier;

    fn write(&self, text: &str) -> Result<(), ShareError>;
}

pub struct ShareChain {
    targets: Vec<Box<dyn ShareTarget>>,
}

impl ShareChain {
    pub fn new(targets: Vec<Box<dyn ShareTarget>>) -> Self {
        Self { targets }
    }

    /// System clipboard, then OSC 52 (if enabled), then the storage slot.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut targets: Vec<Box<dyn ShareTarget>> = vec![Box::new(SystemClipboard::new(
            config.clipboard_command.clone(),
        ))];
        if config.terminal_clipboard {
            targets.push(Box::new(TerminalClipboard::stdout()));
        }
        let storage_path = config
            .storage_path
            .clone()
            .or_else(KeyValueStore::default_path);
        if let Some(path) = storage_path {
            targets.push(Box::new(PersistentSlot::new(
                KeyValueStore::new(path),
                LAST_SHARED_KEY,
            )));
        }
        Self::new(targets)
    }

    pub fn tiers(&self) -> Vec<ShareTier> {
        self.targets.iter().map(|t| t.tier()).collect()
    }

    /// Tries each target in order and returns the first tier that succeeded.
    pub fn copy(&self, text: &str) -> Result<ShareTier, ShareError> {
        if text.is_empty() {
            return Err(ShareError::Empty);
        }

        info!("Attempting to copy to clipboard: {}", text);
        for target in &self.targets {
            match target.write(text) {
                Ok(()) => {
                    info!("Successfully copied with {}", target.tier().label());
                    return Ok(target.tier());
                }
                Err(e) => warn!("Error with {}: {}", target.tier().label(), e),
            }
        }

        warn!("Could not copy to clipboard with any method");
        Err(ShareError::AllTiersFailed)
    }
}

/// Builds the share text and copies it out-of-band.
///
/// Returns the text immediately. On a Tokio runtime the chain runs on a
/// blocking task; without one it runs inline. Failures are only logged.
pub fn share(summary: &PokemonSummary, chain: Arc<ShareChain>) -> String {
    let text = build_share_text(summary);
    if text.is_empty() {
        return text;
    }

    let payload = text.clone();
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn_blocking(move || {
                let _ = chain.copy(&payload);
            });
        }
        Err(_) => {
            let _ = chain.copy(&payload);
        }
    }
    text
}
