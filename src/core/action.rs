//! # Actions
//!
//! Everything that can happen in the Pokédex becomes an `Action`.
//! User presses `f`? That's `Action::ToggleFavorite(id)`.
//! A page arrives? That's `Action::PageLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state and returns an `Effect` describing the I/O to perform next.
//! No I/O happens here; the TUI runs effects on background tasks and feeds
//! their results back in as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::state::{App, PageRequest};
use crate::gateway::{GatewayError, PokemonDetails, PokemonSummary};
use crate::share::{ShareTier, build_share_text};

#[derive(Debug)]
pub enum Action {
    LoadInitial,
    LoadMore,
    PageLoaded {
        request: PageRequest,
        result: Result<Vec<PokemonSummary>, GatewayError>,
    },
    RequestDetails(u32),
    DetailsLoaded {
        name: String,
        result: Result<PokemonDetails, GatewayError>,
    },
    ToggleFavorite(u32),
    Share(u32),
    ShareFinished(Result<ShareTier, String>),
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchPage(PageRequest),
    FetchDetails(String),
    CopyToClipboard(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::LoadInitial => {
            if !app.store.begin_initial_load() {
                return Effect::None;
            }
            app.error = None;
            app.status_message = "Loading Pokémon...".to_string();
            Effect::FetchPage(PageRequest::Initial)
        }
        Action::LoadMore => match app.store.begin_load_more() {
            Some(offset) => {
                app.status_message = "Loading more Pokémon...".to_string();
                Effect::FetchPage(PageRequest::More { offset })
            }
            None => Effect::None,
        },
        Action::PageLoaded { request, result } => {
            match (request, app.store.finish_page(request, result)) {
                (PageRequest::Initial, Ok(count)) => {
                    app.status_message = format!("Loaded {count} Pokémon");
                }
                (PageRequest::More { .. }, Ok(0)) => {
                    app.status_message = "No more Pokémon to load".to_string();
                }
                (PageRequest::More { .. }, Ok(added)) => {
                    app.status_message = format!("Loaded {added} more Pokémon");
                }
                (PageRequest::Initial, Err(e)) => {
                    app.status_message = "Could not load the Pokédex".to_string();
                    app.error = Some(e.to_string());
                }
                (PageRequest::More { .. }, Err(e)) => {
                    app.status_message = format!("Load more failed: {e}");
                }
            }
            Effect::None
        }
        Action::RequestDetails(id) => {
            let Some(summary) = app.store.get(id) else {
                app.status_message = "Pokémon not found".to_string();
                return Effect::None;
            };
            if summary.details.is_some() {
                return Effect::None;
            }
            let name = summary.name.clone();
            let key = name.to_lowercase();
            if !app.details_in_flight.insert(key.clone()) {
                debug!("Details for {} already in flight", name);
                return Effect::None;
            }
            app.details_errors.remove(&key);
            app.status_message = format!("Loading details for {name}...");
            Effect::FetchDetails(name)
        }
        Action::DetailsLoaded { name, result } => {
            let key = name.to_lowercase();
            app.details_in_flight.remove(&key);
            match result {
                Ok(details) => {
                    app.status_message = if app.store.attach_details(&name, details) {
                        format!("Details loaded for {name}")
                    } else {
                        format!("{name} is no longer in the list")
                    };
                }
                Err(e) => {
                    app.status_message = format!("Could not load details for {name}: {e}");
                    app.details_errors.insert(key, e.to_string());
                }
            }
            Effect::None
        }
        Action::ToggleFavorite(id) => {
            app.status_message = match app.store.toggle_favorite(id) {
                Some(summary) if summary.favorite => {
                    format!("{} added to favorites", summary.name)
                }
                Some(summary) => format!("{} removed from favorites", summary.name),
                None => "Pokémon not found".to_string(),
            };
            Effect::None
        }
        Action::Share(id) => {
            let Some(summary) = app.store.get(id) else {
                app.status_message = "Pokémon not found".to_string();
                return Effect::None;
            };
            let text = build_share_text(summary);
            if text.is_empty() {
                app.status_message = format!("Open {}'s details before sharing", summary.name);
                return Effect::None;
            }
            app.status_message = format!("Sharing {}...", summary.name);
            Effect::CopyToClipboard(text)
        }
        Action::ShareFinished(outcome) => {
            app.status_message = match outcome {
                Ok(ShareTier::PersistentSlot) => {
                    "Clipboard unavailable, saved for later instead".to_string()
                }
                // OSC 52 has no acknowledgement; the terminal may ignore it
                Ok(ShareTier::TerminalClipboard) => {
                    "Sent to the terminal clipboard (if your terminal supports it)".to_string()
                }
                Ok(tier) => format!("Copied to {}!", tier.label()),
                Err(e) => format!("Share failed: {e}"),
            };
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
