//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (a page is loading): draws every ~80ms so the spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events, background
//!   results or terminal resize.
//!
//! ## Background work
//!
//! `update()` returns an `Effect`; `run_effect` turns it into a tokio task
//! (gateway calls) or a blocking task (clipboard). Each task reports back
//! through the `mpsc` channel as a new `Action`.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::{App, PageRequest};
use crate::gateway::{PokeApiGateway, PokemonGateway, PokemonSummary};
use crate::share::ShareChain;
use crate::tui::component::EventHandler;
use crate::tui::components::{ListEvent, PokemonListState, SearchBar, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which collection the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    All,
    Favorites,
}

impl Tab {
    fn toggle(self) -> Self {
        match self {
            Tab::All => Tab::Favorites,
            Tab::Favorites => Tab::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Shown until the first key press; nothing has been fetched yet.
    Welcome,
    Browse,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub screen: Screen,
    pub tab: Tab,
    // Persistent component states
    pub list: PokemonListState,
    pub search: SearchBar,
    /// Id of the Pokémon whose details overlay is open.
    pub details: Option<u32>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Welcome,
            tab: Tab::All,
            list: PokemonListState::new(),
            search: SearchBar::default(),
            details: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Entries for the current tab, filtered by the search query.
pub fn visible_entries<'a>(app: &'a App, tui: &TuiState) -> Vec<&'a PokemonSummary> {
    let source = match tui.tab {
        Tab::All => app.store.list(),
        Tab::Favorites => app.store.favorites(),
    };
    source.iter().filter(|s| tui.search.matches(s)).collect()
}

fn selected_id(app: &App, tui: &TuiState) -> Option<u32> {
    visible_entries(app, tui)
        .get(tui.list.selected)
        .map(|summary| summary.id)
}

/// Translates a terminal event into an `Action`, updating presentation
/// state along the way.
pub fn dispatch(tui: &mut TuiState, app: &App, event: &TuiEvent) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize => return None,
        _ => {}
    }
    let quit = matches!(event, TuiEvent::InputChar('q'));

    if tui.screen == Screen::Welcome {
        if quit {
            return Some(Action::Quit);
        }
        tui.screen = Screen::Browse;
        return Some(Action::LoadInitial);
    }

    // Splash views: loading, empty or failed first page
    if app.store.list().is_empty() {
        return if quit {
            Some(Action::Quit)
        } else if app.store.is_loading() {
            None
        } else {
            Some(Action::LoadInitial)
        };
    }

    if tui.search.active {
        if let Some(SearchEvent::Changed | SearchEvent::Cleared) = tui.search.handle_event(event) {
            tui.list.reset();
        }
        return None;
    }

    if let Some(id) = tui.details {
        return match event {
            TuiEvent::Escape => {
                tui.details = None;
                None
            }
            TuiEvent::Submit => Some(Action::RequestDetails(id)),
            TuiEvent::InputChar('f') => Some(Action::ToggleFavorite(id)),
            TuiEvent::InputChar('s') => Some(Action::Share(id)),
            _ if quit => Some(Action::Quit),
            _ => None,
        };
    }

    let visible = visible_entries(app, tui).len();
    let selected = selected_id(app, tui);

    match event {
        _ if quit => Some(Action::Quit),
        TuiEvent::Tab => {
            tui.tab = tui.tab.toggle();
            tui.list.reset();
            None
        }
        TuiEvent::CursorUp | TuiEvent::CursorDown | TuiEvent::PageUp | TuiEvent::PageDown => {
            tui.list.clamp(visible);
            match tui.list.handle_event(event) {
                Some(ListEvent::ReachedEnd)
                    if tui.tab == Tab::All && !tui.search.is_filtering() =>
                {
                    Some(Action::LoadMore)
                }
                _ => None,
            }
        }
        TuiEvent::InputChar('m') => Some(Action::LoadMore),
        TuiEvent::InputChar('/') => {
            tui.search.open();
            None
        }
        TuiEvent::Submit => selected.map(|id| {
            tui.details = Some(id);
            Action::RequestDetails(id)
        }),
        TuiEvent::InputChar('f') => selected.map(Action::ToggleFavorite),
        TuiEvent::InputChar('s') => selected.map(Action::Share),
        TuiEvent::Escape => {
            if tui.search.is_filtering() {
                tui.search.clear();
                tui.list.reset();
            }
            None
        }
        _ => None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway: Arc<dyn PokemonGateway> = Arc::new(
        PokeApiGateway::new(Some(config.base_url.clone())).with_page_size(config.page_size),
    );
    let chain = Arc::new(ShareChain::from_config(&config));
    info!(
        "Starting with gateway {} (page size {}), share tiers {:?}",
        gateway.name(),
        config.page_size,
        chain.tiers()
    );

    let mut app = App::new(gateway);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.store.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = dispatch(&mut tui, &app, &event) {
                let effect = update(&mut app, action);
                should_quit |= run_effect(effect, &app, &chain, &tx);
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= run_effect(effect, &app, &chain, &tx);
        }

        if should_quit {
            break;
        }
    }

    info!(
        "Shutting down with {} Pokémon loaded, {} favorites",
        app.store.list().len(),
        app.store.favorites().len()
    );
    ratatui::restore();
    Ok(())
}

/// Starts the I/O an effect asks for. Returns `true` on `Effect::Quit`.
fn run_effect(
    effect: Effect,
    app: &App,
    chain: &Arc<ShareChain>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    match effect {
        Effect::None => {}
        Effect::FetchPage(request) => spawn_page_fetch(app.store.gateway(), request, tx.clone()),
        Effect::FetchDetails(name) => spawn_details_fetch(app.store.gateway(), name, tx.clone()),
        Effect::CopyToClipboard(text) => spawn_share(chain.clone(), text, tx.clone()),
        Effect::Quit => return true,
    }
    false
}

fn spawn_page_fetch(
    gateway: Arc<dyn PokemonGateway>,
    request: PageRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning {:?} page fetch via {}", request, gateway.name());
    tokio::spawn(async move {
        let result = match request {
            PageRequest::Initial => gateway.fetch_list().await,
            PageRequest::More { offset } => gateway.load_more(offset).await,
        };
        if tx.send(Action::PageLoaded { request, result }).is_err() {
            warn!("Failed to send {:?} page: receiver dropped", request);
        }
    });
}

fn spawn_details_fetch(gateway: Arc<dyn PokemonGateway>, name: String, tx: mpsc::Sender<Action>) {
    info!("Spawning details fetch for {}", name);
    tokio::spawn(async move {
        let result = gateway.fetch_details(&name).await;
        if tx.send(Action::DetailsLoaded { name, result }).is_err() {
            warn!("Failed to send details: receiver dropped");
        }
    });
}

fn spawn_share(chain: Arc<ShareChain>, text: String, tx: mpsc::Sender<Action>) {
    tokio::task::spawn_blocking(move || {
        let outcome = chain.copy(&text).map_err(|e| e.to_string());
        if tx.send(Action::ShareFinished(outcome)).is_err() {
            warn!("Failed to send share outcome: receiver dropped");
        }
    });
}
