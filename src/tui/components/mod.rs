//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top status bar with tab counters and status message
//! - `DetailsPanel`: Overlay for a single Pokémon
//! - `LandingPage`: Welcome, loading, empty and error splashes
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `PokemonListState`: Cursor over the visible list, reports when the end is reached
//! - `SearchBar`: Name filter input
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reading `App` directly. This keeps dependencies explicit and components
//! testable.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! DetailsPanel { summary, error: None }.render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! details_panel.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (Top status bar)
//! ├── pokemon_list.rs   (Scrollable list + cursor state)
//! ├── details_panel.rs  (Details overlay)
//! ├── search_bar.rs     (Name filter)
//! └── landing.rs        (Splash screens)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod details_panel;
pub mod landing;
pub mod pokemon_list;
pub mod search_bar;
pub use details_panel::DetailsPanel;
pub use landing::{LandingPage, Splash};
pub use pokemon_list::{ListEvent, PokemonList, PokemonListState};
pub use search_bar::{SearchBar, SearchEvent};
