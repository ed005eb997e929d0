//! # Core Application Logic
//!
//! This module contains the Pokédex business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Store (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                   ┌────────────┴────────────┐
//!                   ▼                         ▼
//!            ┌────────────┐            ┌────────────┐
//!            │    TUI     │            │  Gateway   │
//!            │  Adapter   │            │ (PokeAPI)  │
//!            │ (ratatui)  │            │            │
//!            └────────────┘            └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Store` and `App` structs, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`config`]: Settings resolution
//! - [`storage`]: Durable key-value slots

pub mod action;
pub mod config;
pub mod state;
pub mod storage;
