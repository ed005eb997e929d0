//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::gateway::types::capitalize;
use crate::gateway::{GatewayError, PokemonDetails, PokemonGateway, PokemonSummary, PokemonType};

/// A scripted gateway: pages are served in order, details are synthesized
/// from the requested name. Calls are recorded for assertions.
#[derive(Default)]
pub struct StubGateway {
    pages: Mutex<VecDeque<Result<Vec<PokemonSummary>, GatewayError>>>,
    list_calls: Mutex<usize>,
    offsets: Mutex<Vec<usize>>,
}

impl StubGateway {
    pub fn with_pages(pages: Vec<Result<Vec<PokemonSummary>, GatewayError>>) -> Self {
        Self {
            pages: Mutex::new(pages.into()),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.offsets.lock().unwrap().clone()
    }

    fn next_page(&self) -> Result<Vec<PokemonSummary>, GatewayError> {
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl PokemonGateway for StubGateway {
    fn name(&self) -> &str {
        "stub"
    }

    async fn fetch_list(&self) -> Result<Vec<PokemonSummary>, GatewayError> {
        *self.list_calls.lock().unwrap() += 1;
        self.next_page()
    }

    async fn fetch_details(&self, name: &str) -> Result<PokemonDetails, GatewayError> {
        Ok(details(&name.to_lowercase(), &["normal"]))
    }

    async fn load_more(&self, offset: usize) -> Result<Vec<PokemonSummary>, GatewayError> {
        self.offsets.lock().unwrap().push(offset);
        self.next_page()
    }
}

/// Summaries numbered from `offset + 1`, the way the gateway numbers them.
pub fn summaries(offset: usize, names: &[&str]) -> Vec<PokemonSummary> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| PokemonSummary {
            id: (offset + index + 1) as u32,
            name: capitalize(name),
            url: format!("https://pokeapi.co/api/v2/pokemon/{}/", offset + index + 1),
            favorite: false,
            details: None,
        })
        .collect()
}

pub fn details(name: &str, types: &[&str]) -> PokemonDetails {
    PokemonDetails {
        id: 1,
        name: capitalize(name),
        height: 7,
        weight: 69,
        types: types
            .iter()
            .map(|t| PokemonType {
                type_name: t.to_string(),
            })
            .collect(),
        artwork_url: Some(format!("https://img.example/{name}.png")),
    }
}

/// Creates a test App backed by an empty StubGateway.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(StubGateway::default()))
}
