use std::fmt;

use async_trait::async_trait;

use super::types::{PokemonDetails, PokemonSummary};

/// Errors that can occur while talking to the Pokémon data API.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// Transport failure (DNS, connection refused) or a payload that is not
    /// the JSON shape we expect.
    Network(String),
    /// The API answered with a non-success status.
    Http { status: u16 },
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Network(msg) => write!(f, "network error: {msg}"),
            GatewayError::Http { status } => write!(f, "HTTP error! status: {status}"),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Read-only access to the remote Pokémon catalogue.
///
/// Implementations hold no mutable state; every call is one request.
#[async_trait]
pub trait PokemonGateway: Send + Sync {
    /// Returns the name of the gateway (for logs).
    fn name(&self) -> &str;

    /// First page of the catalogue, numbered from 1.
    async fn fetch_list(&self) -> Result<Vec<PokemonSummary>, GatewayError>;

    /// Details for a single Pokémon, looked up by lower-cased name.
    async fn fetch_details(&self, name: &str) -> Result<PokemonDetails, GatewayError>;

    /// The page starting at `offset`, numbered from `offset + 1`.
    /// An exhausted catalogue yields an empty vector, not an error.
    async fn load_more(&self, offset: usize) -> Result<Vec<PokemonSummary>, GatewayError>;
}
