pub mod pokeapi;
pub mod provider;
pub mod types;

pub use pokeapi::PokeApiGateway;
pub use provider::{GatewayError, PokemonGateway};
pub use types::{PokemonDetails, PokemonSummary, PokemonType};
