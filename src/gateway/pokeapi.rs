//! PokeAPI gateway over plain HTTP GETs.
//!
//! Endpoints (no auth):
//! - `GET {base}/pokemon?limit={n}` for the first page
//! - `GET {base}/pokemon?limit={n}&offset={o}` for later pages
//! - `GET {base}/pokemon/{name}` for details
//!
//! Every endpoint checks the response status before decoding the body.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::provider::{GatewayError, PokemonGateway};
use super::types::{PokemonDetails, PokemonSummary, RawDetails, RawPage};

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_PAGE_SIZE: usize = 20;

pub struct PokeApiGateway {
    base_url: String,
    page_size: usize,
    client: reqwest::Client,
}

impl PokeApiGateway {
    /// `None` means the public PokeAPI. Environment overrides are applied by
    /// `core::config::resolve`, not here.
    pub fn new(base_url: Option<String>) -> Self {
        let final_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url: final_url.trim_end_matches('/').to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sends a GET, rejects non-success statuses and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        debug!("PokeAPI response status: {} ({})", response.status(), response.url());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!("PokeAPI error: HTTP {} for {}", status, response.url());
            return Err(GatewayError::Http { status });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Network(format!("malformed response: {e}")))
    }

    async fn fetch_page(&self, offset: Option<usize>) -> Result<Vec<PokemonSummary>, GatewayError> {
        let url = format!("{}/pokemon", self.base_url);
        let mut request = self.client.get(&url).query(&[("limit", self.page_size)]);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }

        info!(
            "PokeAPI page request: limit={}, offset={:?}",
            self.page_size, offset
        );

        let page: RawPage = self.get_json(request).await?;
        let summaries = page.into_summaries(offset.unwrap_or(0));
        info!("PokeAPI page received: {} entries", summaries.len());
        Ok(summaries)
    }
}

#[async_trait]
impl PokemonGateway for PokeApiGateway {
    fn name(&self) -> &str {
        "pokeapi"
    }

    async fn fetch_list(&self) -> Result<Vec<PokemonSummary>, GatewayError> {
        self.fetch_page(None).await.inspect_err(|e| {
            warn!("Error fetching pokemon list: {}", e);
        })
    }

    async fn fetch_details(&self, name: &str) -> Result<PokemonDetails, GatewayError> {
        let url = format!("{}/pokemon/{}", self.base_url, name.to_lowercase());
        info!("PokeAPI details request: {}", url);

        let raw: RawDetails = self
            .get_json(self.client.get(&url))
            .await
            .inspect_err(|e| warn!("Error fetching details for pokemon {}: {}", name, e))?;
        Ok(PokemonDetails::from(raw))
    }

    async fn load_more(&self, offset: usize) -> Result<Vec<PokemonSummary>, GatewayError> {
        self.fetch_page(Some(offset)).await.inspect_err(|e| {
            warn!("Error fetching more pokemon at offset {}: {}", offset, e);
        })
    }
}
