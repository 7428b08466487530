//! Pure Star Wars API (SWAPI) client.
//!
//! A minimal client for the starship resources of the SWAPI catalog. It only
//! knows how to issue a request and how to decode a response body; sequencing
//! and aggregation of fetches live with the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use swapi_client::{starship_url, ShipId, SwapiClient, Transport};
//!
//! let client = SwapiClient::new();
//!
//! let url = starship_url(client.base_url(), ShipId(10));
//! let response = client.get(&url).await?;
//! let ship = client.decode(response).await?;
//! println!("{}", ship.name());
//! ```

pub mod error;
pub mod transport;
pub mod types;

pub use error::{Result, SwapiError};
pub use transport::{starship_url, Transport};
pub use types::{ShipId, Starship, StarshipSummary};

use async_trait::async_trait;

pub const DEFAULT_API_ROOT: &str = "https://swapi.dev/api";

/// reqwest-backed SWAPI client.
///
/// Built without a request timeout: a hung call hangs the fetch that issued it.
#[derive(Clone)]
pub struct SwapiClient {
    client: reqwest::Client,
    base_url: String,
}

impl SwapiClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_API_ROOT.to_string(),
        }
    }

    /// Set a custom API root (mirrors, local fixtures).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for SwapiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for SwapiClient {
    type Response = reqwest::Response;

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(SwapiError::transport)?;

        tracing::debug!(url, status = %resp.status(), "SWAPI response received");
        Ok(resp)
    }

    async fn decode(&self, response: reqwest::Response) -> Result<Starship> {
        response
            .json::<Starship>()
            .await
            .map_err(SwapiError::decode)
    }
}
