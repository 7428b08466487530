//! Transport seam between fetch procedures and the network.
//!
//! A fetch is two dependent operations: issue the request, then decode the
//! body of whatever response came back. Keeping them as separate methods lets
//! a caller suspend between them.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ShipId, Starship};

#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Response object produced by [`Transport::get`], before its body is read.
    type Response: Send + 'static;

    /// Issue a GET request. Status codes are not inspected here.
    async fn get(&self, url: &str) -> Result<Self::Response>;

    /// Decode a response body into a starship record.
    async fn decode(&self, response: Self::Response) -> Result<Starship>;
}

/// Resource URL for one starship: `{api_root}/starships/{id}/`.
pub fn starship_url(api_root: &str, id: ShipId) -> String {
    format!("{}/starships/{}/", api_root.trim_end_matches('/'), id)
}
