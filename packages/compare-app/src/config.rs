use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use swapi_client::{ShipId, DEFAULT_API_ROOT};

/// Starships preloaded into the catalog when `REQUIRED_SHIP_IDS` is unset.
pub const DEFAULT_REQUIRED_SHIP_IDS: [u32; 12] = [2, 75, 74, 65, 3, 59, 58, 63, 28, 29, 39, 10];

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_root: String,
    pub required_ids: Vec<ShipId>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_vars(
            env::var("SWAPI_API_ROOT").ok(),
            env::var("REQUIRED_SHIP_IDS").ok(),
        )
    }

    fn from_vars(api_root: Option<String>, required_ids: Option<String>) -> Result<Self> {
        let required_ids = match required_ids {
            Some(raw) => parse_ship_ids(&raw)
                .context("REQUIRED_SHIP_IDS must be a comma-separated list of ids")?,
            None => DEFAULT_REQUIRED_SHIP_IDS.into_iter().map(ShipId).collect(),
        };

        Ok(Self {
            api_root: api_root.unwrap_or_else(|| DEFAULT_API_ROOT.to_string()),
            required_ids,
        })
    }
}

/// Parse `"2, 75,10"` into ids, keeping order and duplicates.
pub fn parse_ship_ids(raw: &str) -> Result<Vec<ShipId>> {
    let ids = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<ShipId>()
                .with_context(|| format!("invalid starship id: {:?}", part))
        })
        .collect::<Result<Vec<_>>>()?;

    anyhow::ensure!(!ids.is_empty(), "at least one starship id is required");
    Ok(ids)
}
