use std::time::Duration;
use tastemap_core::GraphConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_CACHE_TTL_SECS: u64 = 60 * 60; // 1 hour

pub struct ServerConfig {
    pub bind_addr: String,
    pub spotify_api_base: String,
    /// Issued elsewhere; used as-is
    pub access_token: String,
    pub cache_ttl: Duration,
    pub graph: GraphConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token = lookup("SPOTIFY_ACCESS_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or("SPOTIFY_ACCESS_TOKEN environment variable must be set")?;

        let cache_ttl_secs = match lookup("CACHE_TTL_SECS") {
            Some(value) => value.parse::<u64>()?,
            None => DEFAULT_CACHE_TTL_SECS,
        };

        let mut graph = GraphConfig::default();
        if let Some(value) = lookup("GRAPH_EXPANDED_SEEDS") {
            graph.expanded_seed_limit = value.parse()?;
        }
        if let Some(value) = lookup("GRAPH_RELATED_PER_SEED") {
            graph.related_per_seed = value.parse()?;
        }
        if let Some(value) = lookup("GRAPH_LABEL_ITERATIONS") {
            graph.max_label_iterations = value.parse()?;
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            spotify_api_base: lookup("SPOTIFY_API_BASE")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_BASE.to_string()),
            access_token,
            cache_ttl: Duration::from_secs(cache_ttl_secs),
            graph,
        })
    }
}
