use crate::config::ServerConfig;
use crate::spotify::SpotifyClient;
use std::sync::Arc;
use tastemap_core::{ArtistDirectory, GraphConfig};

pub struct AppState {
    pub directory: Arc<dyn ArtistDirectory>,
    pub graph_config: GraphConfig,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        let client = SpotifyClient::new(
            config.spotify_api_base.clone(),
            config.access_token.clone(),
            config.cache_ttl,
        );

        Self::with_directory(Arc::new(client), config.graph.clone())
    }

    pub fn with_directory(directory: Arc<dyn ArtistDirectory>, graph_config: GraphConfig) -> Self {
        Self {
            directory,
            graph_config,
        }
    }
}
