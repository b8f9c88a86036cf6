pub mod audio_features;
pub mod directory;
pub mod error;
pub mod graph;
pub mod graph_config;
pub mod models;
pub mod mood;
pub mod params;

// Re-export commonly used items
pub use audio_features::average_audio_features;
pub use directory::{ArtistDirectory, fetch_artists};
pub use error::{DiscoveryError, Result};
pub use graph::{
    Graph, GraphLink, GraphNode, LinkKind, NodeKind, SeedArtists, build_graph, build_taste_graph,
    label_distances,
};
pub use graph_config::GraphConfig;
pub use models::{Artist, ArtistRef, AudioFeatures, Seed, SeedType, Track, extract_artists, seed_artist_ids};
pub use mood::Mood;
pub use params::{
    DiscoveryLevel, ParamSet, ParamValue, RecommendationSeeds, discovery_params,
    discovery_params_for_seeds, mood_discovery_params, mood_params, popularity_bounds,
};
