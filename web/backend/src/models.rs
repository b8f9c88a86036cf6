use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use tastemap_core::{GraphLink, GraphNode, Mood, ParamSet, RecommendationSeeds, Seed, Track};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct MoodInfo {
    pub name: Mood,
    pub params: ParamSet,
}

#[derive(Serialize)]
pub struct MoodsResponse {
    pub moods: Vec<MoodInfo>,
}

#[derive(Deserialize)]
pub struct ParamsQuery {
    pub mood: Option<String>,
    /// Raw value, parsed by [`ParamsQuery::discovery_level`]
    pub discovery_level: Option<String>,
    /// Comma-separated track ids
    #[serde(default)]
    pub seed_tracks: String,
    /// Comma-separated artist ids
    #[serde(default)]
    pub seed_artists: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    100
}

impl ParamsQuery {
    pub fn seeds(&self) -> RecommendationSeeds {
        RecommendationSeeds::new(split_ids(&self.seed_tracks), split_ids(&self.seed_artists))
            .with_limit(self.limit)
    }

    pub fn discovery_level(&self) -> Result<Option<i64>, ApiError> {
        match self.discovery_level.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
                ApiError::BadRequest(format!("discovery_level must be an integer, got {}", raw))
            }),
        }
    }
}

fn split_ids(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Serialize)]
pub struct ParamsResponse {
    pub params: ParamSet,
    /// `params` ready to append to a recommendations URL
    pub query: String,
}

/// Seeds and tracks as returned by a recommendations request.
#[derive(Serialize, Deserialize)]
pub struct GraphRequest {
    pub seeds: Vec<Seed>,
    pub tracks: Vec<Track>,
}

#[derive(Serialize, Deserialize)]
pub struct GraphStats {
    pub seed_count: usize,
    pub recommendation_count: usize,
    pub related_count: usize,
    pub unreachable_count: usize,
    pub duration_ms: u64,
}

#[derive(Serialize, Deserialize)]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphLink>,
    pub stats: GraphStats,
}
