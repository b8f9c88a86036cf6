use crate::error::ApiError;
use crate::models::{
    GraphRequest, GraphResponse, GraphStats, HealthResponse, MoodInfo, MoodsResponse, ParamsQuery,
    ParamsResponse,
};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use std::time::Instant;
use tastemap_core::{
    DiscoveryLevel, Graph, Mood, NodeKind, ParamSet, build_taste_graph,
    discovery_params_for_seeds, mood_discovery_params, mood_params,
};
use tracing::info;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "Tastemap API is running".to_string(),
    })
}

pub async fn list_moods() -> Json<MoodsResponse> {
    let moods = Mood::ALL
        .into_iter()
        .map(|mood| MoodInfo {
            name: mood,
            params: ParamSet::from_preset(mood.preset()),
        })
        .collect();

    Json(MoodsResponse { moods })
}

pub async fn recommendation_params(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ParamsQuery>,
) -> Result<Json<ParamsResponse>, ApiError> {
    let seeds = query.seeds();
    let discovery_level = query.discovery_level()?;

    let params = match (query.mood.as_deref(), discovery_level) {
        (Some(mood), Some(level)) => {
            mood_discovery_params(mood, DiscoveryLevel::new(level)?, &seeds)?
        }
        (Some(mood), None) => mood_params(mood, &seeds)?,
        (None, Some(level)) => {
            let level = DiscoveryLevel::new(level)?;
            discovery_params_for_seeds(state.directory.as_ref(), level, &seeds).await?
        }
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either mood or discovery_level is required".to_string(),
            ));
        }
    };

    let query_string = params.to_query_string();
    Ok(Json(ParamsResponse {
        params,
        query: query_string,
    }))
}

pub async fn build_graph(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GraphRequest>,
) -> Result<Json<GraphResponse>, ApiError> {
    let start_time = Instant::now();

    let graph = build_taste_graph(
        state.directory.as_ref(),
        &request.seeds,
        &request.tracks,
        &state.graph_config,
    )
    .await?;

    let duration_ms = start_time.elapsed().as_millis() as u64;
    let stats = graph_stats(&graph, duration_ms);
    info!(
        nodes = graph.nodes.len(),
        links = graph.links.len(),
        duration_ms,
        "taste graph built"
    );

    Ok(Json(GraphResponse {
        nodes: graph.nodes,
        links: graph.links,
        stats,
    }))
}

fn graph_stats(graph: &Graph, duration_ms: u64) -> GraphStats {
    GraphStats {
        seed_count: graph.nodes_of_kind(NodeKind::Seed).count(),
        recommendation_count: graph.nodes_of_kind(NodeKind::Recommendation).count(),
        related_count: graph.nodes_of_kind(NodeKind::Related).count(),
        unreachable_count: graph.nodes.iter().filter(|node| !node.is_reachable()).count(),
        duration_ms,
    }
}
