use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tastemap_core::{Artist, ArtistDirectory, AudioFeatures, DiscoveryError, GraphConfig, Result};
use tastemap_web::create_router;
use tastemap_web::state::AppState;
use tower::util::ServiceExt;

pub struct TestArtists {
    pub taylor: Artist,
    pub olivia: Artist,
    pub billie: Artist,
    pub finneas: Artist,
}

impl TestArtists {
    pub fn new() -> Self {
        Self {
            taylor: Artist::new("06HL4z0CvFAxyc27GXpf02", "Taylor Swift").with_popularity(100),
            olivia: Artist::new("1McMsnEElThX1knmY4oliG", "Olivia Rodrigo").with_popularity(88),
            billie: Artist::new("6qqNVTkY8uBg9cP3Jd7DAH", "Billie Eilish").with_popularity(91),
            finneas: Artist::new("37M5pPGs6V1fchFJSgCguX", "FINNEAS").with_popularity(70),
        }
    }
}

#[derive(Default)]
pub struct StubDirectory {
    artists: HashMap<String, Artist>,
    related: HashMap<String, Vec<Artist>>,
    audio_features: HashMap<String, AudioFeatures>,
    offline: bool,
}

impl StubDirectory {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ArtistDirectory for StubDirectory {
    async fn get_artists(&self, ids: &[String]) -> Result<Vec<Artist>> {
        if self.offline {
            return Err(DiscoveryError::upstream("artist lookup", "connection refused"));
        }
        Ok(ids.iter().filter_map(|id| self.artists.get(id).cloned()).collect())
    }

    async fn get_related_artists(&self, artist_id: &str) -> Result<Vec<Artist>> {
        if self.offline {
            return Err(DiscoveryError::upstream("related artists", "connection refused"));
        }
        Ok(self.related.get(artist_id).cloned().unwrap_or_default())
    }

    async fn get_audio_features(&self, track_ids: &[String]) -> Result<Vec<Option<AudioFeatures>>> {
        if self.offline {
            return Err(DiscoveryError::upstream("audio features", "connection refused"));
        }
        Ok(track_ids.iter().map(|id| self.audio_features.get(id).copied()).collect())
    }
}

/// Taylor's related artists are Olivia and FINNEAS; track t1 sounds like
/// energy 0.6 / tempo 118.
pub fn create_test_directory(artists: &TestArtists) -> StubDirectory {
    let mut directory = StubDirectory::default();
    for artist in [&artists.taylor, &artists.olivia, &artists.billie, &artists.finneas] {
        directory.artists.insert(artist.id.clone(), artist.clone());
    }
    directory.related.insert(
        artists.taylor.id.clone(),
        vec![artists.olivia.clone(), artists.finneas.clone()],
    );
    directory.audio_features.insert(
        "t1".to_string(),
        AudioFeatures {
            energy: 0.6,
            valence: 0.5,
            danceability: 0.7,
            tempo: 118.0,
            ..AudioFeatures::default()
        },
    );
    directory
}

pub fn create_test_app_with(directory: StubDirectory) -> Router {
    let app_state = Arc::new(AppState::with_directory(
        Arc::new(directory),
        GraphConfig::default(),
    ));
    create_router(app_state)
}

pub fn create_test_app() -> (Router, TestArtists) {
    let test_artists = TestArtists::new();
    let app = create_test_app_with(create_test_directory(&test_artists));
    (app, test_artists)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}
