use async_trait::async_trait;
use moka::future::Cache;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tastemap_core::{Artist, ArtistDirectory, AudioFeatures, DiscoveryError, Result};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyImage {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
    pub popularity: Option<u8>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

impl From<SpotifyArtist> for Artist {
    fn from(artist: SpotifyArtist) -> Self {
        Artist {
            id: artist.id,
            name: artist.name,
            popularity: artist.popularity,
            genres: artist.genres,
            image_url: artist.images.into_iter().next().map(|image| image.url),
        }
    }
}

/// `/artists` marks unknown ids with `null`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyArtistsResponse {
    pub artists: Vec<Option<SpotifyArtist>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyRelatedArtistsResponse {
    pub artists: Vec<SpotifyArtist>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpotifyAudioFeaturesResponse {
    pub audio_features: Vec<Option<AudioFeatures>>,
}

pub struct SpotifyClient {
    client: Client,
    base_url: String,
    access_token: String,
    cache: Cache<String, String>, // Cache raw JSON responses
}

impl SpotifyClient {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(cache_ttl)
            .build();

        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            cache,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, operation: &'static str, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);

        // Check cache first
        if let Some(cached_response) = self.cache.get(&url).await {
            return parse_response(operation, &cached_response);
        }

        debug!(%url, operation, "requesting spotify");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| DiscoveryError::upstream(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::upstream(operation, format!("HTTP {}", status)));
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| DiscoveryError::upstream(operation, e.to_string()))?;

        let parsed = parse_response(operation, &response_text)?;

        // Only cache responses that parsed
        self.cache.insert(url, response_text).await;

        Ok(parsed)
    }
}

fn parse_response<T: DeserializeOwned>(operation: &'static str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| DiscoveryError::upstream(operation, format!("malformed response: {}", e)))
}

fn join_ids(ids: &[String]) -> String {
    ids.iter()
        .map(|id| urlencoding::encode(id).into_owned())
        .collect::<Vec<_>>()
        .join(",")
}

#[async_trait]
impl ArtistDirectory for SpotifyClient {
    async fn get_artists(&self, ids: &[String]) -> Result<Vec<Artist>> {
        let path = format!("/artists?ids={}", join_ids(ids));
        let response: SpotifyArtistsResponse = self.get_json("artist lookup", &path).await?;

        Ok(response.artists.into_iter().flatten().map(Artist::from).collect())
    }

    async fn get_related_artists(&self, artist_id: &str) -> Result<Vec<Artist>> {
        let path = format!("/artists/{}/related-artists", urlencoding::encode(artist_id));
        let response: SpotifyRelatedArtistsResponse = self.get_json("related artists", &path).await?;

        Ok(response.artists.into_iter().map(Artist::from).collect())
    }

    async fn get_audio_features(&self, track_ids: &[String]) -> Result<Vec<Option<AudioFeatures>>> {
        let path = format!("/audio-features?ids={}", join_ids(track_ids));
        let response: SpotifyAudioFeaturesResponse = self.get_json("audio features", &path).await?;

        Ok(response.audio_features)
    }
}
