use crate::error::Result;
use crate::models::{Artist, AudioFeatures};
use async_trait::async_trait;
use tracing::debug;

/// Most ids the directory accepts in one artist lookup.
pub const ARTIST_BATCH_SIZE: usize = 50;

/// Most ids the directory accepts in one audio-feature lookup.
pub const AUDIO_FEATURES_BATCH_SIZE: usize = 100;

/// Remote catalog of artists, their neighbours and per-track audio analysis.
///
/// Implementations own transport concerns (auth, timeouts, retries). Every
/// method is a suspension point; callers issue them one at a time.
#[async_trait]
pub trait ArtistDirectory: Send + Sync {
    /// Full records for one batch of at most [`ARTIST_BATCH_SIZE`] ids.
    async fn get_artists(&self, ids: &[String]) -> Result<Vec<Artist>>;

    /// Stylistically adjacent artists, possibly none.
    async fn get_related_artists(&self, artist_id: &str) -> Result<Vec<Artist>>;

    /// One entry per id (at most [`AUDIO_FEATURES_BATCH_SIZE`]); `None` where no analysis exists.
    async fn get_audio_features(&self, track_ids: &[String]) -> Result<Vec<Option<AudioFeatures>>>;
}

/// Resolve any number of artist ids, `batch_size` ids per directory call.
///
/// Chunks are requested sequentially. A failing chunk fails the whole
/// resolution rather than leaving holes in the result.
pub async fn fetch_artists<D>(directory: &D, ids: &[String], batch_size: usize) -> Result<Vec<Artist>>
where
    D: ArtistDirectory + ?Sized,
{
    let batch_size = batch_size.clamp(1, ARTIST_BATCH_SIZE);
    let mut artists = Vec::with_capacity(ids.len());

    for (chunk_index, chunk) in ids.chunks(batch_size).enumerate() {
        debug!(chunk_index, chunk_len = chunk.len(), "resolving artist batch");
        artists.extend(directory.get_artists(chunk).await?);
    }

    Ok(artists)
}
