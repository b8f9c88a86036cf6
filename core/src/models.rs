use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

// Track seeds fall back to the artists of this many recommended tracks
const TRACK_SEED_ARTIST_WINDOW: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedType {
    Artist,
    Track,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    pub id: String,
    #[serde(rename = "type")]
    pub seed_type: SeedType,
}

impl Seed {
    pub fn artist(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seed_type: SeedType::Artist,
        }
    }

    pub fn track(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            seed_type: SeedType::Track,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    /// 0-100, absent when the directory did not report it
    #[serde(default)]
    pub popularity: Option<u8>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Artist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            popularity: None,
            genres: Vec::new(),
            image_url: None,
        }
    }

    pub fn with_popularity(mut self, popularity: u8) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }
}

/// The artist stub embedded in a track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
}

impl ArtistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            uri: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(default)]
    pub uri: String,
    pub artists: Vec<ArtistRef>,
}

impl Track {
    pub fn new(id: impl Into<String>, artists: Vec<ArtistRef>) -> Self {
        let id = id.into();
        Self {
            uri: format!("spotify:track:{}", id),
            id,
            artists,
        }
    }
}

/// Per-track audio analysis. Fields missing on the wire decode as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    /// BPM
    pub tempo: f64,
}

/// Unique artists referenced by `tracks`, in first-seen order.
pub fn extract_artists(tracks: &[Track]) -> Vec<ArtistRef> {
    let mut seen = FxHashSet::default();

    tracks
        .iter()
        .flat_map(|track| track.artists.iter())
        .filter(|artist| seen.insert(artist.id.as_str()))
        .cloned()
        .collect()
}

/// Artist ids to treat as graph seeds.
///
/// Artist seeds are used directly. When the request was seeded only by tracks,
/// the artists of the first few recommended tracks stand in for them.
pub fn seed_artist_ids(seeds: &[Seed], tracks: &[Track]) -> Vec<String> {
    let artist_ids: Vec<String> = seeds
        .iter()
        .filter(|seed| seed.seed_type == SeedType::Artist)
        .map(|seed| seed.id.clone())
        .collect();

    if !artist_ids.is_empty() {
        return artist_ids;
    }

    let has_track_seeds = seeds.iter().any(|seed| seed.seed_type == SeedType::Track);
    if !has_track_seeds || tracks.is_empty() {
        return artist_ids;
    }

    let window = &tracks[..tracks.len().min(TRACK_SEED_ARTIST_WINDOW)];
    extract_artists(window)
        .into_iter()
        .map(|artist| artist.id)
        .collect()
}
