use crate::audio_features::average_audio_features;
use crate::directory::{ArtistDirectory, AUDIO_FEATURES_BATCH_SIZE};
use crate::error::{DiscoveryError, Result};
use crate::models::AudioFeatures;
use crate::mood::{self, MoodPreset};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

pub const MAX_LIMIT: usize = 100;
pub const MAX_SEEDS: usize = 5;

// Below this level min/max windows are emitted around the seed features
const WINDOW_THRESHOLD: u8 = 50;
const FEATURE_SPREAD: f64 = 0.3;
const TEMPO_SPREAD_BPM: f64 = 30.0;
const MIN_TEMPO_BPM: f64 = 40.0;
const MAX_TEMPO_BPM: f64 = 200.0;

/// Novelty dial: 0 stays close to the seeds, 100 reaches furthest away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DiscoveryLevel(u8);

impl DiscoveryLevel {
    pub const MIN: DiscoveryLevel = DiscoveryLevel(0);
    pub const MAX: DiscoveryLevel = DiscoveryLevel(100);

    pub fn new(level: i64) -> Result<Self> {
        if (0..=100).contains(&level) {
            Ok(Self(level as u8))
        } else {
            Err(DiscoveryError::OutOfRangeDiscoveryLevel(level))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    fn variance(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl TryFrom<i64> for DiscoveryLevel {
    type Error = DiscoveryError;

    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

/// `(min_popularity, max_popularity)` for a discovery level.
///
/// Level 0 pins results to the most popular artists; level 100 opens the
/// range to `[0, 50]`.
pub fn popularity_bounds(level: DiscoveryLevel) -> (u8, u8) {
    let level = f64::from(level.value());
    let min = (100.0 - level * 1.5).max(0.0).round();
    let max = (100.0 - level * 0.5).max(30.0).round();
    (min as u8, max as u8)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Integer(i64),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Two decimals, ties rounded away from zero (`0.125` -> `"0.13"`).
    fn fixed2(value: f64) -> Self {
        ParamValue::Text(format!("{:.2}", (value * 100.0).round() / 100.0))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Integer(value) => write!(f, "{}", value),
            ParamValue::Number(value) => write!(f, "{}", value),
            ParamValue::Text(value) => f.write_str(value),
        }
    }
}

/// Recommendation query parameters in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.entries.push((key.into(), value));
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Preset keys and values in table order.
    pub fn from_preset(preset: &MoodPreset) -> Self {
        let mut params = Self::new();
        append_preset(&mut params, preset);
        params
    }

    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(&value.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl Serialize for ParamSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Seeds and page size shared by every recommendation query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationSeeds {
    pub seed_tracks: Vec<String>,
    pub seed_artists: Vec<String>,
    pub limit: usize,
}

impl Default for RecommendationSeeds {
    fn default() -> Self {
        Self {
            seed_tracks: Vec::new(),
            seed_artists: Vec::new(),
            limit: MAX_LIMIT,
        }
    }
}

impl RecommendationSeeds {
    pub fn new(seed_tracks: Vec<String>, seed_artists: Vec<String>) -> Self {
        Self {
            seed_tracks,
            seed_artists,
            ..Self::default()
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Track seeds win; artist seeds fill whatever is left of the five slots.
    fn base_params(&self) -> ParamSet {
        let mut params = ParamSet::new();
        params.insert("limit", ParamValue::Integer(self.limit.min(MAX_LIMIT) as i64));

        if !self.seed_tracks.is_empty() {
            let tracks: Vec<&str> = self
                .seed_tracks
                .iter()
                .take(MAX_SEEDS)
                .map(String::as_str)
                .collect();
            params.insert("seed_tracks", ParamValue::Text(tracks.join(",")));
        }

        let remaining_slots = MAX_SEEDS.saturating_sub(self.seed_tracks.len());
        if !self.seed_artists.is_empty() && remaining_slots > 0 {
            let artists: Vec<&str> = self
                .seed_artists
                .iter()
                .take(remaining_slots)
                .map(String::as_str)
                .collect();
            params.insert("seed_artists", ParamValue::Text(artists.join(",")));
        }

        params
    }
}

fn append_preset(params: &mut ParamSet, preset: &MoodPreset) {
    for &(key, value) in preset {
        params.insert(key, ParamValue::Number(value));
    }
}

fn append_popularity(params: &mut ParamSet, level: DiscoveryLevel) {
    let (min, max) = popularity_bounds(level);
    params.insert("min_popularity", ParamValue::Integer(i64::from(min)));
    params.insert("max_popularity", ParamValue::Integer(i64::from(max)));
}

/// Target hints always follow the seeds. Below the threshold a min/max window
/// is added that widens with the level; from the threshold up the window is
/// dropped altogether and only the hints remain.
fn append_feature_window(params: &mut ParamSet, level: DiscoveryLevel, features: &AudioFeatures) {
    let variance = level.variance();
    let windowed = level.value() < WINDOW_THRESHOLD;

    let unit_features = [
        ("energy", features.energy),
        ("valence", features.valence),
        ("danceability", features.danceability),
    ];

    for (name, target) in unit_features {
        let range = FEATURE_SPREAD * variance;
        params.insert(format!("target_{}", name), ParamValue::fixed2(target));
        if windowed {
            params.insert(
                format!("min_{}", name),
                ParamValue::fixed2((target - range).clamp(0.0, 1.0)),
            );
            params.insert(
                format!("max_{}", name),
                ParamValue::fixed2((target + range).clamp(0.0, 1.0)),
            );
        }
    }

    let tempo = features.tempo;
    let tempo_range = TEMPO_SPREAD_BPM * variance;
    params.insert("target_tempo", ParamValue::Integer(tempo.round() as i64));
    if windowed {
        let min_tempo = (tempo - tempo_range).clamp(MIN_TEMPO_BPM, MAX_TEMPO_BPM);
        let max_tempo = (tempo + tempo_range).clamp(MIN_TEMPO_BPM, MAX_TEMPO_BPM);
        params.insert("min_tempo", ParamValue::Integer(min_tempo.round() as i64));
        params.insert("max_tempo", ParamValue::Integer(max_tempo.round() as i64));
    }
}

/// Bias a recommendation query toward a named mood.
pub fn mood_params(mood_name: &str, seeds: &RecommendationSeeds) -> Result<ParamSet> {
    let preset = mood::lookup(mood_name)?;
    let mut params = seeds.base_params();
    append_preset(&mut params, preset);
    Ok(params)
}

/// Control novelty, optionally anchored to the seeds' averaged audio features.
pub fn discovery_params(
    level: DiscoveryLevel,
    seeds: &RecommendationSeeds,
    features: Option<&AudioFeatures>,
) -> ParamSet {
    let mut params = seeds.base_params();
    append_popularity(&mut params, level);

    if let Some(features) = features {
        append_feature_window(&mut params, level, features);
    }

    params
}

/// Mood targets plus discovery popularity bounds.
///
/// The mood already fixes the audio-feature targets, so seed features are not
/// blended in here.
pub fn mood_discovery_params(
    mood_name: &str,
    level: DiscoveryLevel,
    seeds: &RecommendationSeeds,
) -> Result<ParamSet> {
    let preset = mood::lookup(mood_name)?;
    let mut params = seeds.base_params();
    append_preset(&mut params, preset);
    append_popularity(&mut params, level);
    Ok(params)
}

/// [`discovery_params`] with the feature anchor fetched from the directory.
///
/// Audio features are only looked up when track seeds are present.
pub async fn discovery_params_for_seeds<D>(
    directory: &D,
    level: DiscoveryLevel,
    seeds: &RecommendationSeeds,
) -> Result<ParamSet>
where
    D: ArtistDirectory + ?Sized,
{
    let features = if seeds.seed_tracks.is_empty() {
        None
    } else {
        let track_ids: Vec<String> = seeds
            .seed_tracks
            .iter()
            .take(AUDIO_FEATURES_BATCH_SIZE)
            .cloned()
            .collect();
        let vectors = directory.get_audio_features(&track_ids).await?;
        debug!(
            requested = track_ids.len(),
            returned = vectors.len(),
            "fetched seed audio features"
        );
        average_audio_features(&vectors)
    };

    Ok(discovery_params(level, seeds, features.as_ref()))
}
