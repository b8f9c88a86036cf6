use crate::error::{DiscoveryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Query keys and target values for one mood.
pub type MoodPreset = [(&'static str, f64)];

const ENERGETIC: &MoodPreset = &[
    ("target_energy", 0.8),
    ("target_valence", 0.7),
    ("target_danceability", 0.7),
    ("min_tempo", 120.0),
    ("target_tempo", 140.0),
];

const CHILL: &MoodPreset = &[
    ("target_energy", 0.3),
    ("target_valence", 0.5),
    ("target_danceability", 0.4),
    ("max_tempo", 100.0),
    ("target_tempo", 85.0),
];

const FOCUS: &MoodPreset = &[
    ("target_energy", 0.4),
    ("target_valence", 0.4),
    ("target_instrumentalness", 0.7),
    ("max_speechiness", 0.2),
    ("target_tempo", 100.0),
];

const HAPPY: &MoodPreset = &[
    ("target_energy", 0.7),
    ("target_valence", 0.9),
    ("target_danceability", 0.6),
    ("target_tempo", 120.0),
];

const MELANCHOLIC: &MoodPreset = &[
    ("target_energy", 0.3),
    ("target_valence", 0.2),
    ("target_acousticness", 0.6),
    ("max_tempo", 90.0),
    ("target_tempo", 75.0),
];

const PARTY: &MoodPreset = &[
    ("target_energy", 0.9),
    ("target_valence", 0.8),
    ("target_danceability", 0.85),
    ("min_tempo", 120.0),
    ("target_tempo", 128.0),
];

const WORKOUT: &MoodPreset = &[
    ("target_energy", 0.85),
    ("target_danceability", 0.7),
    ("min_tempo", 130.0),
    ("target_tempo", 145.0),
];

const SLEEP: &MoodPreset = &[
    ("target_energy", 0.2),
    ("target_valence", 0.3),
    ("target_acousticness", 0.8),
    ("target_instrumentalness", 0.6),
    ("max_tempo", 70.0),
    ("target_tempo", 60.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Energetic,
    Chill,
    Focus,
    Happy,
    Melancholic,
    Party,
    Workout,
    Sleep,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Energetic,
        Mood::Chill,
        Mood::Focus,
        Mood::Happy,
        Mood::Melancholic,
        Mood::Party,
        Mood::Workout,
        Mood::Sleep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Energetic => "energetic",
            Mood::Chill => "chill",
            Mood::Focus => "focus",
            Mood::Happy => "happy",
            Mood::Melancholic => "melancholic",
            Mood::Party => "party",
            Mood::Workout => "workout",
            Mood::Sleep => "sleep",
        }
    }

    pub fn preset(&self) -> &'static MoodPreset {
        match self {
            Mood::Energetic => ENERGETIC,
            Mood::Chill => CHILL,
            Mood::Focus => FOCUS,
            Mood::Happy => HAPPY,
            Mood::Melancholic => MELANCHOLIC,
            Mood::Party => PARTY,
            Mood::Workout => WORKOUT,
            Mood::Sleep => SLEEP,
        }
    }

    fn available_names() -> String {
        Mood::ALL
            .iter()
            .map(Mood::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = DiscoveryError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| DiscoveryError::InvalidPreset {
                name: s.to_string(),
                available: Mood::available_names(),
            })
    }
}

/// Look up a preset by mood name.
pub fn lookup(name: &str) -> Result<&'static MoodPreset> {
    name.parse::<Mood>().map(|mood| mood.preset())
}
