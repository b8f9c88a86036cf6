use crate::models::AudioFeatures;

/// Average the non-empty feature vectors field by field.
///
/// Returns `None` when no vector is present; that is a valid "nothing known"
/// answer, not an error. Fields a track did not report were decoded as 0 and
/// count toward the mean.
pub fn average_audio_features(vectors: &[Option<AudioFeatures>]) -> Option<AudioFeatures> {
    let valid: Vec<&AudioFeatures> = vectors.iter().flatten().collect();
    if valid.is_empty() {
        return None;
    }

    let sum = valid
        .iter()
        .fold(AudioFeatures::default(), |mut acc, features| {
            acc.energy += features.energy;
            acc.valence += features.valence;
            acc.danceability += features.danceability;
            acc.acousticness += features.acousticness;
            acc.instrumentalness += features.instrumentalness;
            acc.speechiness += features.speechiness;
            acc.tempo += features.tempo;
            acc
        });

    let count = valid.len() as f64;
    Some(AudioFeatures {
        energy: sum.energy / count,
        valence: sum.valence / count,
        danceability: sum.danceability / count,
        acousticness: sum.acousticness / count,
        instrumentalness: sum.instrumentalness / count,
        speechiness: sum.speechiness / count,
        tempo: sum.tempo / count,
    })
}
