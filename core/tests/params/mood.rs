use tastemap_core::{
    DiscoveryError, DiscoveryLevel, Mood, ParamSet, ParamValue, RecommendationSeeds,
    mood_discovery_params, mood_params,
};

fn artist_seeds() -> RecommendationSeeds {
    RecommendationSeeds::new(vec![], vec!["a1".into(), "a2".into()])
}

#[test]
fn test_mood_params_copy_preset_verbatim() {
    let params = mood_params("chill", &artist_seeds()).unwrap();

    let keys: Vec<&str> = params.iter().map(|(key, _)| key).collect();
    assert_eq!(
        keys,
        vec![
            "limit",
            "seed_artists",
            "target_energy",
            "target_valence",
            "target_danceability",
            "max_tempo",
            "target_tempo",
        ]
    );
    assert_eq!(params.get("target_energy"), Some(&ParamValue::Number(0.3)));
    assert_eq!(params.get("max_tempo").unwrap().to_string(), "100");
    assert!(!params.contains_key("min_popularity"));
}

#[test]
fn test_mood_name_is_case_insensitive() {
    let params = mood_params(" Party ", &artist_seeds()).unwrap();
    assert_eq!(params.get("target_danceability"), Some(&ParamValue::Number(0.85)));
}

#[test]
fn test_unknown_mood_rejected() {
    let error = mood_params("grumpy", &artist_seeds()).unwrap_err();

    assert!(matches!(error, DiscoveryError::InvalidPreset { ref name, .. } if name == "grumpy"));
    assert!(error.is_precondition());
    let message = error.to_string();
    assert!(message.contains("grumpy"));
    assert!(message.contains("energetic, chill, focus"));
}

#[test]
fn test_mood_and_discovery_union() {
    let level = DiscoveryLevel::new(60).unwrap();
    let params = mood_discovery_params("workout", level, &artist_seeds()).unwrap();

    assert_eq!(params.get("target_energy"), Some(&ParamValue::Number(0.85)));
    assert_eq!(params.get("min_tempo").unwrap().to_string(), "130");
    assert_eq!(params.get("min_popularity"), Some(&ParamValue::Integer(10)));
    assert_eq!(params.get("max_popularity"), Some(&ParamValue::Integer(70)));
    // Seed features are never blended into a mood query
    assert!(!params.contains_key("min_energy"));
    assert_eq!(params.len(), 2 + 4 + 2);
}

#[test]
fn test_mood_and_discovery_checks_mood_first() {
    let level = DiscoveryLevel::new(10).unwrap();
    let result = mood_discovery_params("nope", level, &artist_seeds());
    assert!(matches!(result, Err(DiscoveryError::InvalidPreset { .. })));
}

#[test]
fn test_mood_limit_capped() {
    let seeds = artist_seeds().with_limit(500);
    let params = mood_params("sleep", &seeds).unwrap();
    assert_eq!(params.get("limit"), Some(&ParamValue::Integer(100)));
}

#[test]
fn test_preset_params_match_mood_query() {
    let catalog = ParamSet::from_preset(Mood::Workout.preset());
    let query = mood_params("workout", &RecommendationSeeds::default()).unwrap();

    assert_eq!(catalog.len(), Mood::Workout.preset().len());
    for (key, value) in catalog.iter() {
        assert_eq!(query.get(key), Some(value), "{}", key);
    }
    assert!(!catalog.contains_key("limit"));
}
