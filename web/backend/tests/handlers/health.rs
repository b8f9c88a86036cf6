use crate::fixtures::{create_test_app, get_json};
use axum::http::StatusCode;

#[tokio::test]
async fn test_health_check() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "Tastemap API is running");
}

#[tokio::test]
async fn test_list_moods_returns_every_preset() {
    let (app, _) = create_test_app();

    let (status, json) = get_json(app, "/api/moods").await;

    assert_eq!(status, StatusCode::OK);
    let moods = json["moods"].as_array().unwrap();
    let names: Vec<&str> = moods.iter().map(|m| m["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec!["energetic", "chill", "focus", "happy", "melancholic", "party", "workout", "sleep"]
    );

    let chill = &moods[1]["params"];
    assert_eq!(chill["target_energy"], 0.3);
    assert_eq!(chill["max_tempo"], 100.0);
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let (app, _) = create_test_app();

    let (status, _) = get_json(app, "/api/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
