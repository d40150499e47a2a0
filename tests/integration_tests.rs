// Integration tests for Pet Match

use actix_web::{test, App};
use pet_match::config::{MatchPolicy, Settings};
use pet_match::core::scoring::{MAX_SCORE, MIN_SCORE};
use pet_match::services::Store;
use pet_match::{configure_app, AppState, Initializer, Matcher, SampleCatalog, Seeder};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.scoring.seed = Some(2024);
    settings.initialization.retry_delay_ms = 1;
    settings
}

fn seeded_state(settings: &Settings) -> AppState {
    let state = AppState::from_settings(settings).unwrap();
    assert!(state.initializer.ensure_initialized(false));
    state
}

/// Seeder whose runs never leave any pets behind
struct EmptyCatalog;

impl Seeder for EmptyCatalog {
    fn seed(&self, _store: &Store, _force: bool) {}
}

fn unseedable_state() -> AppState {
    let store = Arc::new(Store::new());
    let seeder: Arc<dyn Seeder> = Arc::new(EmptyCatalog);

    AppState {
        initializer: Initializer::new(Arc::clone(&store), Arc::clone(&seeder), 3, Duration::from_millis(1)),
        store,
        seeder,
        matcher: Matcher::new(Some(7)),
        policy: MatchPolicy::Append,
    }
}

fn create_user_request(preferences: Value, lifestyle: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "name": "Alex",
            "email": "alex@example.com",
            "preferences": preferences,
            "lifestyle": lifestyle,
            "experience": "Experienced"
        }))
}

fn extract_user_id(body: &Value) -> String {
    body["userId"].as_str().unwrap().to_string()
}

fn assert_sorted_desc(matches: &[Value]) {
    for pair in matches.windows(2) {
        assert!(
            pair[0]["score"].as_f64().unwrap() >= pair[1]["score"].as_f64().unwrap(),
            "Matches not sorted by score"
        );
    }
}

#[actix_web::test]
async fn test_list_pets_returns_catalog() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pets"].as_array().unwrap().len(), SampleCatalog::SIZE);
}

#[actix_web::test]
async fn test_list_pets_seeds_empty_store() {
    let state = AppState::from_settings(&test_settings()).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["pets"].as_array().unwrap().len(), SampleCatalog::SIZE);
}

#[actix_web::test]
async fn test_create_pet_then_list() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/pets")
        .set_json(json!({
            "name": "Ziggy",
            "type": "Bird",
            "age": 1,
            "description": "Sings at dawn",
            "personality": ["Vocal", "Social"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let created: Value = test::read_body_json(resp).await;
    assert!(created["pet"]["imageUrl"].as_str().unwrap().starts_with("https://"));

    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let pets = body["pets"].as_array().unwrap();

    assert_eq!(pets.len(), SampleCatalog::SIZE + 1);
    assert!(pets.iter().any(|p| p["id"] == created["pet"]["id"]));
}

#[actix_web::test]
async fn test_create_pet_without_personality_rejected() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/pets")
        .set_json(json!({
            "name": "Ziggy",
            "type": "Bird",
            "age": 1,
            "description": "Sings at dawn"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Missing required fields");
    assert!(body["required"].as_array().unwrap().contains(&json!("personality")));
}

#[actix_web::test]
async fn test_create_pet_negative_age_rejected() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/pets")
        .set_json(json!({
            "name": "Ziggy",
            "type": "Bird",
            "age": -1,
            "description": "Sings at dawn",
            "personality": "Vocal"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "age must be a non-negative number");
    assert!(body.get("required").is_none());
}

#[actix_web::test]
async fn test_create_pet_numeric_string_age() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/pets")
        .set_json(json!({
            "name": "Ziggy",
            "type": "Bird",
            "age": "2",
            "description": "Sings at dawn",
            "personality": "Vocal"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["pet"]["age"], 2.0);
}

#[actix_web::test]
async fn test_create_user_missing_fields_rejected() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({"name": "Alex", "preferences": ["Dogs"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_malformed_json_rejected() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request body");
}

#[actix_web::test]
async fn test_end_to_end_matching() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;
    let req = create_user_request(json!(["Dogs"]), "Active").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = extract_user_id(&created);

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": user_id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), SampleCatalog::SIZE);
    assert_sorted_desc(matches);
    for m in matches {
        let score = m["score"].as_f64().unwrap();
        assert!((MIN_SCORE..=MAX_SCORE).contains(&score), "Score {} out of range", score);
        assert_eq!(m["status"], "pending");
        assert_eq!(m["userId"], user_id.as_str());
        assert_eq!(m["pet"]["id"], m["petId"]);
    }
    // No language model configured
    assert!(body["warning"].is_object());

    // Read path returns the same rows
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/match?userId={}", user_id))
        .to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["matches"].as_array().unwrap().len(), SampleCatalog::SIZE);
    assert!(fetched.get("warning").is_none());
}

#[actix_web::test]
async fn test_dogs_active_user_ranks_dogs_high() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;
    let req = create_user_request(json!(["Dogs"]), "Active").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = extract_user_id(&created);

    let mut dog_scores = Vec::new();
    for _ in 0..25 {
        let req = test::TestRequest::post()
            .uri("/api/v1/match")
            .set_json(json!({"userId": user_id}))
            .to_request();
        let _: Value = test::call_and_read_body_json(&app, req).await;
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/match?userId={}", user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    for m in body["matches"].as_array().unwrap() {
        if m["pet"]["type"] == "Dog" {
            dog_scores.push(m["score"].as_f64().unwrap());
        }
    }

    // 25 requests x 4 dogs, appended without dedup
    assert_eq!(dog_scores.len(), 100);
    let mean = dog_scores.iter().sum::<f64>() / dog_scores.len() as f64;
    assert!(mean >= 0.75, "Mean dog score {} below 0.75", mean);
}

#[actix_web::test]
async fn test_replace_policy_keeps_one_row_per_pet() {
    let mut settings = test_settings();
    settings.matching.policy = MatchPolicy::Replace;
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&settings)))).await;
    let req = create_user_request(json!(["Cats"]), "Relaxed").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = extract_user_id(&created);

    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/api/v1/match")
            .set_json(json!({"userId": user_id}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["matches"].as_array().unwrap().len(), SampleCatalog::SIZE);
    }
}

#[actix_web::test]
async fn test_match_fails_when_store_cannot_be_seeded() {
    let app = test::init_service(App::new().configure(configure_app(unseedable_state()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": "anyone"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "System initialization failed. Please try again later."}));
}

#[actix_web::test]
async fn test_force_reload_replaces_pets() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;
    let req = create_user_request(json!(["Cats"]), "Relaxed").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = extract_user_id(&created);

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": user_id}))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let old_ids: Vec<Value> = first["matches"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["petId"].clone())
        .collect();

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": user_id, "forceReload": true}))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    let matches = second["matches"].as_array().unwrap();

    // Earlier rows stay but their pets are gone
    assert_eq!(matches.len(), SampleCatalog::SIZE * 2);
    let orphaned: Vec<&Value> = matches.iter().filter(|m| m["pet"].is_null()).collect();
    assert_eq!(orphaned.len(), SampleCatalog::SIZE);
    assert!(orphaned.iter().all(|m| old_ids.contains(&m["petId"])));

    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let pets = body["pets"].as_array().unwrap();
    assert_eq!(pets.len(), SampleCatalog::SIZE);
    assert!(pets.iter().all(|p| !old_ids.contains(&p["id"])));
}

#[actix_web::test]
async fn test_match_errors() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": "nobody"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User not found");

    let req = test::TestRequest::get().uri("/api/v1/match").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn test_delegated_failure_still_returns_matches() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let mut settings = test_settings();
    settings.scoring.openai_api_key = Some("sk-test".to_string());
    settings.scoring.openai_base_url = server.url();
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&settings)))).await;
    let req = create_user_request(json!(["Small animals"]), "Moderate").to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let user_id = extract_user_id(&created);

    let req = test::TestRequest::post()
        .uri("/api/v1/match")
        .set_json(json!({"userId": user_id}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), SampleCatalog::SIZE);
    for m in matches {
        let score = m["score"].as_f64().unwrap();
        assert!((MIN_SCORE..=MAX_SCORE).contains(&score));
    }
    assert_eq!(body["warning"]["error"], "Failed to generate AI-powered matches");
}

#[actix_web::test]
async fn test_debug_status_is_read_only() {
    let state = AppState::from_settings(&test_settings()).unwrap();
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get().uri("/api/v1/debug/status").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["petCount"], 0);
    assert_eq!(body["initialized"], false);
    assert_eq!(body["verified"], false);
    assert!(body["petSample"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_debug_reseed() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/debug/reseed")
        .set_json(json!({"reinitialize": true}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["initialization"], "succeeded");
    assert_eq!(body["petCount"], SampleCatalog::SIZE);

    // Body is optional
    let req = test::TestRequest::post().uri("/api/v1/debug/reseed").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["petCount"], SampleCatalog::SIZE);

    let req = test::TestRequest::get().uri("/api/v1/debug/status").to_request();
    let status: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(status["petSample"].as_array().unwrap().len(), 3);
    assert_eq!(status["initialized"], true);
}

#[actix_web::test]
async fn test_debug_reseed_rejects_malformed_body() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;
    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let before: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/debug/reseed")
        .set_json(json!({"reinitialize": "yes"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid request body");

    // Nothing was reseeded
    let req = test::TestRequest::get().uri("/api/v1/pets").to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(before["pets"], after["pets"]);
}

#[actix_web::test]
async fn test_health() {
    let app = test::init_service(App::new().configure(configure_app(seeded_state(&test_settings())))).await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["petCount"], SampleCatalog::SIZE);
}
