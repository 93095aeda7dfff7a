use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde_json::{json, Value};
use tower::ServiceExt;

use guard_rounds::config::EnvironmentConfig;
use guard_rounds::models::{Checkpoint, Round, RoundStatus};
use guard_rounds::repositories::InMemoryStore;
use guard_rounds::routes::create_router;
use guard_rounds::state::AppState;

// Ruta R1: P1 sin GPS, P2 con GPS @ -34.98,-71.23 r=30. Ronda 101 sobre R1.
fn create_test_store() -> Arc<InMemoryStore> {
    let checkpoints = vec![
        Checkpoint {
            id: 1,
            route_id: 1,
            name: "P1".to_string(),
            sequence_index: 0,
            latitude: None,
            longitude: None,
            radius_m: None,
        },
        Checkpoint {
            id: 2,
            route_id: 1,
            name: "P2".to_string(),
            sequence_index: 1,
            latitude: Some(-34.98),
            longitude: Some(-71.23),
            radius_m: Some(30.0),
        },
        Checkpoint {
            id: 3,
            route_id: 2,
            name: "Bodega".to_string(),
            sequence_index: 0,
            latitude: None,
            longitude: None,
            radius_m: None,
        },
    ];
    let rounds = vec![Round {
        id: 101,
        guard_id: 12,
        route_id: 1,
        scheduled_date: NaiveDate::from_ymd_opt(2025, 8, 18).unwrap(),
        start_time: NaiveTime::from_hms_opt(20, 0, 0).unwrap(),
        end_time: Some(NaiveTime::from_hms_opt(21, 0, 0).unwrap()),
        status: RoundStatus::Pending,
    }];
    Arc::new(InMemoryStore::new(checkpoints, rounds))
}

fn create_test_app(store: Arc<InMemoryStore>) -> Router {
    create_router(AppState::from_store(store, EnvironmentConfig::default()))
}

async fn post_marking(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/marcajes")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app(create_test_store());
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_complete_round_over_http() {
    let store = create_test_store();
    let app = create_test_app(store.clone());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["roundCompleted"], false);
    assert_eq!(body["progress"], json!({ "current": 1, "total": 2 }));
    assert_eq!(body["status"], "EN_PROGRESO");
    assert!(body["id_marcaje"].is_i64());

    let (status, body) = post_marking(
        &app,
        json!({ "id_ronda": 101, "id_punto": 2, "latitud": -34.98, "longitud": -71.23 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["roundCompleted"], true);
    assert_eq!(body["progress"], json!({ "current": 2, "total": 2 }));
    assert_eq!(store.round(101).await.unwrap().status, RoundStatus::Completed);

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ALREADY_MARKED");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_out_of_order_over_http() {
    let store = create_test_store();
    let app = create_test_app(store.clone());

    let (status, body) = post_marking(
        &app,
        json!({ "id_ronda": 101, "id_punto": "P2", "latitud": -34.98, "longitud": -71.23 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_ORDER");
    assert_eq!(body["details"]["expected"], "P1");
    assert_eq!(store.marking_count().await, 0);
}

#[tokio::test]
async fn test_display_name_resolves_like_id() {
    let app = create_test_app(create_test_store());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": "P1" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["punto"], "P1");
    assert_eq!(body["progress"]["current"], 1);
}

#[tokio::test]
async fn test_out_of_range_carries_distance() {
    let app = create_test_app(create_test_store());
    post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1 })).await;

    // 31 m al norte del punto P2
    let latitude = -34.98 + (31.0_f64 / 6_371_000.0).to_degrees();
    let (status, body) = post_marking(
        &app,
        json!({ "id_ronda": 101, "id_punto": 2, "latitud": latitude, "longitud": -71.23 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "OUT_OF_RANGE");
    assert_eq!(body["details"]["distance"], 31);
    assert_eq!(body["details"]["radius"], 30.0);
}

#[tokio::test]
async fn test_missing_location_for_gps_checkpoint() {
    let app = create_test_app(create_test_store());
    post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1 })).await;

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": 2 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_LOCATION");
}

#[tokio::test]
async fn test_checkpoint_not_in_route() {
    let app = create_test_app(create_test_store());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": "Bodega" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "CHECKPOINT_NOT_IN_ROUTE");
}

#[tokio::test]
async fn test_not_found_cases() {
    let app = create_test_app(create_test_store());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": "QR-XYZ" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "CHECKPOINT_NOT_FOUND");

    let (status, body) = post_marking(&app, json!({ "id_ronda": 999, "id_punto": 1 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUND_NOT_FOUND");
}

#[tokio::test]
async fn test_incomplete_location_is_rejected_before_validation() {
    let store = create_test_store();
    let app = create_test_app(store.clone());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1, "latitud": -34.98 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(store.marking_count().await, 0);
}

#[tokio::test]
async fn test_round_progress_endpoint() {
    let app = create_test_app(create_test_store());

    let (status, body) = get(&app, "/rondas/101/progreso").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "PENDIENTE");
    assert_eq!(body["progress"], json!({ "current": 0, "total": 2 }));
    assert_eq!(body["next_checkpoint"]["nombre"], "P1");

    post_marking(&app, json!({ "id_ronda": 101, "id_punto": 1 })).await;

    let (_, body) = get(&app, "/rondas/101/progreso").await;
    assert_eq!(body["status"], "EN_PROGRESO");
    assert_eq!(body["markings"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["next_checkpoint"]["nombre"], "P2");

    let (status, _) = get(&app, "/rondas/555/progreso").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_route_checkpoints_endpoint() {
    let app = create_test_app(create_test_store());

    let (status, body) = get(&app, "/rutas/1/puntos").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["nombre"].as_str())
        .collect();
    assert_eq!(names, vec!["P1", "P2"]);
    assert_eq!(body[1]["radio_m"], 30.0);

    let (status, _) = get(&app, "/rutas/77/puntos").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body_returns_json_bad_request() {
    let store = create_test_store();
    let app = create_test_app(store.clone());

    let (status, body) = post_marking(
        &app,
        json!({ "id_ronda": 101, "id_punto": 1, "latitud": "abc", "longitud": -71.23 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["error"].is_string());

    let (status, body) = post_marking(&app, json!({ "id_ronda": 101 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    assert_eq!(store.marking_count().await, 0);
}
