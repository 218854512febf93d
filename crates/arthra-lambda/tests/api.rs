use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use arthra_lambda::router;
use arthra_lambda::state::AppState;
use arthra_scoring::score_inputs;
use arthra_storage::{MemoryStore, PatientStore};

fn app() -> (Router, Arc<MemoryStore>) {
    let state = AppState::new(MemoryStore::new());
    let store = Arc::clone(&state.store);
    (router(state), store)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_patient(app: &Router) -> Uuid {
    let (status, body) = send_json(
        app,
        "POST",
        "/api/patients",
        Some(json!({
            "first_name": "Rosalind",
            "last_name": "Franklin",
            "dob": "1970-07-25",
            "gender": "F"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn health_check_is_ok() {
    let (app, _) = app();
    let (status, body) = send_json(&app, "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn patient_creation_requires_all_fields() {
    let (app, _) = app();
    let (status, body) = send_json(
        &app,
        "POST",
        "/api/patients",
        Some(json!({ "first_name": "Rosalind", "dob": "1970-07-25", "gender": "F" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("last_name"));

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/patients",
        Some(json!({
            "first_name": "Rosalind",
            "last_name": "Franklin",
            "dob": "25/07/1970",
            "gender": "F"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patients_can_be_fetched_and_searched() {
    let (app, _) = app();
    let id = create_patient(&app).await;

    let (status, body) = send_json(&app, "GET", &format!("/api/patients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["last_name"], "Franklin");
    assert_eq!(body["dob"], "1970-07-25");

    let (status, body) = send_json(&app, "GET", "/api/patients?search=rosalind%20fr", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send_json(&app, "GET", &format!("/api/patients/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn das28_submission_stores_reproducible_score() {
    let (app, store) = app();
    let id = create_patient(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/das28",
        Some(json!({
            "patient_id": id,
            "tender_count": 10,
            "swollen_count": 8,
            "esr_value": 25,
            "global_assessment": 50
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let score = body["das28_score"].as_f64().unwrap();
    assert!((score - 5.515).abs() < 0.001);
    assert_eq!(body["activity"], "high");

    let stored = store.latest_score(id).await.unwrap().unwrap();
    assert_eq!(stored.score.to_bits(), score.to_bits());
    assert_eq!(
        score_inputs(&stored.inputs).unwrap().to_bits(),
        stored.score.to_bits()
    );
}

#[tokio::test]
async fn das28_rejects_invalid_inputs_by_field() {
    let (app, store) = app();
    let id = create_patient(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/das28",
        Some(json!({
            "patient_id": id,
            "tender_count": -1,
            "swollen_count": 0,
            "esr_value": 1,
            "global_assessment": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("tender_count"));

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/das28",
        Some(json!({
            "patient_id": id,
            "tender_count": 0,
            "swollen_count": 0,
            "esr_value": 0,
            "global_assessment": 0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("esr_value"));

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/das28",
        Some(json!({ "patient_id": id, "tender_count": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.latest_score(id).await.unwrap().is_none());
}

#[tokio::test]
async fn das28_requires_patient_id_as_uuid_string() {
    let (app, _) = app();
    let inputs = |patient_id: Value| {
        json!({
            "patient_id": patient_id,
            "tender_count": 1,
            "swollen_count": 1,
            "esr_value": 10,
            "global_assessment": 10
        })
    };

    let (status, body) = send_json(&app, "POST", "/api/das28", Some(inputs(json!(42)))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid patient_id: must be a UUID string");

    let (status, body) = send_json(&app, "POST", "/api/das28", Some(inputs(Value::Null))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid patient_id: missing");

    let (status, body) =
        send_json(&app, "POST", "/api/das28", Some(inputs(json!("not-a-uuid")))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("invalid patient_id: "));
}

#[tokio::test]
async fn das28_for_unknown_patient_is_not_found() {
    let (app, _) = app();
    let (status, _) = send_json(
        &app,
        "POST",
        "/api/das28",
        Some(json!({
            "patient_id": Uuid::new_v4(),
            "tender_count": 1,
            "swollen_count": 1,
            "esr_value": 10,
            "global_assessment": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn allergies_skip_incomplete_entries() {
    let (app, _) = app();
    let id = create_patient(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/allergies",
        Some(json!({
            "patient_id": id,
            "entries": [
                { "type": "Allergy", "description": "pollen" },
                { "type": "Allergy" },
                { "type": "Addiction", "description": "nicotine" }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let added = body["added"].as_array().unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(added[0]["type"], "Allergy");
    assert_eq!(added[1]["description"], "nicotine");

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/allergies",
        Some(json!({ "patient_id": id, "entries": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/allergies",
        Some(json!({
            "patient_id": id,
            "entries": [{ "type": "Intolerance", "description": "lactose" }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn joint_counts_report_das28_totals() {
    let (app, _) = app();
    let id = create_patient(&app).await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/joint-count",
        Some(json!({
            "patient_id": id,
            "counts": [
                { "joint_name": "Left Wrist", "is_swollen": true, "is_tender": true },
                { "joint_name": "Right Knee", "is_tender": true },
                { "joint_name": "Left Ankle", "is_swollen": true }
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["das28_counts"]["tender_count"], 2);
    assert_eq!(body["das28_counts"]["swollen_count"], 1);
}

#[tokio::test]
async fn report_downloads_as_named_attachment() {
    let (app, _) = app();
    let id = create_patient(&app).await;
    for notes in ["first", "second", "third"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/examination",
            Some(json!({ "patient_id": id, "notes": notes })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/report/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        format!("attachment; filename=\"Patient_{id}_Report.pdf\"").as_str()
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    let (status, bytes) = send(&app, "GET", &format!("/api/report/{id}?format=docx"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn report_for_unknown_patient_is_not_found() {
    let (app, _) = app();
    let (status, _) = send(&app, "GET", &format!("/api/report/{}", Uuid::new_v4()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let id = create_patient(&app).await;
    let (status, _) = send(&app, "GET", &format!("/api/report/{id}?format=odt"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
