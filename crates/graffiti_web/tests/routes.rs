use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use graffiti_core::db::open_db_in_memory;
use graffiti_web::{build_router, AppState};
use serde_json::{json, Value};
use std::path::Path;
use tower::ServiceExt;

fn app(upload_folder: &Path) -> Router {
    build_router(AppState::new(open_db_in_memory().unwrap()), upload_folder)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
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
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn mural(title: &str) -> Value {
    json!({
        "title": title,
        "description": "desc",
        "latitude": 40.7,
        "longitude": -74.0,
        "image_url": "/img/a.png",
        "created_by": "alice"
    })
}

#[tokio::test]
async fn pages_render_html() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());

    for uri in ["/", "/add_graffiti"] {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/static/js/map.js"));
    }
}

#[tokio::test]
async fn uploaded_images_are_served() {
    let uploads = tempfile::tempdir().unwrap();
    std::fs::write(uploads.path().join("default.png"), b"png-bytes").unwrap();
    let app = app(uploads.path());

    let response = app
        .oneshot(
            Request::get("/static/images/default.png")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"png-bytes");
}

#[tokio::test]
async fn create_list_get_delete_flow() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());

    let (status, body) = send(&app, Method::POST, "/api/graffiti", Some(mural("Mural A"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Graffiti entry added successfully!",
            "entry_id": 1
        })
    );

    let (status, body) = send(&app, Method::GET, "/api/graffiti", None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["title"], "Mural A");
    assert_eq!(entries[0]["created_by"], "alice");

    let (status, body) = send(&app, Method::GET, "/api/graffiti/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["latitude"], 40.7);

    let (status, body) = send(&app, Method::DELETE, "/api/graffiti/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Entry deleted successfully!" })
    );

    let (status, body) = send(&app, Method::GET, "/api/graffiti", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn update_applies_partial_patch() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());
    send(&app, Method::POST, "/api/graffiti", Some(mural("Mural A"))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/graffiti/1",
        Some(json!({ "title": "New", "latitude": 0.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Entry updated successfully!");

    let (_, body) = send(&app, Method::GET, "/api/graffiti/1", None).await;
    assert_eq!(body["title"], "New");
    assert_eq!(body["latitude"], 40.7);
}

#[tokio::test]
async fn missing_entries_map_to_not_found() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/api/graffiti/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Entry not found." })
        );
    }

    let (status, _) = send(&app, Method::PUT, "/api/graffiti/9", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn title_query_switches_to_search() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());
    for title in ["Graffiti Wall", "Street Art", "GRAFitti2"] {
        send(&app, Method::POST, "/api/graffiti", Some(mural(title))).await;
    }

    let (status, body) = send(&app, Method::GET, "/api/graffiti?title=graf", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Graffiti Wall", "GRAFitti2"]);
}

#[tokio::test]
async fn store_faults_map_to_server_error() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());

    let mut oversized = mural("ok");
    oversized["created_by"] = json!("x".repeat(60));
    let (status, body) = send(&app, Method::POST, "/api/graffiti", Some(oversized)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("CHECK constraint failed"));
}

#[tokio::test]
async fn malformed_body_is_rejected_in_failure_shape() {
    let uploads = tempfile::tempdir().unwrap();
    let app = app(uploads.path());

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/graffiti",
        Some(json!({ "title": "no coordinates" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());
}
