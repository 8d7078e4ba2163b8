//! HTTP routes for pages and the entry JSON API.
//!
//! # Responsibility
//! - Serve the home and submission pages with their script.
//! - Expose the data-access operations as JSON endpoints.
//! - Map failure kinds to HTTP status codes.

use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use graffiti_core::{CatalogResponse, EntryId, EntryUpdate, FailureKind, NewGraffitiEntry};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::Path as FsPath;
use tower_http::services::ServeDir;

const INDEX_HTML: &str = include_str!("../assets/index.html");
const ADD_GRAFFITI_HTML: &str = include_str!("../assets/add_graffiti.html");
const MAP_JS: &str = include_str!("../assets/map.js");

/// Query string accepted by the list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Switches the listing to a title search when present.
    pub title: Option<String>,
}

/// Builds the application router.
///
/// Files under `upload_folder` are served at `/static/images`.
pub fn build_router(state: AppState, upload_folder: &FsPath) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/add_graffiti", get(add_graffiti))
        .route("/static/js/map.js", get(map_script))
        .nest_service("/static/images", ServeDir::new(upload_folder))
        .route("/api/graffiti", get(list_entries).post(create_entry))
        .route(
            "/api/graffiti/:id",
            get(get_entry).put(update_entry).delete(delete_entry),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn add_graffiti() -> Html<&'static str> {
    Html(ADD_GRAFFITI_HTML)
}

async fn map_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        MAP_JS,
    )
}

async fn list_entries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let response = match params.title {
        Some(keyword) => {
            debug!(
                "event=http_request module=web route=search keyword_len={}",
                keyword.len()
            );
            state
                .with_service(move |service| service.search_by_title(&keyword))
                .await
        }
        None => state.with_service(|service| service.list_entries()).await,
    };
    respond(response, StatusCode::OK)
}

async fn create_entry(
    State(state): State<AppState>,
    payload: Result<Json<NewGraffitiEntry>, JsonRejection>,
) -> Response {
    let entry = match payload {
        Ok(Json(entry)) => entry,
        Err(rejection) => return bad_request(rejection),
    };
    let response = state
        .with_service(move |service| service.add_entry(&entry))
        .await;
    respond(response, StatusCode::CREATED)
}

async fn get_entry(State(state): State<AppState>, Path(entry_id): Path<EntryId>) -> Response {
    let response = state
        .with_service(move |service| service.get_entry(entry_id))
        .await;
    respond(response, StatusCode::OK)
}

async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<EntryId>,
    payload: Result<Json<EntryUpdate>, JsonRejection>,
) -> Response {
    let update = match payload {
        Ok(Json(update)) => update,
        Err(rejection) => return bad_request(rejection),
    };
    let response = state
        .with_service(move |service| service.update_entry(entry_id, &update))
        .await;
    respond(response, StatusCode::OK)
}

async fn delete_entry(State(state): State<AppState>, Path(entry_id): Path<EntryId>) -> Response {
    let response = state
        .with_service(move |service| service.delete_entry(entry_id))
        .await;
    respond(response, StatusCode::OK)
}

fn respond<T: Serialize>(response: CatalogResponse<T>, success: StatusCode) -> Response {
    let status = match response.failure().map(|failure| failure.kind) {
        None => success,
        Some(FailureKind::NotFound) => StatusCode::NOT_FOUND,
        Some(FailureKind::Persistence) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(response)).into_response()
}

fn bad_request(rejection: JsonRejection) -> Response {
    debug!(
        "event=http_request module=web status=rejected reason={}",
        rejection.body_text()
    );
    let body = json!({ "success": false, "message": rejection.body_text() });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
