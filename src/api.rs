//! REST surface over an [`ItemStore`].
//!
//! | Method | Path             | Success            |
//! |--------|------------------|--------------------|
//! | GET    | `/api/items`     | 200, item array    |
//! | POST   | `/api/items`     | 201, created item  |
//! | PATCH  | `/api/items/:id` | 200, toggled item  |
//! | PUT    | `/api/items/:id` | 200, updated item  |
//! | DELETE | `/api/items/:id` | 204, empty body    |
//!
//! Failures answer `{"error": "<message>"}` with 400, 404 or 500.

use crate::backend::{DocumentBackend, JsonFileBackend};
use crate::error::Error;
use crate::model::{Item, ItemDraft};
use crate::store::{validate, ItemStore};
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

const MSG_TOGGLE_NOT_FOUND: &str = "해당 항목을 찾을 수 없습니다!";
const MSG_UPDATE_NOT_FOUND: &str = "수정할 항목을 찾을 수 없습니다.";
const MSG_DELETE_NOT_FOUND: &str = "삭제할 항목을 찾을 수 없습니다!";
const MSG_INTERNAL: &str = "서버 오류가 발생했습니다.";

/// Shared handler state: the store plus request limits.
pub struct AppState<B = JsonFileBackend> {
    store: Arc<ItemStore<B>>,
    max_body_bytes: usize,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl<B: DocumentBackend> AppState<B> {
    /// State over `store` with the given body limit.
    pub fn new(store: Arc<ItemStore<B>>, max_body_bytes: usize) -> Self {
        Self {
            store,
            max_body_bytes,
        }
    }
}

/// Build the `/api/items` router.
pub fn build_router<B>(state: AppState<B>) -> Router
where
    B: DocumentBackend + 'static,
{
    let limit = state.max_body_bytes;
    Router::new()
        .route("/api/items", get(list_items::<B>).post(create_item::<B>))
        .route(
            "/api/items/:id",
            patch(toggle_item::<B>)
                .put(update_item::<B>)
                .delete(delete_item::<B>),
        )
        .layer(DefaultBodyLimit::max(limit))
        .layer(from_fn(request_tracing))
        .with_state(state)
}

// ---- handlers ----------------------------------------------------------------

async fn list_items<B: DocumentBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let items = on_store(&state, |store| Ok(store.list()))
        .await
        .map_err(|e| ApiError::from_store(e, MSG_INTERNAL))?;
    Ok(Json(items))
}

async fn create_item<B: DocumentBackend + 'static>(
    State(state): State<AppState<B>>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let draft = draft_from(body)?;
    let item = on_store(&state, move |store| {
        store.create(field(&draft.title), field(&draft.deadline))
    })
    .await
    .map_err(|e| ApiError::from_store(e, MSG_INTERNAL))?;
    tracing::info!(id = item.id, title = %item.title, "item created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn toggle_item<B: DocumentBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(raw_id): Path<String>,
) -> Result<Json<Item>, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::not_found(MSG_TOGGLE_NOT_FOUND))?;
    let item = on_store(&state, move |store| store.toggle(id))
        .await
        .map_err(|e| ApiError::from_store(e, MSG_TOGGLE_NOT_FOUND))?;
    tracing::info!(id, sold = item.is_sold, "item status toggled");
    Ok(Json(item))
}

async fn update_item<B: DocumentBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(raw_id): Path<String>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let draft = draft_from(body)?;
    let Some(id) = parse_id(&raw_id) else {
        // A bad body still answers 400 before the id is looked at.
        validate(field(&draft.title), field(&draft.deadline))
            .map_err(|e| ApiError::from_store(e, MSG_UPDATE_NOT_FOUND))?;
        return Err(ApiError::not_found(MSG_UPDATE_NOT_FOUND));
    };
    let item = on_store(&state, move |store| {
        store.update(id, field(&draft.title), field(&draft.deadline))
    })
    .await
    .map_err(|e| ApiError::from_store(e, MSG_UPDATE_NOT_FOUND))?;
    tracing::info!(id, title = %item.title, "item updated");
    Ok(Json(item))
}

async fn delete_item<B: DocumentBackend + 'static>(
    State(state): State<AppState<B>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id).ok_or_else(|| ApiError::not_found(MSG_DELETE_NOT_FOUND))?;
    on_store(&state, move |store| store.delete(id))
        .await
        .map_err(|e| ApiError::from_store(e, MSG_DELETE_NOT_FOUND))?;
    tracing::info!(id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---- helpers -----------------------------------------------------------------

/// Run a store operation on the blocking pool. File reads, the atomic
/// rename and the write lock all block.
async fn on_store<B, T, F>(state: &AppState<B>, op: F) -> Result<T, Error>
where
    B: DocumentBackend + 'static,
    T: Send + 'static,
    F: FnOnce(&ItemStore<B>) -> Result<T, Error> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| Error::Io(format!("store task failed: {e}")))?
}

/// Ids are whole decimal numbers. `"1abc"` and `"1.5"` match nothing.
fn parse_id(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn draft_from(body: Result<Json<ItemDraft>, JsonRejection>) -> Result<ItemDraft, ApiError> {
    match body {
        Ok(Json(draft)) => Ok(draft),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "rejected request body");
            Err(ApiError::bad_request(crate::store::MSG_REQUIRED))
        }
    }
}

/// An error answer: status plus localized message.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn not_found(message: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.to_string(),
        }
    }

    /// Map a store error; `not_found` is the message used for a missing id.
    fn from_store(err: Error, not_found: &str) -> Self {
        match err {
            Error::Validation(message) => Self {
                status: StatusCode::BAD_REQUEST,
                message,
            },
            Error::NotFound(_) => Self::not_found(not_found),
            other => {
                tracing::error!(error = %other, "store write failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: MSG_INTERNAL.to_string(),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

async fn request_tracing(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);

    let started = Instant::now();
    let response = next.run(request).instrument(span.clone()).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    span.in_scope(|| {
        if status.is_client_error() || status.is_server_error() {
            tracing::warn!(status = status.as_u16(), elapsed_ms, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), elapsed_ms, "request served");
        }
    });
    response
}
