use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{info, warn};

pub mod fixtures;

pub const AUTH_HEADER: &str = "x-token";

/// First id handed out to hooks created at runtime.
const FIRST_CREATED_HOOK_ID: u64 = 20_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hook {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub attributes: HookAttributes,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HookAttributes {
    pub url: String,
    pub created_at: String,
    pub state: String,
    pub events: Vec<String>,
}

/// The provider's error envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ErrorBody {
    fn new(status: StatusCode, kind: &str, message: &str) -> Self {
        Self {
            status: status.as_u16(),
            kind: kind.to_string(),
            message: message.to_string(),
            errors: None,
        }
    }
}

impl IntoResponse for ErrorBody {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

pub struct AppState {
    token: String,
    hooks: RwLock<Vec<Hook>>,
    next_id: AtomicU64,
}

impl AppState {
    /// State with no hooks registered.
    pub fn new(token: &str) -> Self {
        Self::with_hooks(token, Vec::new())
    }

    /// State holding the two fixture hooks.
    pub fn seeded(token: &str) -> Self {
        Self::with_hooks(token, fixtures::seed_hooks())
    }

    pub fn with_hooks(token: &str, hooks: Vec<Hook>) -> Self {
        Self {
            token: token.to_string(),
            hooks: RwLock::new(hooks),
            next_id: AtomicU64::new(FIRST_CREATED_HOOK_ID),
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn app(token: &str) -> Router {
    app_with_state(Arc::new(AppState::seeded(token)))
}

pub fn app_with_state(state: SharedState) -> Router {
    Router::new()
        .route("/echo", get(echo))
        .route("/hooks", get(list_hooks).post(create_hook))
        .route("/hooks/{id}", get(get_hook).delete(delete_hook))
        .route("/users/me", get(me))
        .route("/users/me/event_types", get(event_types))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ErrorBody> {
    let token = headers.get(AUTH_HEADER).and_then(|v| v.to_str().ok());
    if token == Some(state.token.as_str()) {
        return Ok(());
    }
    warn!("rejected request with missing or invalid token");
    Err(ErrorBody::new(
        StatusCode::UNAUTHORIZED,
        "authentication_error",
        "Invalid token",
    ))
}

fn hook_not_found() -> ErrorBody {
    ErrorBody::new(StatusCode::NOT_FOUND, "not_found", "Hook not found")
}

async fn echo(State(state): State<SharedState>, headers: HeaderMap) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    Ok(Json(json!({ "email": fixtures::ACCOUNT_EMAIL })))
}

async fn list_hooks(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    let hooks = state.hooks.read().await;
    Ok(Json(json!({ "data": *hooks })))
}

/// Accepts `url=...&events[]=...&events[]=...`. Repeated keys rule out the
/// stock `Form` extractor.
async fn create_hook(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<Value>), ErrorBody> {
    authorize(&state, &headers)?;

    let mut target = String::new();
    let mut events = Vec::new();
    for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
        match key.as_ref() {
            "url" => target = value.into_owned(),
            "events[]" => events.push(value.into_owned()),
            _ => {}
        }
    }

    let mut errors = BTreeMap::new();
    if target.is_empty() {
        errors.insert("url".to_string(), vec!["can't be blank".to_string()]);
    }
    if events.is_empty() {
        errors.insert("events".to_string(), vec!["can't be blank".to_string()]);
    }
    if !errors.is_empty() {
        let mut body = ErrorBody::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "validation_error",
            "Validation failed",
        );
        body.errors = Some(errors);
        return Err(body);
    }

    let id = state.next_id.fetch_add(1, Ordering::Relaxed);
    let hook = Hook {
        id,
        kind: "hooks".to_string(),
        attributes: HookAttributes {
            url: target,
            created_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            state: "active".to_string(),
            events,
        },
    };
    info!(id, url = %hook.attributes.url, "hook created");
    state.hooks.write().await.push(hook);
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Mirrors the provider: a single hook is returned as a one-element list.
async fn get_hook(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    let id: u64 = id.parse().map_err(|_| hook_not_found())?;
    let hooks = state.hooks.read().await;
    let hook = hooks.iter().find(|h| h.id == id).ok_or_else(hook_not_found)?;
    Ok(Json(json!({ "data": [hook] })))
}

/// Success body is a literal `null`.
async fn delete_hook(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    let id: u64 = id.parse().map_err(|_| hook_not_found())?;
    let mut hooks = state.hooks.write().await;
    let index = hooks
        .iter()
        .position(|h| h.id == id)
        .ok_or_else(hook_not_found)?;
    hooks.remove(index);
    info!(id, "hook deleted");
    Ok(Json(Value::Null))
}

async fn me(State(state): State<SharedState>, headers: HeaderMap) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    Ok(Json(fixtures::me()))
}

#[derive(Deserialize)]
pub struct EventTypesQuery {
    pub include: Option<String>,
}

async fn event_types(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(query): Query<EventTypesQuery>,
) -> Result<Json<Value>, ErrorBody> {
    authorize(&state, &headers)?;
    let include_owner = query.include.as_deref() == Some("owner");
    Ok(Json(fixtures::event_types(include_owner)))
}
