use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chainrecord_lib::codec::decode_as;
use chainrecord_lib::dispatch::Surface;
use chainrecord_lib::ledger::read_key;
use chainrecord_lib::{Error, RecordKind, Store};
use serde::Deserialize;
use tracing::info;

use super::state::AppState;

/// Body of an invoke/query/deploy call: positional arguments.
#[derive(Debug, Deserialize, Default)]
pub struct ArgsRequest {
    #[serde(default)]
    pub args: Vec<String>,
}

// ── Helper: map ledger errors to HTTP ────────────────────────

pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::ArgumentCount { .. } | Error::Arity { .. } | Error::UnknownOperation { .. } => {
            StatusCode::BAD_REQUEST
        }
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::DuplicateKey { .. } => StatusCode::CONFLICT,
        Error::Decode { .. } | Error::Encode { .. } | Error::Store(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn error_body(err: &Error) -> serde_json::Value {
    serde_json::json!({
        "status": "error",
        "kind": err.kind(),
        "message": err.to_string(),
        "payload": err.payload().map(|p| String::from_utf8_lossy(p).into_owned()),
    })
}

fn outcome(result: chainrecord_lib::Result<Vec<u8>>) -> Response {
    match result {
        Ok(payload) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ok",
                "payload": String::from_utf8_lossy(&payload),
            })),
        )
            .into_response(),
        Err(e) => (status_for(&e), Json(error_body(&e))).into_response(),
    }
}

// ── Health ───────────────────────────────────────────────────

pub async fn handle_health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "storage": state.backend,
    }))
}

// ── POST /deploy ─────────────────────────────────────────────

pub async fn handle_deploy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArgsRequest>,
) -> Response {
    info!("deploy requested");
    outcome(state.deploy(&req.args).await)
}

// ── POST /invoke/{function} ──────────────────────────────────

pub async fn handle_invoke(
    State(state): State<Arc<AppState>>,
    Path(function): Path<String>,
    Json(req): Json<ArgsRequest>,
) -> Response {
    info!(function = %function, "invoke is running");
    outcome(state.run(Surface::Invoke, &function, &req.args).await)
}

// ── POST /query/{function} ───────────────────────────────────

pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    Path(function): Path<String>,
    Json(req): Json<ArgsRequest>,
) -> Response {
    info!(function = %function, "query is running");
    outcome(state.run(Surface::Query, &function, &req.args).await)
}

// ── GET /records/{kind}/{key} ────────────────────────────────

pub async fn handle_record(
    State(state): State<Arc<AppState>>,
    Path((kind, key)): Path<(String, String)>,
) -> Response {
    let kind: RecordKind = match kind.parse() {
        Ok(k) => k,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"status": "error", "message": e})),
            )
                .into_response()
        }
    };

    let record = read_key(state.store.as_ref(), &key).and_then(|bytes| decode_as(kind, &bytes));
    match record {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "kind": record.kind(),
                "key": record.key(),
                "record": record,
            })),
        )
            .into_response(),
        Err(e) => (status_for(&e), Json(error_body(&e))).into_response(),
    }
}

// ── GET /keys ────────────────────────────────────────────────

pub async fn handle_keys(State(state): State<Arc<AppState>>) -> Response {
    match state.store.keys() {
        Ok(keys) => (StatusCode::OK, Json(serde_json::json!({ "keys": keys }))).into_response(),
        Err(e) => {
            let e = Error::from(e);
            (status_for(&e), Json(error_body(&e))).into_response()
        }
    }
}
