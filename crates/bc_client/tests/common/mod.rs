//! In-process relay implementing the documented REST contract, used to
//! exercise the HTTP clients end to end: 409 on duplicate aliases, 404
//! for unknown recipients, `sent_at`-ascending mailboxes with a default
//! limit of 10 and a cap of 200.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::RwLock;

use bc_crypto::PublicKeyRecord;
use bc_proto::api::{EncryptedMessage, LookupResponse, PublishRequest, RegisterRequest};

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 200;

#[derive(Default)]
struct RelayState {
    keys: HashMap<String, PublicKeyRecord>,
    mailboxes: HashMap<String, Vec<EncryptedMessage>>,
}

type Shared = Arc<RwLock<RelayState>>;

/// Bind the relay on an ephemeral port and return its base URL.
pub async fn spawn_relay() -> String {
    let state = Shared::default();
    let app = Router::new()
        .route("/api/register", post(register))
        .route("/api/registry/:alias", get(lookup))
        .route("/api/search/alias", get(search))
        .route("/api/publish", post(publish))
        .route("/api/messages", get(messages))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn register(State(state): State<Shared>, Json(req): Json<RegisterRequest>) -> StatusCode {
    let mut relay = state.write().await;
    let alias = req.alias.as_str().to_owned();
    if relay.keys.contains_key(&alias) {
        return StatusCode::CONFLICT;
    }
    relay.keys.insert(alias.clone(), req.public_key);
    relay.mailboxes.insert(alias, Vec::new());
    StatusCode::CREATED
}

async fn lookup(
    State(state): State<Shared>,
    Path(alias): Path<String>,
) -> Result<Json<LookupResponse>, StatusCode> {
    let relay = state.read().await;
    relay
        .keys
        .get(&alias)
        .cloned()
        .map(|public_key| Json(LookupResponse { public_key }))
        .ok_or(StatusCode::NOT_FOUND)
}

#[derive(Deserialize)]
struct SearchParams {
    alias: String,
}

async fn search(
    State(state): State<Shared>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<String>> {
    let relay = state.read().await;
    let mut matches: Vec<String> = relay
        .keys
        .keys()
        .filter(|name| name.contains(&params.alias))
        .cloned()
        .collect();
    // Stand-in for the trigram similarity ranking: closest length
    // first, then name.
    matches.sort_by_key(|name| (name.len(), name.clone()));
    Json(matches)
}

async fn publish(State(state): State<Shared>, Json(req): Json<PublishRequest>) -> StatusCode {
    let mut relay = state.write().await;
    let recipient = req.recipient.as_str().to_owned();
    if !relay.keys.contains_key(&recipient) {
        return StatusCode::NOT_FOUND;
    }
    relay
        .mailboxes
        .entry(recipient)
        .or_default()
        .push(EncryptedMessage {
            content: req.content,
            sent_at: Utc::now(),
        });
    StatusCode::CREATED
}

#[derive(Deserialize)]
struct FetchParams {
    recipient: String,
    limit: Option<u32>,
}

async fn messages(
    State(state): State<Shared>,
    Query(params): Query<FetchParams>,
) -> Result<Json<Vec<EncryptedMessage>>, StatusCode> {
    let relay = state.read().await;
    if !relay.keys.contains_key(&params.recipient) {
        return Err(StatusCode::NOT_FOUND);
    }
    let limit = params
        .limit
        .map(|l| (l as usize).min(MAX_LIMIT))
        .unwrap_or(DEFAULT_LIMIT);
    let mailbox = relay
        .mailboxes
        .get(&params.recipient)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    // Entries are appended in arrival order, which is already
    // sent_at ascending; limit keeps the oldest.
    Ok(Json(mailbox.iter().take(limit).cloned().collect()))
}
