//! Demo media server: serves the admin API the streamtop console polls, from
//! live system readings plus a synthetic stream registry. Privileged routes
//! (stream deletion, flv playback) check signed action tokens when a secret
//! is configured.

use std::{collections::HashMap, net::SocketAddr, sync::Arc, time::Instant};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use sysinfo::{Networks, System};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use streamtop_demo::args::{parse_port, parse_secret};
use streamtop_demo::snapshot::collect_snapshot;
use streamtop_demo::state::AppState;
use streamtop_demo::streams::StreamRegistry;
use streamtop_demo::{config, sign};

const DEFAULT_PORT: u16 = 8290;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let port = parse_port(std::env::args(), DEFAULT_PORT);
    let secret = parse_secret(std::env::args());

    let mut sys = System::new();
    sys.refresh_cpu_usage();
    sys.refresh_memory();

    // Keep Networks alive across requests so total_received() keeps counting
    let nets = Networks::new_with_refreshed_list();

    let state = AppState {
        started: Instant::now(),
        sys: Arc::new(Mutex::new(sys)),
        nets: Arc::new(Mutex::new(nets)),
        streams: Arc::new(Mutex::new(StreamRegistry::seed(Utc::now()))),
        secret,
    };

    if state.secret.is_none() {
        warn!("no secret configured; privileged requests are accepted unsigned");
    }

    let app = Router::new()
        .route("/api/server", get(server_snapshot))
        .route("/api/streams", get(streams_listing))
        .route("/api/server/config", get(server_config))
        .route("/api/streams/:app/:name", delete(delete_stream))
        .route("/:app/:file", get(play_stream))
        .with_state(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("demo media server listening at http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn server_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(collect_snapshot(&state).await)
}

async fn streams_listing(State(state): State<AppState>) -> impl IntoResponse {
    let streams = state.streams.lock().await;
    Json(streams.listing(Utc::now()))
}

async fn server_config() -> impl IntoResponse {
    Json(config::demo_config())
}

/// `sign` is checked against the logical stream path, the same string the
/// console signs for both playback and deletion.
fn authorized(state: &AppState, resource_path: &str, q: &HashMap<String, String>) -> bool {
    match &state.secret {
        None => true,
        Some(secret) => q
            .get("sign")
            .map(|s| sign::verify(resource_path, secret, s, Utc::now().timestamp_millis()))
            .unwrap_or(false),
    }
}

async fn delete_stream(
    State(state): State<AppState>,
    Path((app, name)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let resource_path = format!("/{app}/{name}");
    if !authorized(&state, &resource_path, &q) {
        warn!("rejected unsigned/expired delete of {resource_path}");
        return StatusCode::FORBIDDEN.into_response();
    }
    let removed = state.streams.lock().await.remove(&app, &name);
    if removed {
        info!("deleted stream {resource_path}");
        Json(json!({ "app": app, "name": name })).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn play_stream(
    State(state): State<AppState>,
    Path((app, file)): Path<(String, String)>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let Some(name) = file.strip_suffix(".flv") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if !state.streams.lock().await.contains(&app, name) {
        return StatusCode::NOT_FOUND.into_response();
    }
    let resource_path = format!("/{app}/{name}");
    if !authorized(&state, &resource_path, &q) {
        warn!("rejected unsigned/expired playback of {resource_path}");
        return StatusCode::FORBIDDEN.into_response();
    }
    // Demo stub: a real server would stream media here
    ([("content-type", "video/x-flv")], Vec::<u8>::new()).into_response()
}
