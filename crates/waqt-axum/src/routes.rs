//! Route definitions.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde_json::json;

/// Facts about the running server process.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub pid: u32,
    pub started_at: DateTime<Utc>,
}

impl ServerInfo {
    pub fn now() -> Self {
        Self {
            pid: std::process::id(),
            started_at: Utc::now(),
        }
    }
}

pub type AppState = Arc<ServerInfo>;

/// Create the UI router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/status", get(status))
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn status(State(info): State<AppState>) -> impl IntoResponse {
    let uptime_secs = (Utc::now() - info.started_at).num_seconds().max(0);
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "pid": info.pid,
        "started_at": info.started_at.to_rfc3339(),
        "uptime_secs": uptime_secs,
    }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>waqt</title>
</head>
<body>
<h1>waqt</h1>
<p id="status">Checking server...</p>
<script>
fetch("/api/status")
  .then((r) => r.json())
  .then((s) => {
    document.getElementById("status").textContent =
      `Running (PID ${s.pid}, up ${s.uptime_secs}s, v${s.version})`;
  });
</script>
</body>
</html>
"#;
