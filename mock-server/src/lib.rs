use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, Uri},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// What the server saw for one request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

pub type Received = Arc<RwLock<Vec<Echo>>>;

pub const RECEIVED_PATH: &str = "/_received";

pub fn app() -> Router {
    let received: Received = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route(RECEIVED_PATH, get(list_received))
        .fallback(echo)
        .with_state(received)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_received(State(received): State<Received>) -> Json<Vec<Echo>> {
    Json(received.read().await.clone())
}

async fn echo(
    State(received): State<Received>,
    method: Method,
    uri: Uri,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Json<Echo> {
    let echo = Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: parse_query(uri.query()),
        content_type: headers
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned()),
    };
    tracing::debug!(method = %echo.method, path = %echo.path, "echo");
    received.write().await.push(echo.clone());
    Json(echo)
}

fn parse_query(query: Option<&str>) -> Vec<(String, String)> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
