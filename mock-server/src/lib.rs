//! Local HTTP server for exercising the relay client over real sockets.
//!
//! Every route is stateless: `/echo` reflects the request back as JSON, the
//! others produce a specific status, `Content-Type` or timing on demand.

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::Path,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoHeader {
    pub name: String,
    pub value: String,
}

/// What `/echo` saw.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub headers: Vec<EchoHeader>,
    /// Lossy UTF-8 rendering of the request body.
    pub body: String,
}

impl Echo {
    /// First header value named `name`, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/content/{kind}/{subtype}", get(content))
        .route("/bare", get(bare))
        .route("/latin1", get(latin1))
        .route("/slow/{millis}", get(slow))
        .route("/bytes/{len}", get(filler))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    tracing::debug!(%method, "echo");
    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|value| EchoHeader {
                name: name.to_string(),
                value: value.to_string(),
            })
        })
        .collect();
    Json(Echo {
        method: method.to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

async fn status(Path(code): Path<u16>) -> Result<StatusCode, StatusCode> {
    StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)
}

async fn content(Path((kind, subtype)): Path<(String, String)>) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, format!("{kind}/{subtype}"))], "ok")
}

/// A body with no `Content-Type` at all.
async fn bare() -> Response {
    Response::new(Body::from("ok"))
}

async fn latin1() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=iso-8859-1")],
        b"caf\xe9".to_vec(),
    )
}

async fn slow(Path(millis): Path<u64>) -> &'static str {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    "done"
}

/// `len` bytes of `a`, as `application/octet-stream`.
async fn filler(Path(len): Path<usize>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        vec![b'a'; len],
    )
}
