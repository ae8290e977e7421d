//! Attest Testbed - Local HTTP fixture server
//!
//! A small axum server with deterministic endpoints, used by the integration
//! tests and handy for trying the DSL by hand. Echo endpoints reflect the
//! request back as JSON; the remaining routes produce fixed fixtures for
//! status, header, media type and body expectations.

// Axum handlers must be async even when they do not await.
#![allow(clippy::unused_async)]

use std::collections::BTreeMap;
use std::time::Duration;

use axum::extract::{Path, Query, Request};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION, SERVER, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{any, delete, get, patch, post, put};
use axum::{Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use serde::Serialize;
use tokio::net::TcpListener;
use uuid::Uuid;

/// Upper bound for `/bytes/{n}` payloads.
const MAX_BYTES: usize = 100 * 1024;

/// Upper bound for `/delay/{secs}`.
const MAX_DELAY_SECS: u64 = 10;

/// The `Server` header value attached to every response.
const SERVER_NAME: &str = "attest-testbed";

/// Reflection of one request, returned by the echo endpoints.
#[derive(Debug, Serialize)]
struct Echo {
    method: String,
    path: String,
    args: BTreeMap<String, Vec<String>>,
    content_type: Option<String>,
    data: String,
    json: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct HeadersEcho {
    headers: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct UuidEcho {
    uuid: String,
}

#[derive(Debug, Serialize)]
struct DelayEcho {
    delay: u64,
}

#[derive(Debug, Serialize)]
struct BasicAuthEcho {
    authenticated: bool,
    user: String,
}

#[derive(Debug, Serialize)]
struct BearerEcho {
    authenticated: bool,
    token: String,
}

/// Builds the testbed router with every fixture route installed.
#[must_use]
pub fn app() -> Router {
    Router::new()
        .route("/get", get(echo))
        .route("/post", post(echo))
        .route("/put", put(echo))
        .route("/patch", patch(echo))
        .route("/delete", delete(echo))
        .route("/status/{code}", any(status))
        .route("/headers", get(headers_echo))
        .route("/uuid", get(uuid_echo))
        .route("/bytes/{n}", get(random_bytes))
        .route("/delay/{secs}", get(delayed_echo))
        .route("/html", get(html_page))
        .route("/xml", get(xml_document))
        .route("/redirect/{n}", get(redirect_chain))
        .route("/basic-auth/{user}/{passwd}", get(basic_auth_check))
        .route("/bearer", get(bearer_check))
        .layer(middleware::from_fn(set_server_header))
}

/// Serves the testbed on the given listener until the task is dropped.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn set_server_header(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(SERVER, HeaderValue::from_static(SERVER_NAME));
    response
}

/// Reflects method, path, query arguments and body back as JSON.
async fn echo(
    method: Method,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let mut args: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in params {
        args.entry(name).or_default().push(value);
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let json = content_type
        .as_deref()
        .filter(|ct| ct.contains("json"))
        .and_then(|_| serde_json::from_str(&body).ok());

    Json(Echo {
        method: method.to_string(),
        path: uri.path().to_string(),
        args,
        content_type,
        data: body,
        json,
    })
}

async fn status(Path(code): Path<u16>) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

/// Echoes the request headers. Names arrive lowercased; repeated headers are
/// joined with a comma.
async fn headers_echo(headers: HeaderMap) -> Json<HeadersEcho> {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in &headers {
        let value = value.to_str().unwrap_or("<binary>");
        map.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    Json(HeadersEcho { headers: map })
}

async fn uuid_echo() -> Json<UuidEcho> {
    Json(UuidEcho {
        uuid: Uuid::new_v4().to_string(),
    })
}

async fn random_bytes(Path(n): Path<usize>) -> impl IntoResponse {
    let n = n.min(MAX_BYTES);
    let mut bytes = vec![0u8; n];
    rand::rng().fill_bytes(&mut bytes);
    ([(CONTENT_TYPE, "application/octet-stream")], bytes)
}

async fn delayed_echo(Path(secs): Path<u64>) -> Json<DelayEcho> {
    let delay = secs.min(MAX_DELAY_SECS);
    tracing::debug!(delay, "delaying response");
    tokio::time::sleep(Duration::from_secs(delay)).await;
    Json(DelayEcho { delay })
}

async fn html_page() -> Html<&'static str> {
    Html(concat!(
        "<!DOCTYPE html>\n",
        "<html>\n",
        "  <head><title>Attest Testbed</title></head>\n",
        "  <body><h1>Fixture page</h1><p>Served for media type checks.</p></body>\n",
        "</html>\n",
    ))
}

async fn xml_document() -> impl IntoResponse {
    let document = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
        "<note><to>Tester</to><body>Fixture document</body></note>\n",
    );
    ([(CONTENT_TYPE, "application/xml")], document)
}

/// Redirects down a chain of `n` hops that ends at `/get`.
async fn redirect_chain(Path(n): Path<u32>) -> impl IntoResponse {
    let location = if n <= 1 {
        "/get".to_string()
    } else {
        format!("/redirect/{}", n - 1)
    };
    (StatusCode::FOUND, [(LOCATION, location)])
}

async fn basic_auth_check(
    Path((user, passwd)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let expected = format!("Basic {}", STANDARD.encode(format!("{user}:{passwd}")));
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    if presented == Some(expected.as_str()) {
        Json(BasicAuthEcho {
            authenticated: true,
            user,
        })
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, "Basic realm=\"attest\"")],
        )
            .into_response()
    }
}

async fn bearer_check(headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) => Json(BearerEcho {
            authenticated: true,
            token: token.to_string(),
        })
        .into_response(),
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}
