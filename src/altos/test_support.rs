//! Fake Altos API for tests, served by axum on an ephemeral port

use crate::altos::client::AltosClient;
use crate::altos::config::ClientConfig;
use crate::altos::types::Endpoints;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;

pub(crate) const USERNAME: &str = "alice";
pub(crate) const PASSWORD: &str = "secret";
// base64("alice:secret")
pub(crate) const EXPECTED_AUTH: &str = "Basic YWxpY2U6c2VjcmV0";
pub(crate) const SNAPSHOT_DATE: &str = "2021-06-11";
pub(crate) const SNAPSHOT_CSV: &[u8] = b"zip,date,median_rent\n94103,2021-06-11,3450\n10001,2021-06-11,3895\n";
pub(crate) const PUBLIC_FILE: &[u8] = b"\x89PNG\r\n\x1a\nnot really a logo";

#[derive(Clone)]
struct Provider {
    listing: Value,
    snapshot: Vec<u8>,
}

pub(crate) fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some(EXPECTED_AUTH)
}

async fn list_handler(State(provider): State<Provider>, headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(provider.listing).into_response()
}

async fn data_handler(
    State(provider): State<Provider>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match params.get("date").map(String::as_str) {
        Some(SNAPSHOT_DATE) => provider.snapshot.into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn public_handler() -> Vec<u8> {
    PUBLIC_FILE.to_vec()
}

/// Serve a fake Altos API on an ephemeral port and return its base URL
pub(crate) async fn spawn_provider(listing: Value) -> String {
    let provider = Provider {
        listing,
        snapshot: gzip(SNAPSHOT_CSV),
    };
    let app = Router::new()
        .route("/api/list", get(list_handler))
        .route("/api/data", get(data_handler))
        .route("/public/logo.png", get(public_handler))
        .with_state(provider);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub(crate) fn client_for(base: &str, password: &str) -> AltosClient {
    let endpoints = Endpoints {
        list_url: format!("{}/api/list?type=rental&county=us_all-extended", base),
        file_url_prefix: format!(
            "{}/api/data?type=rental&county=us_all-extended&date=",
            base
        ),
    };
    let config = ClientConfig::resolve_with(USERNAME, password, |_| None)
        .unwrap()
        .with_endpoints(endpoints);
    AltosClient::new(config).unwrap()
}

pub(crate) fn weekly_listing() -> Value {
    json!([
        { "date": "2021-06-11", "type": "rental", "size": 52_428_800 },
        { "date": "2021-06-04", "type": "rental", "size": 52_100_000 },
    ])
}
