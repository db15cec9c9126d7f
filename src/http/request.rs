//! Request handling helpers.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Extract the client address for logging
//! - Decide whether a request body carries form fields

use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{header, request::Parts, HeaderName, HeaderValue, Method, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

/// Header carrying the request ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Media type whose bodies are parsed as form fields.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Request ID generator backed by UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// Remote address of the connection, or `unknown` when not served over TCP.
pub fn client_addr(parts: &Parts) -> String {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Return `body` if the method and content type say it holds form fields.
pub fn form_body<'a>(parts: &Parts, body: &'a [u8]) -> Option<&'a [u8]> {
    if !matches!(parts.method, Method::POST | Method::PUT | Method::PATCH) {
        return None;
    }
    let media_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::trim)?;
    media_type
        .eq_ignore_ascii_case(FORM_URLENCODED)
        .then_some(body)
}
