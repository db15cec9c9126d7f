//! Response construction.
//!
//! # Responsibilities
//! - Wrap fully rendered content with an exact `Content-Length`
//! - Map request failures to plain-text client errors
//!
//! # Design Decisions
//! - Content is fully rendered before a response exists
//! - The body is a `TrackedBody`, so a transfer cut short is still logged
//! - Error detail is always logged, and sent as the response body

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ServiceError;
use crate::http::body::TrackedBody;
use crate::templates::Rendered;

pub const TEXT_HTML: &str = "text/html";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// 200 response carrying the rendered content verbatim.
///
/// HEAD responses never send a body, so their content is not tracked.
pub fn content_response(rendered: Rendered, content_type: &'static str, method: &Method) -> Response {
    let len = rendered.len();
    let mut response = if method == Method::HEAD {
        rendered.into_parts().1.into_response()
    } else {
        TrackedBody::new(rendered).into_body().into_response()
    };
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(len));
    response
}

/// Error response. A `code` of 0 (or not a valid status) means 400.
pub fn error_response(code: u16, err: Option<&ServiceError>) -> Response {
    let message = err
        .map(ToString::to_string)
        .unwrap_or_else(|| "Unspecified error".to_string());
    let status = match code {
        0 => StatusCode::BAD_REQUEST,
        c => StatusCode::from_u16(c).unwrap_or(StatusCode::BAD_REQUEST),
    };

    tracing::error!(
        status = status.as_u16(),
        kind = err.map(ServiceError::kind).unwrap_or("unspecified"),
        "ERROR: {}",
        message
    );

    (status, message).into_response()
}
