//! Request origin reconstruction.
//!
//! The origin is embedded in a shell `printf` format string by the
//! bootstrap template, so every `%` is doubled before it is stored.

use axum::http::{header, request::Parts};

use crate::params::types::ParameterSet;

/// Header carrying the scheme seen by a fronting proxy.
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Value used when the request URL cannot be reconstructed.
pub const UNKNOWN_ORIGIN: &str = "unknown";

/// Build `scheme://host/path?query` from its pieces.
pub fn build_origin(host: &str, path_and_query: Option<&str>, proto: Option<&str>) -> String {
    match path_and_query {
        Some(target) if !host.is_empty() => {
            let scheme = proto.filter(|p| !p.is_empty()).unwrap_or("http");
            format!("{}://{}{}", scheme, host, target)
        }
        _ => UNKNOWN_ORIGIN.to_string(),
    }
}

/// Double every `%` so the template output cannot be read as a directive.
pub fn escape_percent(origin: &str) -> String {
    origin.replace('%', "%%")
}

/// Reconstruct the origin of `parts`, log it, and store it escaped.
pub fn resolve_origin(parts: &Parts, client: &str, params: &mut ParameterSet) {
    let host = header_str(parts, header::HOST.as_str())
        .map(str::to_string)
        .or_else(|| parts.uri.authority().map(|a| a.to_string()))
        .unwrap_or_default();
    let target = parts.uri.path_and_query().map(|pq| pq.as_str());
    let proto = header_str(parts, X_FORWARDED_PROTO);

    let origin = build_origin(&host, target, proto);
    let referer = header_str(parts, header::REFERER.as_str()).unwrap_or("");

    tracing::info!(
        client = %client,
        origin = %origin,
        referer = ?referer,
        "Bootstrap requested"
    );

    params.origin = escape_percent(&origin);
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}
