//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with the single catch-all handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Pick the usage or bootstrap branch per request
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Request, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tera::Context;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::{ServiceConfig, TemplateConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::http::request::{client_addr, form_body, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::{content_response, error_response, TEXT_HTML, TEXT_PLAIN};
use crate::lifecycle::{shutdown::triggered, shutdown_signal};
use crate::observability::metrics;
use crate::params::{decode_request, resolve_origin};
use crate::templates::{error_chain, render, TemplateStore};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<TemplateStore>,
    pub names: TemplateConfig,
    pub max_body_size: usize,
}

/// HTTP server for the bootstrap service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over an already loaded template set.
    pub fn new(config: ServiceConfig, templates: Arc<TemplateStore>) -> Self {
        let state = AppState {
            templates,
            names: config.templates.clone(),
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(bootstrap_handler))
            .route("/", any(bootstrap_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(X_REQUEST_ID)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
    }

    /// Router for in-process use (tests, embedding).
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a signal arrives or `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Serving at {}", addr);

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {},
                    _ = triggered(shutdown) => {},
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point: usage page for empty requests, script otherwise.
async fn bootstrap_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let (parts, body) = request.into_parts();
    let has_query = parts.uri.query().is_some_and(|q| !q.is_empty());

    let (branch, result) = match axum::body::to_bytes(body, state.max_body_size).await {
        Err(e) => ("bootstrap", Err(ServiceError::FormParse(error_chain(&e)))),
        Ok(body) if body.is_empty() && !has_query => ("usage", serve_usage(&state, &parts)),
        Ok(body) => ("bootstrap", serve_bootstrap(&state, &parts, &body)),
    };

    let response = result
        .unwrap_or_else(|e| error_response(StatusCode::BAD_REQUEST.as_u16(), Some(&e)));
    metrics::record_request(branch, response.status().as_u16(), start);
    response
}

fn serve_usage(state: &AppState, parts: &Parts) -> ServiceResult<Response> {
    let rendered = render(&state.templates, &state.names.usage, &Context::new())?;
    Ok(content_response(rendered, TEXT_HTML, &parts.method))
}

fn serve_bootstrap(state: &AppState, parts: &Parts, body: &[u8]) -> ServiceResult<Response> {
    let client = client_addr(parts);
    let mut params = decode_request(form_body(parts, body), parts.uri.query())?;
    tracing::info!(client = %client, params = ?params, "Parsed bootstrap parameters");

    resolve_origin(parts, &client, &mut params);

    let template = &state.names.bootstrap;
    let context = Context::from_serialize(&params).map_err(|e| ServiceError::Render {
        template: template.clone(),
        cause: error_chain(&e),
    })?;

    let rendered = render(&state.templates, template, &context)?;
    Ok(content_response(rendered, TEXT_PLAIN, &parts.method))
}
