//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, branch selection)
//!     → request.rs (request ID, client address, form body detection)
//!     → params + templates (decode, resolve origin, render)
//!     → response.rs (exact Content-Length, or plain-text error)
//!     → body.rs (stream to client, log a short write)
//! ```

pub mod body;
pub mod request;
pub mod response;
pub mod server;

pub use body::TrackedBody;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use response::{content_response, error_response};
pub use server::{AppState, HttpServer};
