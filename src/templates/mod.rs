//! Template subsystem.
//!
//! # Data Flow
//! ```text
//! startup: glob → store.rs (compile all, check required names)
//!     → Arc<TemplateStore> (read-only for the life of the process)
//!
//! per request: render.rs (execute into buffer)
//!     → http layer sends with exact Content-Length
//!     → bytes actually sent checked against the rendered length
//! ```

pub mod filters;
pub mod render;
pub mod store;

pub use render::{render, verify_sent, Rendered};
pub use store::{TemplateError, TemplateStore};

/// Flatten an error and its sources into one line.
///
/// Tera reports the useful detail (missing variable, syntax error) in the
/// source chain, not in the top-level message.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
