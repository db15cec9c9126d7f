//! Per-request error definitions.
//!
//! Failures found before the response exists map to a client error
//! response, and the message text becomes its plain-text body. A short
//! write happens after headers are out, so it is only logged.

use thiserror::Error;

/// Errors that can occur while serving a single request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The raw form text (query or body) could not be parsed.
    #[error("Could not parse form: {0}")]
    FormParse(String),

    /// A recognized field could not be decoded into the parameter set.
    #[error("Could not decode form: {0}")]
    FieldDecode(String),

    /// The template engine failed to render.
    #[error("Could not render {template}: {cause}")]
    Render { template: String, cause: String },

    /// The client received fewer bytes than were rendered.
    #[error("Short write while sending {template} ({sent} of {expected} bytes)")]
    ShortWrite {
        template: String,
        sent: usize,
        expected: usize,
    },
}

impl ServiceError {
    /// Short label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::FormParse(_) => "form_parse",
            ServiceError::FieldDecode(_) => "field_decode",
            ServiceError::Render { .. } => "render",
            ServiceError::ShortWrite { .. } => "short_write",
        }
    }
}

/// Result type for request handling.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ServiceError::Render {
            template: "bootstrap.sh.tera".into(),
            cause: "Variable `x` not found".into(),
        };
        assert_eq!(
            err.to_string(),
            "Could not render bootstrap.sh.tera: Variable `x` not found"
        );

        let err = ServiceError::ShortWrite {
            template: "usage.html.tera".into(),
            sent: 0,
            expected: 812,
        };
        assert_eq!(
            err.to_string(),
            "Short write while sending usage.html.tera (0 of 812 bytes)"
        );
        assert_eq!(err.kind(), "short_write");
    }
}
