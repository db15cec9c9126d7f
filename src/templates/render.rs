//! Template rendering into length-accounted buffers.
//!
//! Rendering and sending are separate steps with separate failures: the
//! engine may succeed and the transfer to the client may still come up
//! short. The transfer side is checked by [`verify_sent`].

use tera::Context;

use crate::error::{ServiceError, ServiceResult};
use crate::templates::{error_chain, TemplateStore};

/// Output of one successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    template: String,
    content: Vec<u8>,
}

#[allow(clippy::len_without_is_empty)]
impl Rendered {
    /// Exact byte length, used for `Content-Length`.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Split into template name and content.
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.template, self.content)
    }
}

/// Render `name` against `context` entirely in memory.
pub fn render(store: &TemplateStore, name: &str, context: &Context) -> ServiceResult<Rendered> {
    let content = store.execute(name, context).map_err(|e| ServiceError::Render {
        template: name.to_string(),
        cause: error_chain(&e),
    })?;
    Ok(Rendered {
        template: name.to_string(),
        content,
    })
}

/// Compare the bytes handed to the client with the rendered length.
pub fn verify_sent(template: &str, expected: usize, sent: usize) -> ServiceResult<()> {
    if sent != expected {
        return Err(ServiceError::ShortWrite {
            template: template.to_string(),
            sent,
            expected,
        });
    }
    Ok(())
}
