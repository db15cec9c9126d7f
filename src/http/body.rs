//! Response body that accounts for every byte handed to the connection.
//!
//! Headers (with `Content-Length`) are already on the wire by the time the
//! body streams, so a transfer that ends early cannot become an error
//! response. When the connection drops the body before all of it was
//! taken, the short write is logged and counted.

use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::body::{Body, Bytes};
use futures_util::Stream;

use crate::error::ServiceResult;
use crate::observability::metrics;
use crate::templates::{verify_sent, Rendered};

/// Largest chunk handed to the connection at once.
pub const CHUNK_SIZE: usize = 16 * 1024;

#[derive(Debug)]
pub struct TrackedBody {
    template: String,
    content: Bytes,
    sent: usize,
}

impl TrackedBody {
    pub fn new(rendered: Rendered) -> Self {
        let (template, content) = rendered.into_parts();
        Self {
            template,
            content: Bytes::from(content),
            sent: 0,
        }
    }

    /// Bytes taken by the connection so far.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Whether everything rendered has been taken.
    pub fn outcome(&self) -> ServiceResult<()> {
        verify_sent(&self.template, self.content.len(), self.sent)
    }

    pub fn into_body(self) -> Body {
        Body::from_stream(self)
    }
}

impl Stream for TrackedBody {
    type Item = Result<Bytes, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let len = self.content.len();
        if self.sent >= len {
            return Poll::Ready(None);
        }
        let end = (self.sent + CHUNK_SIZE).min(len);
        let chunk = self.content.slice(self.sent..end);
        self.sent = end;
        Poll::Ready(Some(Ok(chunk)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let chunks = (self.content.len() - self.sent).div_ceil(CHUNK_SIZE);
        (chunks, Some(chunks))
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        if let Err(e) = self.outcome() {
            metrics::record_short_write(e.kind());
            tracing::error!(
                template = %self.template,
                sent = self.sent,
                expected = self.content.len(),
                "ERROR: {}",
                e
            );
        }
    }
}
