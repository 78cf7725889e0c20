//! Forward-only relay of completion fragments into the HTTP response body.
//!
//! The upstream fragment stream is consumed exactly once; fragments are
//! written to the chunked response in arrival order with no buffering beyond
//! what the transport requires. A mid-stream failure terminates the body:
//! whatever was already sent stays sent, and no error status is retrofitted
//! onto the started response.

use async_stream::stream;
use axum::body::Body;
use bytes::Bytes;
use tokio_stream::StreamExt;
use tracing::{error, info};

use crate::relay::client::FragmentStream;

/// Turn a fragment stream into a chunked response body.
///
/// Logs completion when the upstream finishes cleanly and the error when it
/// fails partway through.
pub fn relay_body(request_id: String, mut fragments: FragmentStream) -> Body {
    Body::from_stream(stream! {
        while let Some(next) = fragments.next().await {
            match next {
                Ok(fragment) => yield Ok(Bytes::from(fragment)),
                Err(e) => {
                    error!(request_id, error = %e, "Upstream stream failed mid-response");
                    yield Err(e);
                    return;
                }
            }
        }
        info!(request_id, "Response fully streamed");
    })
}
