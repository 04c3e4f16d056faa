//! Error taxonomy for the photo API client.
//!
//! # Design
//! Upstream failures are classified in a fixed precedence order: transport
//! error, then a body that is not valid JSON, then a parsed body whose
//! required fields are missing or mistyped. Each stage gets a dedicated
//! variant so callers can tell "the network broke" from "the payload
//! changed shape". Image fetches reuse the same taxonomy with two extra
//! stages of their own.

use thiserror::Error;

/// A transport-level failure reported by the host that executed the I/O.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while executing or decoding an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout, TLS). The original
    /// error is preserved as the cause.
    #[error("network transport failed")]
    Network(#[source] TransportError),

    /// The body could not be interpreted at the transport-serializer layer
    /// (e.g. an image endpoint returned no usable bytes).
    #[error("response data could not be serialized: {0}")]
    DataSerialization(String),

    /// The body is not valid JSON.
    #[error("response body is not valid JSON")]
    JsonSerialization(#[source] serde_json::Error),

    /// JSON parsed, but required fields for the target model are missing or
    /// mistyped, or the expected top-level collection key is absent.
    #[error("response object could not be serialized: {0}")]
    ObjectSerialization(String),

    /// The body was fetched but could not be decoded into an image.
    #[error("response image could not be serialized: {0}")]
    ImageSerialization(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl ApiError {
    /// Wrap a host transport error, preserving it as the cause.
    pub fn network(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        ApiError::Network(Box::new(err))
    }
}

/// Errors produced by the paginated feed state machines.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A page load is already in flight; at most one request per feed
    /// instance may be outstanding.
    #[error("a page load is already in flight")]
    LoadInFlight,

    /// `complete_load` was called without a matching `begin_load`.
    #[error("no page load is in flight")]
    NoLoadInFlight,

    /// The load itself failed; the feed's aggregate state is untouched.
    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_preserves_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
        let err = ApiError::network(io);
        let source = std::error::Error::source(&err).expect("cause preserved");
        assert!(source.to_string().contains("connect timed out"));
    }

    #[test]
    fn feed_error_wraps_api_error() {
        let err = FeedError::from(ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        });
        assert!(matches!(err, FeedError::Api(ApiError::Status { status: 500, .. })));
    }
}
