//! Error types for the exchange pipeline.
//!
//! # Design
//! Every failure is terminal for the `send` call it happened in; nothing is
//! retried here. The variants keep the four failure sources apart so callers
//! can tell a rejected response (`Validation`, `Middleware`) from a network
//! problem (`Transport`) and from a body that would not convert (`Decode`).

use url::Url;

use crate::status::StatusCode;

/// Boxed error used for failures raised by third-party code.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias using [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request could not be built from its parts.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A built-in validator rejected the response.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A user-supplied middleware hook failed.
    #[error("middleware failed: {0}")]
    Middleware(#[source] BoxError),

    /// The transport could not complete the exchange.
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    /// Wrap an arbitrary error raised from a middleware hook.
    pub fn middleware<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Middleware(err.into())
    }

    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }
}

/// Raised by the built-in response validators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unexpected status {status} from {url}")]
    BadStatusCode { url: Url, status: StatusCode },

    /// The request declared `Accept` but the response had no usable `Content-Type`.
    #[error("response from {url} has no Content-Type, expected {expected}")]
    MissingContentType { url: Url, expected: String },

    #[error("response from {url} has Content-Type {received}, expected {expected}")]
    ContentTypeMismatch {
        url: Url,
        expected: String,
        received: String,
    },
}

/// The response body could not be converted to the requested form.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to decode JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("body is not valid {encoding} text")]
    Text { encoding: String },

    #[error("unsupported text encoding: {0}")]
    UnsupportedEncoding(String),
}
