use crate::auth::AuthError;
use crate::response::RawResponse;
use thiserror::Error;

/// Classification of URL validation failures.
///
/// Provides programmatic matching for different failure modes without
/// relying on unstable error message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidUriKind {
    /// URL could not be parsed (malformed syntax)
    ParseError,
    /// URL is missing required host/authority component
    MissingAuthority,
    /// URL is missing required scheme (http/https)
    MissingScheme,
    /// URL is wrapped in template or quote characters (`{`, `}`, `"`)
    Quoted,
}

/// Transport-level error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HttpError {
    /// Request building failed
    #[error("Failed to build request: {0}")]
    RequestBuild(#[from] http::Error),

    /// Invalid header name
    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    /// Request timed out
    #[error("Request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// Transport error (network, connection, etc)
    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// TLS error
    #[error("TLS error: {0}")]
    Tls(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body exceeded size limit
    #[error("Response body too large: limit {limit} bytes, got {actual} bytes")]
    BodyTooLarge { limit: usize, actual: usize },

    /// HTTP non-2xx status, raised by [`crate::HttpResponse::error_for_status`]
    #[error("HTTP {status}: {body_preview}")]
    HttpStatus {
        status: http::StatusCode,
        body_preview: String,
        content_type: Option<String>,
    },

    /// JSON encoding or decoding error
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Form URL encoding error
    #[error("Form encoding failed: {0}")]
    FormEncode(#[from] serde_urlencoded::ser::Error),

    /// Invalid URL (failed to parse)
    ///
    /// Use the `kind` field for programmatic matching. The `reason` field contains
    /// a diagnostic message intended for logging only.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUri {
        /// The URL that failed to parse
        url: String,
        /// Structured failure classification for programmatic matching
        kind: InvalidUriKind,
        /// Diagnostic message (unstable format, for logging only)
        reason: String,
    },

    /// Invalid URL scheme for transport security configuration
    #[error("URL scheme '{scheme}' not allowed: {reason}")]
    InvalidScheme {
        /// The URL scheme that was rejected
        scheme: String,
        /// Reason the scheme was rejected
        reason: String,
    },
}

impl From<hyper::Error> for HttpError {
    fn from(err: hyper::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}

impl From<hyper_util::client::legacy::Error> for HttpError {
    fn from(err: hyper_util::client::legacy::Error) -> Self {
        HttpError::Transport(Box::new(err))
    }
}

/// Error returned by every service operation.
///
/// Local failures (`Validation`, `ServiceUrlMissing`, `Serialization`, ...)
/// never carry a response. `Service` and `Decode` carry the raw response the
/// server returned, reachable through [`SdkError::response`].
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SdkError {
    /// A required parameter was missing or malformed; no request was sent
    #[error("validation failed: {0}")]
    Validation(String),

    /// The client has no service URL configured; no request was sent
    #[error("service URL is empty")]
    ServiceUrlMissing,

    /// The configured service URL cannot be used
    #[error("invalid service URL: {0}")]
    InvalidServiceUrl(#[source] HttpError),

    /// External configuration could not be turned into a client
    #[error("configuration error: {0}")]
    Config(String),

    /// The authenticator failed to produce credentials
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),

    /// The request could not be sent or the response body could not be read
    #[error("{0}")]
    Http(#[from] HttpError),

    /// The request body could not be encoded
    #[error("failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The server answered with a non-2xx status
    #[error("{message}")]
    Service {
        response: Box<RawResponse>,
        message: String,
    },

    /// The server answered 2xx but the body did not match the expected model
    #[error("failed to decode response body: {source}")]
    Decode {
        response: Box<RawResponse>,
        #[source]
        source: serde_json::Error,
    },
}

impl SdkError {
    /// Raw response attached to this error, if the server was reached
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            SdkError::Service { response, .. } | SdkError::Decode { response, .. } => {
                Some(response)
            }
            _ => None,
        }
    }

    /// HTTP status code of the attached response, if any
    #[must_use]
    pub fn status(&self) -> Option<http::StatusCode> {
        self.response().map(|r| r.status)
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        SdkError::Validation(msg.into())
    }
}
