use std::time::Duration;

use http::{HeaderMap, StatusCode};
use thiserror::Error;
use url::Url;

/// Possible errors when interacting with `rlstats_lib`
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No API key was supplied when building the client
    #[error("no API key was supplied; pass one via `ClientBuilder::api_key`")]
    MissingApiKey,
    /// The server rejected the API key (HTTP 401)
    #[error("the API key was rejected by the server (HTTP 401)")]
    InvalidApiKey,
    /// The requested resource does not exist upstream (HTTP 404)
    #[error("resource not found: {0}")]
    NotFound(Url),
    /// Throttled (HTTP 429) with the retry budget exhausted, or while
    /// automatic rate limiting was disabled
    #[error("rate limited by the server after {attempts} dispatch attempt(s)")]
    RateLimited {
        /// How many times the request was dispatched before giving up
        attempts: u32,
    },
    /// Any other response status outside the 2xx range
    #[error("unexpected response status {status} from {url}")]
    BadResponse {
        /// The offending status code
        status: StatusCode,
        /// The requested endpoint
        url: Url,
        /// Response headers, for diagnostics
        headers: HeaderMap,
        /// Response body, truncated for diagnostics
        body: String,
    },
    /// The request could not be completed: timeout, transport failure,
    /// or a body that is not valid JSON
    #[error("server error while requesting {url}")]
    ServerError {
        /// The requested endpoint
        url: Url,
        /// What went wrong during the exchange
        #[source]
        source: DispatchError,
    },
    /// The given endpoint path cannot be joined onto the API root
    #[error("cannot build endpoint URL from `{0}`")]
    InvalidEndpoint(String, #[source] url::ParseError),
    /// The user agent could not be turned into a header value
    #[error("header could not be parsed")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),
    /// The request client cannot be created
    #[error("failed to build the request client")]
    BuildRequestClient(#[source] reqwest::Error),
}

/// Low-level failure of a single dispatch attempt.
///
/// Kept separate from [`ErrorKind`] so that a decode failure stays
/// distinguishable from a network failure before both are folded into
/// [`ErrorKind::ServerError`].
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The overall per-call deadline elapsed
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The transport layer failed before a response was read
    #[error("network error")]
    Transport(#[from] reqwest::Error),
    /// A success response carried a body that did not decode
    #[error("response body is not the expected JSON")]
    Decode(#[from] serde_json::Error),
}

impl ErrorKind {
    /// Returns the HTTP status code associated with this error, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidApiKey => Some(StatusCode::UNAUTHORIZED),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::BadResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}
