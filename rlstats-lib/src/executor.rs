//! Dispatch of single logical API calls.
//!
//! The [`RequestExecutor`] performs one call with bounded total latency:
//! admission through the per-key queue, the HTTP exchange under a
//! deadline, response classification, and a bounded retry loop for
//! server-signaled throttling.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode};
use reqwest::header;
use serde_json::Value;
use url::Url;

use crate::ratelimit::{AdmissionQueue, ApiKey};
use crate::types::{DispatchError, ErrorKind, Result};

/// Response header carrying the server's throttle back-off hint, in
/// milliseconds.
const RETRY_AFTER_MS: &str = "retry-after-ms";

/// Longest slice of a response body echoed into diagnostics.
const MAX_DIAGNOSTIC_BODY: usize = 2048;

/// One API request before dispatch: an API-root-relative path plus
/// parameters.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    path: String,
    method: Method,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl ApiRequest {
    pub(crate) fn get(path: String) -> Self {
        Self {
            path,
            method: Method::GET,
            query: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn post(path: String, body: Value) -> Self {
        Self {
            path,
            method: Method::POST,
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub(crate) fn query(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.query.push((name, value.into()));
        self
    }
}

/// Successful outcome of [`RequestExecutor::execute`].
#[derive(Debug)]
pub(crate) struct ApiResponse {
    pub(crate) status: StatusCode,
    pub(crate) url: Url,
    pub(crate) body: Value,
}

/// Classification of one dispatch attempt that did not fail outright.
#[derive(Debug)]
enum Attempt {
    Success(ApiResponse),
    Throttled { backoff: Duration },
}

/// Performs logical API calls for one client.
///
/// Holds the credential, the admission queue shared by all calls under
/// that credential, and the retry policy. Cloning is cheap and clones
/// share the queue.
#[derive(Debug, Clone)]
pub(crate) struct RequestExecutor {
    http: reqwest::Client,
    queue: Arc<AdmissionQueue>,
    key: ApiKey,
    api_root: Url,
    timeout: Duration,
    rate_limited: bool,
    max_attempts: u32,
}

impl RequestExecutor {
    pub(crate) fn new(
        http: reqwest::Client,
        queue: AdmissionQueue,
        key: ApiKey,
        api_root: Url,
        timeout: Duration,
        rate_limited: bool,
        max_attempts: u32,
    ) -> Self {
        Self {
            http,
            queue: Arc::new(queue),
            key,
            api_root,
            timeout,
            rate_limited,
            max_attempts,
        }
    }

    /// Perform one logical API call.
    ///
    /// When the server throttles (HTTP 429) and rate limiting is enabled,
    /// the call is re-dispatched through the admission queue while
    /// `attempts_made < max_attempts`, sleeping out the server's back-off
    /// hint in between. Retries are invisible to the caller except as
    /// latency.
    pub(crate) async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut attempts_made = 0;
        loop {
            attempts_made += 1;
            match self.dispatch(request).await? {
                Attempt::Success(response) => return Ok(response),
                Attempt::Throttled { backoff } => {
                    if !self.rate_limited || attempts_made >= self.max_attempts {
                        return Err(ErrorKind::RateLimited {
                            attempts: attempts_made,
                        });
                    }
                    log::debug!(
                        "throttled on {}, backing off {}ms before attempt {}/{}",
                        request.path,
                        backoff.as_millis(),
                        attempts_made + 1,
                        self.max_attempts
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }

    /// One dispatch attempt: admission, exchange, classification.
    ///
    /// The admission ticket is held in a guard, so it is released on
    /// every exit path, including a deadline firing mid-exchange. Each
    /// attempt stamps the key's last-dispatch time exactly once, through
    /// that release.
    async fn dispatch(&self, request: &ApiRequest) -> Result<Attempt> {
        let _turn = if self.rate_limited {
            let turn = self.queue.enter(&self.key);
            turn.wait().await;
            Some(turn)
        } else {
            None
        };

        let url = self.endpoint_url(request)?;
        log::debug!("{} {}", request.method, url);
        let (status, headers, text) = self.send(&url, request).await?;
        self.classify(url, status, &headers, text)
    }

    fn endpoint_url(&self, request: &ApiRequest) -> Result<Url> {
        self.api_root
            .join(&request.path)
            .map_err(|source| ErrorKind::InvalidEndpoint(request.path.clone(), source))
    }

    /// Run the HTTP exchange (send plus body read) under the per-call
    /// deadline.
    async fn send(
        &self,
        url: &Url,
        request: &ApiRequest,
    ) -> Result<(StatusCode, HeaderMap, String)> {
        let mut builder = self
            .http
            .request(request.method.clone(), url.clone())
            .header(header::AUTHORIZATION, self.key.expose());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let headers = response.headers().clone();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, headers, text))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(parts)) => Ok(parts),
            Ok(Err(source)) => Err(ErrorKind::ServerError {
                url: url.clone(),
                source: DispatchError::Transport(source),
            }),
            Err(_) => Err(ErrorKind::ServerError {
                url: url.clone(),
                source: DispatchError::Timeout(self.timeout),
            }),
        }
    }

    /// Map a completed exchange onto the error taxonomy.
    fn classify(
        &self,
        url: Url,
        status: StatusCode,
        headers: &HeaderMap,
        text: String,
    ) -> Result<Attempt> {
        match status.as_u16() {
            429 => Ok(Attempt::Throttled {
                backoff: retry_hint(headers).unwrap_or_else(|| self.queue.min_interval()),
            }),
            404 => Err(ErrorKind::NotFound(url)),
            401 => Err(ErrorKind::InvalidApiKey),
            code if code >= 300 => Err(ErrorKind::BadResponse {
                status,
                url,
                headers: headers.clone(),
                body: truncate_body(text),
            }),
            _ => match serde_json::from_str(&text) {
                Ok(body) => Ok(Attempt::Success(ApiResponse { status, url, body })),
                Err(source) => Err(ErrorKind::ServerError {
                    url,
                    source: DispatchError::Decode(source),
                }),
            },
        }
    }
}

/// Parse the server's throttle back-off hint, if present and sane.
fn retry_hint(headers: &HeaderMap) -> Option<Duration> {
    let millis = headers.get(RETRY_AFTER_MS)?.to_str().ok()?.parse().ok()?;
    Some(Duration::from_millis(millis))
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_DIAGNOSTIC_BODY {
        let mut end = MAX_DIAGNOSTIC_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
    }
    body
}
