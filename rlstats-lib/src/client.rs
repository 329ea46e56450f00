//! Handler of API calls.
//!
//! This module defines two structs, [`Client`] and [`ClientBuilder`].
//! `Client` exposes one method per API endpoint; `ClientBuilder`
//! configures the credential, rate limiting, and timeouts behind it.

use std::time::Duration;

use http::header::{HeaderMap, HeaderValue};
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use typed_builder::TypedBuilder;
use url::Url;

use crate::executor::{ApiRequest, ApiResponse, RequestExecutor};
use crate::ratelimit::{AdmissionQueue, ApiKey};
use crate::types::{DispatchError, ErrorKind, Platform, PlatformInfo, Result};
use crate::{Player, Playlist, SearchPage, Season, Stat, Tier};

/// Default per-call timeout in seconds, 15.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Default minimum gap between two requests sharing an API key, 500ms.
pub const DEFAULT_MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(500);
/// Default number of dispatch attempts for a throttled request, 6.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 6;
/// Default user agent, `rlstats/<PKG_VERSION>`.
pub const DEFAULT_USER_AGENT: &str = concat!("rlstats/", env!("CARGO_PKG_VERSION"));
/// Production API root.
pub const DEFAULT_API_ROOT: &str = "https://api.rocketleaguestats.com/";

/// Builder for [`Client`].
///
/// See crate-level documentation for usage example.
#[derive(TypedBuilder, Debug, Clone)]
#[builder(field_defaults(default, setter(into)))]
#[builder(builder_method(doc = "
Create a builder for building `ClientBuilder`.

On the builder call, call methods with same name as its fields to set their values.

Finally, call `.build()` to create the instance of `ClientBuilder`.
"))]
pub struct ClientBuilder {
    /// API key for <https://rocketleaguestats.com>.
    ///
    /// Required; building a client without one fails with
    /// [`ErrorKind::MissingApiKey`].
    #[builder(setter(strip_option))]
    api_key: Option<SecretString>,
    /// Whether requests are automatically spaced out per key and retried
    /// on throttling.
    ///
    /// When `false`, every call dispatches immediately and a 429 response
    /// surfaces as [`ErrorKind::RateLimited`] right away; pacing is then
    /// the caller's problem.
    #[builder(default = true)]
    rate_limited: bool,
    /// Overall deadline for one dispatch attempt, including reading the
    /// body.
    #[builder(default = Duration::from_secs(DEFAULT_TIMEOUT_SECS))]
    timeout: Duration,
    /// Minimum wall-clock gap between two dispatches sharing the key.
    ///
    /// The upstream quota is one request per 500ms; lowering this only
    /// makes sense against a private deployment.
    #[builder(default = DEFAULT_MIN_REQUEST_INTERVAL)]
    min_request_interval: Duration,
    /// How many times one logical call may be dispatched before a 429
    /// becomes [`ErrorKind::RateLimited`].
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,
    /// User-agent sent with every request.
    #[builder(default_code = "String::from(DEFAULT_USER_AGENT)")]
    user_agent: String,
    /// Extra default headers, e.g. for a proxy.
    custom_headers: HeaderMap,
    /// API root URL. Override to point the client at a test server.
    #[builder(setter(strip_option))]
    api_root: Option<Url>,
    /// Version segment of the endpoint paths (`/v1/...`).
    #[builder(default = 1)]
    api_version: u8,
}

impl Default for ClientBuilder {
    #[must_use]
    #[inline]
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClientBuilder {
    /// Instantiates a [`Client`].
    ///
    /// # Errors
    ///
    /// Returns an `Err` if:
    /// - No API key was supplied.
    /// - The user-agent is invalid.
    /// - The request client cannot be created.
    pub fn client(self) -> Result<Client> {
        let api_key = match self.api_key.as_ref().map(ExposeSecret::expose_secret) {
            Some(key) if !key.is_empty() => ApiKey::new(key),
            _ => return Err(ErrorKind::MissingApiKey),
        };

        let mut headers = self.custom_headers;
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&self.user_agent).map_err(ErrorKind::InvalidHeader)?,
        );

        let http = reqwest::ClientBuilder::new()
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(ErrorKind::BuildRequestClient)?;

        let api_root = match self.api_root {
            Some(url) => url,
            None => Url::parse(DEFAULT_API_ROOT)
                .map_err(|source| ErrorKind::InvalidEndpoint(DEFAULT_API_ROOT.to_string(), source))?,
        };

        let queue = AdmissionQueue::new(self.min_request_interval);

        Ok(Client {
            executor: RequestExecutor::new(
                http,
                queue,
                api_key,
                api_root,
                self.timeout,
                self.rate_limited,
                self.max_attempts,
            ),
            api_version: self.api_version,
        })
    }
}

/// Client for the Rocket League Stats API.
///
/// One method per endpoint; every method goes through the same per-key
/// admission queue when rate limiting is enabled. Cloning is cheap and
/// clones share that queue.
///
/// See [`ClientBuilder`] which contains sane defaults for all
/// configuration options.
#[derive(Debug, Clone)]
pub struct Client {
    executor: RequestExecutor,
    api_version: u8,
}

impl Client {
    fn path(&self, tail: &str) -> String {
        format!("v{}/{}", self.api_version, tail)
    }

    /// The platforms the API knows about.
    ///
    /// Platforms with ids this crate does not know are skipped.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn platforms(&self) -> Result<Vec<Platform>> {
        let request = ApiRequest::get(self.path("data/platforms"));
        let infos: Vec<PlatformInfo> = decode(self.executor.execute(&request).await?)?;
        Ok(infos.into_iter().filter_map(|info| info.platform()).collect())
    }

    /// All playlists with their current per-platform populations.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn playlists(&self) -> Result<Vec<Playlist>> {
        let request = ApiRequest::get(self.path("data/playlists"));
        decode(self.executor.execute(&request).await?)
    }

    /// All competitive seasons, past and current.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn seasons(&self) -> Result<Vec<Season>> {
        let request = ApiRequest::get(self.path("data/seasons"));
        decode(self.executor.execute(&request).await?)
    }

    /// The ranked tiers of the latest season.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn tiers(&self) -> Result<Vec<Tier>> {
        let request = ApiRequest::get(self.path("data/tiers"));
        decode(self.executor.execute(&request).await?)
    }

    /// Look up a single player by platform-specific id.
    ///
    /// `unique_id` is a 64-bit Steam id on Steam and a gamertag / PSN
    /// name elsewhere.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::NotFound`] if the player is unknown upstream, or any
    /// other [`ErrorKind`] raised by the exchange
    pub async fn player(&self, unique_id: &str, platform: Platform) -> Result<Player> {
        let request = ApiRequest::get(self.path("player"))
            .query("unique_id", unique_id)
            .query("platform_id", platform.id().to_string());
        decode(self.executor.execute(&request).await?)
    }

    /// Look up a batch of players in one request.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn players(&self, requests: &[(String, Platform)]) -> Result<Vec<Player>> {
        let body = requests
            .iter()
            .map(|(unique_id, platform)| {
                serde_json::json!({
                    "uniqueId": unique_id,
                    "platformId": platform.id().to_string(),
                })
            })
            .collect();
        let request = ApiRequest::post(self.path("player/batch"), Value::Array(body));
        decode(self.executor.execute(&request).await?)
    }

    /// Search players by display name, one page at a time.
    ///
    /// Pages are zero-based; [`SearchPage::has_more`] tells whether it is
    /// worth asking for the next one.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn search_players(&self, display_name: &str, page: u64) -> Result<SearchPage> {
        let request = ApiRequest::get(self.path("search/players"))
            .query("display_name", display_name)
            .query("page", page.to_string());
        decode(self.executor.execute(&request).await?)
    }

    /// The top 100 players of a ranked playlist.
    ///
    /// See the `RANKED_*` constants for the playlist ids.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn ranked_leaderboard(&self, playlist_id: u64) -> Result<Vec<Player>> {
        let request = ApiRequest::get(self.path("leaderboard/ranked"))
            .query("playlist_id", playlist_id.to_string());
        decode(self.executor.execute(&request).await?)
    }

    /// The top 100 players by a lifetime stat.
    ///
    /// # Errors
    ///
    /// Any [`ErrorKind`] raised by the exchange
    pub async fn stat_leaderboard(&self, stat: Stat) -> Result<Vec<Player>> {
        let request =
            ApiRequest::get(self.path("leaderboard/stat")).query("type", stat.as_str());
        decode(self.executor.execute(&request).await?)
    }
}

/// Decode a successful response body into a typed model.
///
/// A shape mismatch is a server-side contract break, folded into
/// [`ErrorKind::ServerError`] like any other decode failure.
fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T> {
    let ApiResponse { url, body, .. } = response;
    serde_json::from_value(body).map_err(|source| ErrorKind::ServerError {
        url,
        source: DispatchError::Decode(source),
    })
}
