//! `rlstats` is a client library for the Rocket League Stats API.
//! "Hello world" example:
//! ```no_run
//! use rlstats_lib::{ClientBuilder, Platform, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!   let client = ClientBuilder::builder()
//!       .api_key("YOUR-API-KEY")
//!       .build()
//!       .client()?;
//!   let player = client.player("76561198033338223", Platform::Steam).await?;
//!   println!("{player}");
//!   Ok(())
//! }
//! ```
//!
//! The API allows one request per key every 500ms. The client spaces
//! concurrent requests sharing a key in arrival order and transparently
//! retries throttled calls; see the [`ratelimit`] module for the
//! mechanism and [`ClientBuilder`] for the knobs.

mod client;
mod executor;
pub mod ratelimit;
mod types;

#[cfg(test)]
#[macro_use]
pub mod test_utils;

pub use client::{
    Client, ClientBuilder, DEFAULT_API_ROOT, DEFAULT_MAX_ATTEMPTS, DEFAULT_MIN_REQUEST_INTERVAL,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use ratelimit::{AdmissionQueue, ApiKey, Ticket};
pub use types::*;
