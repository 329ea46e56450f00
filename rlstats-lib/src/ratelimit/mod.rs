//! Per-API-key request admission.
//!
//! The Rocket League Stats API allows one request per key every 500ms.
//! This module serializes concurrent requests sharing a key so that they
//! go out one at a time, in arrival order, with the required spacing.
//!
//! # Architecture
//!
//! - [`ApiKey`]: opaque credential partitioning all rate-limit state
//! - [`Ticket`]: FIFO admission marker for one pending request
//! - [`AdmissionQueue`]: per-key ticket queues plus last-dispatch times,
//!   behind `acquire` / `await_turn` / `release`

mod key;
mod queue;

pub use key::ApiKey;
pub use queue::{AdmissionQueue, Ticket};
