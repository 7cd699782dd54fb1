//! # Host Bridge Traits
//!
//! Platform abstraction traits consumed by the hydration core.
//!
//! ## Overview
//!
//! This crate defines the contract between the metadata core and
//! platform-specific implementations. The core never talks to the network or
//! the system clock directly; it goes through these traits so that hosts can
//! swap transports and tests can run without I/O.
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Single-attempt async HTTP requests
//! - [`Clock`](time::Clock) - Time source for deterministic testing
//!
//! | Platform | Implementation Crate |
//! |----------|---------------------|
//! | Desktop  | `bridge-desktop`    |
//!
//! ## Error Handling
//!
//! All bridge traits use the [`BridgeError`](error::BridgeError) type. Transport
//! implementations should report deadline expiry as
//! [`BridgeError::Timeout`](error::BridgeError::Timeout) so callers can tell it
//! apart from other failures.
//!
//! ## Thread Safety
//!
//! All bridge traits require `Send + Sync` bounds to support safe concurrent usage
//! across async tasks.

pub mod error;
pub mod http;
pub mod time;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use time::{Clock, LogLevel, ManualClock, SystemClock};
