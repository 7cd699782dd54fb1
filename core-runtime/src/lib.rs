//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the hydration core:
//! - Logging and tracing infrastructure
//! - Configuration management
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the logging conventions and the validated configuration
//! used to build the MusicBrainz lookup path.

pub mod config;
pub mod error;
pub mod logging;

pub use config::HydrationConfig;
pub use error::{Error, Result};
