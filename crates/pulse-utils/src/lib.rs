//! Shared utilities for market-pulse
//!
//! This crate provides common functionality used across the market-pulse workspace:
//! tracing setup and the environment-driven configuration shared by the panels
//! and the generative client.

pub mod config;
pub mod logging;

pub use config::{ConfigError, PulseConfig, PulseConfigBuilder};
pub use logging::{init_tracing, init_tracing_with};
