//! # Shopkit Config
//!
//! Configuration management for Shopkit.
//! Supports layered configuration from files and environment variables.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
