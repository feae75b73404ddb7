//! # Shopkit Core
//!
//! Core types, errors, and telemetry for the Shopkit commerce backend.
//! This crate provides the foundational abstractions used across all layers.

pub mod error;
pub mod id;
pub mod result;
pub mod telemetry;

pub use error::*;
pub use id::*;
pub use result::*;
pub use telemetry::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
