//! Common types, errors, and configuration for wasm-calc.
//!
//! This crate provides shared functionality used across the wasm-calc workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures for the demo harness
//! - The [`TextCodec`] capability trait shared by native and fallback codecs

pub mod codec;
pub mod config;
pub mod error;

pub use codec::{DecodeError, TextCodec, Utf8TextCodec};
pub use config::{ConfigError, DemoConfig, InvokeConfig, ModuleConfig};
pub use error::BootstrapError;
