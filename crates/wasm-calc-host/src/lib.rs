//! Capability detection, polyfill loading, and host functions for wasm-calc.
//!
//! This crate owns the one decision point of the harness: detect whether the
//! host provides a text-encoding capability and, if not, asynchronously load
//! and install a fallback before anything else runs.

pub mod capability;
pub mod linker;
pub mod polyfill;

pub use capability::{CapabilityContext, ensure_text_codec};
pub use polyfill::{BundledPolyfillSource, FallbackTextCodec, PolyfillSource};
