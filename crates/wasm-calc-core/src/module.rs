//! WebAssembly module compilation.
//!
//! This module provides [`CompiledModule`], a wrapper around Wasmtime's
//! [`Module`] that validates the artifact before compiling and carries a
//! content hash for log correlation.

use std::hash::{DefaultHasher, Hash, Hasher};

use tracing::{info, instrument};
use wasmtime::{Engine, Module};

use wasm_calc_common::BootstrapError;

/// A compiled WebAssembly module.
///
/// Thread-safe and cheap to clone; the underlying Wasmtime module is shared.
#[derive(Clone)]
pub struct CompiledModule {
    inner: Module,

    /// Hash of the original artifact bytes, for correlating log lines.
    content_hash: String,
}

impl CompiledModule {
    /// Compile a module from WebAssembly bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a WebAssembly module or
    /// compilation fails.
    #[instrument(skip(engine, bytes), fields(bytes_len = bytes.len()))]
    pub fn from_bytes(engine: &Engine, bytes: &[u8]) -> Result<Self, BootstrapError> {
        Self::validate_wasm_header(bytes)?;

        let module = Module::new(engine, bytes)
            .map_err(|e| BootstrapError::module_load(format!("compilation failed: {e}")))?;

        let content_hash = compute_hash(bytes);

        info!(content_hash = %content_hash, "Module compiled");

        Ok(Self {
            inner: module,
            content_hash,
        })
    }

    /// Compile a module from WAT (WebAssembly Text Format).
    ///
    /// Used for the committed demo artifact and for tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the WAT source does not compile.
    #[instrument(skip(engine, wat))]
    pub fn from_wat(engine: &Engine, wat: &str) -> Result<Self, BootstrapError> {
        let module = Module::new(engine, wat)
            .map_err(|e| BootstrapError::module_load(format!("WAT compilation failed: {e}")))?;

        let content_hash = compute_hash(wat.as_bytes());

        info!(content_hash = %content_hash, "WAT module compiled");

        Ok(Self {
            inner: module,
            content_hash,
        })
    }

    /// Get the inner Wasmtime module.
    pub fn inner(&self) -> &Module {
        &self.inner
    }

    /// Get the content hash of the original artifact.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Validate WebAssembly header (magic number).
    fn validate_wasm_header(bytes: &[u8]) -> Result<(), BootstrapError> {
        if bytes.len() < 8 {
            return Err(BootstrapError::module_load("invalid Wasm: file too small"));
        }

        // Check magic number: \0asm
        if &bytes[0..4] != b"\0asm" {
            return Err(BootstrapError::module_load("invalid Wasm: bad magic number"));
        }

        Ok(())
    }
}

impl std::fmt::Debug for CompiledModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledModule")
            .field("content_hash", &self.content_hash)
            .finish_non_exhaustive()
    }
}

/// Compute a hash of the given bytes.
fn compute_hash(bytes: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
