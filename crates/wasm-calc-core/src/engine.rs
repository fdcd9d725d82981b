//! Wasmtime engine configuration and creation.
//!
//! The [`WasmEngine`] is the foundation of the harness. It is thread-safe,
//! cheap to clone, and contains no per-run state. Async support is always on:
//! both suspension points of the bootstrap sequence (polyfill fetch, module
//! load) live on one cooperative thread of control, and invocation goes
//! through Wasmtime's async call path.

use std::sync::Arc;

use tracing::info;
use wasmtime::{Config, Engine, OptLevel};

use wasm_calc_common::BootstrapError;

/// Thread-safe WebAssembly engine wrapper.
///
/// The demonstration harness needs none of Wasmtime's resource-limiting
/// machinery (fuel, epochs, pooling); the sequence runs to completion or
/// fails, so the engine is configured for plain async execution only.
#[derive(Clone)]
pub struct WasmEngine {
    engine: Arc<Engine>,
}

impl WasmEngine {
    /// Create a new WebAssembly engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the Wasmtime configuration is rejected.
    pub fn new() -> Result<Self, BootstrapError> {
        let mut config = Config::new();

        // Async support so host functions and invocation never block the runtime
        config.async_support(true);

        config.cranelift_opt_level(OptLevel::Speed);

        let engine = Engine::new(&config).map_err(|e| {
            BootstrapError::invalid_config(format!("Failed to create Wasmtime engine: {e}"))
        })?;

        info!("Wasmtime engine initialized");

        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    /// Get a reference to the inner Wasmtime engine.
    pub fn inner(&self) -> &Engine {
        &self.engine
    }
}

impl std::fmt::Debug for WasmEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WasmEngine").finish_non_exhaustive()
    }
}
