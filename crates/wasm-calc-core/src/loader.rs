//! Abstract module loading by logical path.
//!
//! The bootstrap sequence acquires its computation module through the
//! [`ModuleLoader`] trait, decoupling it from any concrete resolution
//! mechanism. [`FsModuleLoader`] is the shipped implementation; tests inject
//! their own to control timing and failure.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::{CompiledModule, WasmEngine};
use wasm_calc_common::BootstrapError;

/// Asynchronous module acquisition.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    /// Load and compile the module behind `path`.
    ///
    /// # Errors
    ///
    /// Returns a `ModuleLoad` error if the artifact cannot be read or
    /// compiled. The bootstrap treats this as fatal.
    async fn load(&self, path: &Path) -> Result<CompiledModule, BootstrapError>;
}

/// Loads module artifacts from the filesystem.
///
/// Artifacts ending in `.wat` are compiled from text; everything else is
/// treated as binary Wasm.
#[derive(Debug, Clone)]
pub struct FsModuleLoader {
    engine: WasmEngine,
}

impl FsModuleLoader {
    /// Create a new filesystem loader backed by the shared engine.
    pub fn new(engine: WasmEngine) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ModuleLoader for FsModuleLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    async fn load(&self, path: &Path) -> Result<CompiledModule, BootstrapError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            BootstrapError::module_load(format!("cannot read '{}': {e}", path.display()))
        })?;

        debug!(bytes_len = bytes.len(), "Module artifact read");

        if path.extension().is_some_and(|ext| ext == "wat") {
            let wat = std::str::from_utf8(&bytes).map_err(|e| {
                BootstrapError::module_load(format!("'{}' is not valid WAT: {e}", path.display()))
            })?;
            CompiledModule::from_wat(self.engine.inner(), wat)
        } else {
            CompiledModule::from_bytes(self.engine.inner(), &bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_file() {
        let engine = WasmEngine::new().unwrap();
        let loader = FsModuleLoader::new(engine);

        let result = loader.load(Path::new("./does-not-exist.wasm")).await;

        assert!(result.unwrap_err().is_module_load());
    }

    #[tokio::test]
    async fn test_load_wat_file() {
        let engine = WasmEngine::new().unwrap();
        let loader = FsModuleLoader::new(engine);

        let dir = std::env::temp_dir();
        let path = dir.join("wasm-calc-loader-test.wat");
        tokio::fs::write(&path, "(module)").await.unwrap();

        let result = loader.load(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_load_rejects_non_wasm_bytes() {
        let engine = WasmEngine::new().unwrap();
        let loader = FsModuleLoader::new(engine);

        let dir = std::env::temp_dir();
        let path = dir.join("wasm-calc-loader-test.wasm");
        tokio::fs::write(&path, b"not a wasm module").await.unwrap();

        let result = loader.load(&path).await;
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(result.unwrap_err().is_module_load());
    }
}
