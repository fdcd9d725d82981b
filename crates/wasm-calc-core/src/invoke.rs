//! Module instantiation and typed export invocation.
//!
//! [`ModuleInvoker`] owns the linker, instantiates a compiled module into a
//! store, resolves the named `(i32, i32) -> i32` export, and calls it through
//! Wasmtime's async path.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use wasmtime::{Engine, Linker, Store};

use crate::{CompiledModule, WasmEngine, state::HostState};
use wasm_calc_common::BootstrapError;

/// Instantiates modules and invokes their exports.
///
/// Host functions are registered on the linker before invocation; each call
/// uses its own [`Store`] for isolation.
pub struct ModuleInvoker {
    engine: Arc<Engine>,
    linker: Linker<HostState>,
}

impl ModuleInvoker {
    /// Create a new invoker with an empty linker.
    pub fn new(engine: &WasmEngine) -> Self {
        let linker = Linker::new(engine.inner());

        Self {
            engine: Arc::new(engine.inner().clone()),
            linker,
        }
    }

    /// Get a mutable reference to the linker.
    ///
    /// Use this to register host functions before invoking.
    pub fn linker_mut(&mut self) -> &mut Linker<HostState> {
        &mut self.linker
    }

    /// Instantiate `module` and call its binary integer export.
    ///
    /// # Errors
    ///
    /// Returns `ModuleLoad` if instantiation fails and `Invocation` if the
    /// export is missing, has the wrong signature, or traps.
    #[instrument(skip(self, module, store), fields(export = %export, content_hash = %module.content_hash()))]
    pub async fn call_binary(
        &self,
        module: &CompiledModule,
        store: &mut Store<HostState>,
        export: &str,
        lhs: i32,
        rhs: i32,
    ) -> Result<i32, BootstrapError> {
        debug!("Instantiating module");

        let instance = self
            .linker
            .instantiate_async(&mut *store, module.inner())
            .await
            .map_err(|e| BootstrapError::module_load(format!("instantiation failed: {e}")))?;

        debug!("Module instantiated, resolving export");

        let func = instance
            .get_typed_func::<(i32, i32), i32>(&mut *store, export)
            .map_err(|e| {
                BootstrapError::invocation(export, format!("export missing or untyped: {e}"))
            })?;

        let value = func
            .call_async(&mut *store, (lhs, rhs))
            .await
            .map_err(|e| BootstrapError::invocation(export, format!("call trapped: {e}")))?;

        info!(lhs, rhs, value, "Export invoked");

        Ok(value)
    }

    /// Get the engine reference.
    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}

impl std::fmt::Debug for ModuleInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleInvoker").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_store;
    use wasm_calc_common::Utf8TextCodec;

    const ADD_WAT: &str = r#"
        (module
            (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add
            )
        )
    "#;

    #[tokio::test]
    async fn test_call_add() {
        let engine = WasmEngine::new().unwrap();
        let invoker = ModuleInvoker::new(&engine);
        let module = CompiledModule::from_wat(engine.inner(), ADD_WAT).unwrap();
        let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

        let value = invoker
            .call_binary(&module, &mut store, "add", 4, 6)
            .await
            .unwrap();

        assert_eq!(value, 10);
    }

    #[tokio::test]
    async fn test_call_is_repeatable() {
        let engine = WasmEngine::new().unwrap();
        let invoker = ModuleInvoker::new(&engine);
        let module = CompiledModule::from_wat(engine.inner(), ADD_WAT).unwrap();
        let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

        let first = invoker
            .call_binary(&module, &mut store, "add", 1, 2)
            .await
            .unwrap();
        let second = invoker
            .call_binary(&module, &mut store, "add", 40, 2)
            .await
            .unwrap();

        assert_eq!(first, 3);
        assert_eq!(second, 42);
    }

    #[tokio::test]
    async fn test_missing_export() {
        let engine = WasmEngine::new().unwrap();
        let invoker = ModuleInvoker::new(&engine);
        let module = CompiledModule::from_wat(engine.inner(), "(module)").unwrap();
        let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

        let result = invoker.call_binary(&module, &mut store, "add", 4, 6).await;

        assert!(result.unwrap_err().is_invocation());
    }

    #[tokio::test]
    async fn test_wrongly_typed_export() {
        let wat = r#"
            (module
                (func (export "add") (param i32) (result i32)
                    local.get 0
                )
            )
        "#;

        let engine = WasmEngine::new().unwrap();
        let invoker = ModuleInvoker::new(&engine);
        let module = CompiledModule::from_wat(engine.inner(), wat).unwrap();
        let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

        let result = invoker.call_binary(&module, &mut store, "add", 4, 6).await;

        assert!(result.unwrap_err().is_invocation());
    }

    #[tokio::test]
    async fn test_trapping_export() {
        let wat = r#"
            (module
                (func (export "add") (param i32 i32) (result i32)
                    unreachable
                )
            )
        "#;

        let engine = WasmEngine::new().unwrap();
        let invoker = ModuleInvoker::new(&engine);
        let module = CompiledModule::from_wat(engine.inner(), wat).unwrap();
        let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

        let result = invoker.call_binary(&module, &mut store, "add", 4, 6).await;

        assert!(result.unwrap_err().is_invocation());
    }
}
