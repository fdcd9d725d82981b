//! The startup sequence.
//!
//! [`Bootstrap`] runs the strict linear order the harness guarantees:
//!
//! 1. Await the capability step; the module load must not begin before it
//!    resolves.
//! 2. Await the computation module load.
//! 3. Resolve the named export and invoke it with the configured arguments.
//! 4. Emit the result line through the sink.
//!
//! There is no retry, no timeout, and no recovery; every failure propagates
//! to the caller and the result line is never emitted on a failed run.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use wasm_calc_common::{BootstrapError, InvokeConfig, ModuleConfig};
use wasm_calc_core::{ModuleInvoker, ModuleLoader, WasmEngine, create_store};
use wasm_calc_host::{CapabilityContext, PolyfillSource, ensure_text_codec};
use wasm_calc_host::linker::register_all;

use crate::sink::ResultSink;

/// The bootstrap sequencer.
///
/// Built once at startup from injected collaborators, invoked once. The run
/// is fire-and-forget from the caller's perspective; it produces no value,
/// only the emitted line.
pub struct Bootstrap {
    engine: WasmEngine,
    capabilities: CapabilityContext,
    polyfill: Arc<dyn PolyfillSource>,
    loader: Arc<dyn ModuleLoader>,
    sink: Arc<dyn ResultSink>,
    module: ModuleConfig,
    invoke: InvokeConfig,
}

impl Bootstrap {
    /// Assemble the sequencer from its collaborators.
    pub fn new(
        engine: WasmEngine,
        capabilities: CapabilityContext,
        polyfill: Arc<dyn PolyfillSource>,
        loader: Arc<dyn ModuleLoader>,
        sink: Arc<dyn ResultSink>,
        module: ModuleConfig,
        invoke: InvokeConfig,
    ) -> Self {
        Self {
            engine,
            capabilities,
            polyfill,
            loader,
            sink,
            module,
            invoke,
        }
    }

    /// Run the bootstrap sequence once.
    ///
    /// # Errors
    ///
    /// Propagates the first failure of any step: `CapabilityLoad` from the
    /// polyfill step, `ModuleLoad` from module acquisition, `Invocation`
    /// from export resolution or the call itself.
    #[instrument(skip(self), fields(module_path = %self.module.path.display(), export = %self.invoke.export))]
    pub async fn run(&self) -> Result<(), BootstrapError> {
        // Step 1: the capability must resolve before anything touches the module
        let codec = ensure_text_codec(&self.capabilities, self.polyfill.as_ref()).await?;
        debug!(codec = codec.name(), "Capability step resolved");

        // Step 2: acquire the computation module
        let module = self.loader.load(&self.module.path).await?;
        debug!(content_hash = %module.content_hash(), "Computation module loaded");

        // Step 3: resolve the export and invoke it
        let mut invoker = ModuleInvoker::new(&self.engine);
        register_all(invoker.linker_mut())?;
        let mut store = create_store(&self.engine, codec);

        let value = invoker
            .call_binary(
                &module,
                &mut store,
                &self.invoke.export,
                self.invoke.lhs,
                self.invoke.rhs,
            )
            .await?;

        // Step 4: the single observable output line
        self.sink.emit(&format!("{}: {}", self.invoke.label, value));

        info!(value, "Bootstrap sequence complete");

        Ok(())
    }
}

impl std::fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bootstrap")
            .field("module_path", &self.module.path)
            .field("export", &self.invoke.export)
            .finish_non_exhaustive()
    }
}
