//! Host function registration for the Wasmtime linker.
//!
//! The harness exposes one host function to guest code: `env::log`, which
//! decodes a byte range of guest memory through the resolved text codec. This
//! is the consumer that makes the capability ordering real; a store only
//! exists once the codec has been resolved.

use tracing::{info, warn};
use wasmtime::{Caller, Linker};

use wasm_calc_core::HostState;
use wasm_calc_common::BootstrapError;

/// Register all host functions on the linker.
///
/// # Errors
///
/// Returns an error if function registration fails.
pub fn register_all(linker: &mut Linker<HostState>) -> Result<(), BootstrapError> {
    register_guest_log(linker)?;
    Ok(())
}

/// Register `env::log(ptr: i32, len: i32)`.
///
/// The guest passes a pointer and byte length into its exported `memory`;
/// the bytes are decoded with the installed text codec, recorded on the
/// host state, and emitted via `tracing`.
pub fn register_guest_log(linker: &mut Linker<HostState>) -> Result<(), BootstrapError> {
    linker
        .func_wrap(
            "env",
            "log",
            |mut caller: Caller<'_, HostState>, ptr: i32, len: i32| {
                if ptr < 0 || len < 0 {
                    warn!(ptr, len, "Invalid pointer or length (negative value)");
                    return;
                }

                let Some(memory) = caller
                    .get_export("memory")
                    .and_then(wasmtime::Extern::into_memory)
                else {
                    warn!("Memory export not found in guest module");
                    return;
                };

                // Copy the bytes out before touching caller.data_mut()
                #[allow(clippy::cast_sign_loss)]
                let bytes = {
                    let data = memory.data(&caller);
                    let start = ptr as usize;
                    let Some(end) = start.checked_add(len as usize) else {
                        warn!(ptr, len, "Pointer + length overflow");
                        return;
                    };

                    if end > data.len() {
                        warn!(start, end, memory_size = data.len(), "Memory access out of bounds");
                        return;
                    }

                    data[start..end].to_vec()
                };

                let state = caller.data_mut();
                let line = match state.codec().decode(&bytes) {
                    Ok(line) => line,
                    Err(e) => {
                        warn!(error = %e, "Guest log bytes did not decode");
                        return;
                    }
                };

                info!(guest_log = true, "{}", line);
                state.record_guest_log(line);
            },
        )
        .map_err(|e| {
            BootstrapError::invalid_config(format!("Failed to register log function: {e}"))
        })?;

    Ok(())
}
