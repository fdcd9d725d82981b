//! Per-run host state and store creation.
//!
//! This module provides [`HostState`], the data attached to each Wasmtime
//! [`Store`]. Host functions reach it through the [`wasmtime::Caller`] API.
//! The state carries the resolved text codec, which is why a store cannot be
//! created until the capability step of the bootstrap has completed.

use std::sync::Arc;

use wasmtime::Store;

use crate::WasmEngine;
use wasm_calc_common::TextCodec;

/// Per-run execution state.
///
/// Created once per bootstrap run and dropped with the store afterwards.
pub struct HostState {
    /// The resolved text codec (native or installed fallback).
    codec: Arc<dyn TextCodec>,

    /// Lines emitted by guest code through the `env::log` host function.
    pub guest_logs: Vec<String>,
}

impl HostState {
    /// Create a new host state around the resolved codec.
    pub fn new(codec: Arc<dyn TextCodec>) -> Self {
        Self {
            codec,
            guest_logs: Vec::new(),
        }
    }

    /// The text codec host functions decode guest memory with.
    pub fn codec(&self) -> &Arc<dyn TextCodec> {
        &self.codec
    }

    /// Record a line emitted by guest code.
    pub fn record_guest_log(&mut self, line: String) {
        self.guest_logs.push(line);
    }
}

impl std::fmt::Debug for HostState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostState")
            .field("codec", &self.codec.name())
            .field("guest_logs", &self.guest_logs.len())
            .finish()
    }
}

/// Create a new Wasmtime store for one bootstrap run.
pub fn create_store(engine: &WasmEngine, codec: Arc<dyn TextCodec>) -> Store<HostState> {
    Store::new(engine.inner(), HostState::new(codec))
}
