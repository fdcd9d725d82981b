//! Core Wasmtime runtime for wasm-calc.
//!
//! This crate provides the fundamental WebAssembly execution capabilities:
//! - [`WasmEngine`]: Configured Wasmtime engine, shared and cloneable
//! - [`CompiledModule`]: Compiled WebAssembly module wrapper
//! - [`ModuleLoader`]: Abstract asynchronous module loading by logical path
//! - [`HostState`]: Per-run store data carrying the resolved text codec
//! - [`ModuleInvoker`]: Instantiation and typed export invocation

pub mod engine;
pub mod invoke;
pub mod loader;
pub mod module;
pub mod state;

pub use engine::WasmEngine;
pub use invoke::ModuleInvoker;
pub use loader::{FsModuleLoader, ModuleLoader};
pub use module::CompiledModule;
pub use state::{HostState, create_store};
