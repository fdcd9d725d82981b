//! Integration tests for wasm-calc-core.
//!
//! These tests verify the execution pipeline below the sequencer:
//! - WAT compilation to module
//! - Store creation with an injected codec
//! - Host function registration
//! - Typed export invocation

use std::sync::Arc;

use wasm_calc_common::Utf8TextCodec;
use wasm_calc_core::{CompiledModule, ModuleInvoker, WasmEngine, create_store};
use wasm_calc_host::FallbackTextCodec;
use wasm_calc_host::linker::register_all;

// ============================================================================
// Test: Basic Invocation
// ============================================================================

#[tokio::test]
async fn test_basic_invocation() {
    let wat = r#"
        (module
            (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add
            )
        )
    "#;

    let engine = WasmEngine::new().unwrap();
    let invoker = ModuleInvoker::new(&engine);

    let compiled = CompiledModule::from_wat(engine.inner(), wat).unwrap();
    let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

    let value = invoker
        .call_binary(&compiled, &mut store, "add", 4, 6)
        .await
        .unwrap();

    assert_eq!(value, 10);
}

// ============================================================================
// Test: Guest Logging Through the Codec
// ============================================================================

#[tokio::test]
async fn test_guest_log_captured() {
    let wat = r#"
        (module
            (import "env" "log" (func $log (param i32 i32)))
            (memory (export "memory") 1)
            (data (i32.const 0) "Hello from Wasm")

            (func (export "add") (param i32 i32) (result i32)
                (call $log (i32.const 0) (i32.const 15))
                local.get 0
                local.get 1
                i32.add
            )
        )
    "#;

    let engine = WasmEngine::new().unwrap();
    let mut invoker = ModuleInvoker::new(&engine);

    register_all(invoker.linker_mut()).unwrap();

    let compiled = CompiledModule::from_wat(engine.inner(), wat).unwrap();
    let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

    let value = invoker
        .call_binary(&compiled, &mut store, "add", 2, 3)
        .await
        .unwrap();

    assert_eq!(value, 5);

    let logs = &store.data().guest_logs;
    assert_eq!(logs.len(), 1, "Expected 1 guest log, got {}", logs.len());
    assert_eq!(logs[0], "Hello from Wasm");
}

// ============================================================================
// Test: Guest Logging Through the Fallback Codec
// ============================================================================

#[tokio::test]
async fn test_guest_log_with_fallback_codec() {
    let wat = r#"
        (module
            (import "env" "log" (func $log (param i32 i32)))
            (memory (export "memory") 1)
            (data (i32.const 0) "fallback path")

            (func (export "add") (param i32 i32) (result i32)
                (call $log (i32.const 0) (i32.const 13))
                local.get 0
                local.get 1
                i32.add
            )
        )
    "#;

    let engine = WasmEngine::new().unwrap();
    let mut invoker = ModuleInvoker::new(&engine);

    register_all(invoker.linker_mut()).unwrap();

    let compiled = CompiledModule::from_wat(engine.inner(), wat).unwrap();
    let mut store = create_store(&engine, Arc::new(FallbackTextCodec));

    invoker
        .call_binary(&compiled, &mut store, "add", 0, 0)
        .await
        .unwrap();

    assert_eq!(store.data().guest_logs, vec!["fallback path"]);
}

// ============================================================================
// Test: Missing Import Fails at Instantiation
// ============================================================================

#[tokio::test]
async fn test_unlinked_import_is_module_load_error() {
    let wat = r#"
        (module
            (import "env" "log" (func $log (param i32 i32)))
            (func (export "add") (param i32 i32) (result i32)
                local.get 0
                local.get 1
                i32.add
            )
        )
    "#;

    let engine = WasmEngine::new().unwrap();
    // No host functions registered
    let invoker = ModuleInvoker::new(&engine);

    let compiled = CompiledModule::from_wat(engine.inner(), wat).unwrap();
    let mut store = create_store(&engine, Arc::new(Utf8TextCodec));

    let result = invoker.call_binary(&compiled, &mut store, "add", 1, 1).await;

    assert!(result.unwrap_err().is_module_load());
}
