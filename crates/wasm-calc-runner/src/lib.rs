//! Bootstrap sequencer and output sink for wasm-calc.
//!
//! This crate wires the capability step, the module loader, and the invoker
//! into the single startup sequence the harness exists to demonstrate:
//!
//! ```text
//! ensure text codec ──▶ load module ──▶ call export ──▶ emit result line
//! ```
//!
//! The sequence is strictly linear with two suspension points (the polyfill
//! fetch and the module load); any failure aborts the whole run.

pub mod bootstrap;
pub mod sink;

pub use bootstrap::Bootstrap;
pub use sink::{ConsoleSink, MemorySink, ResultSink};
