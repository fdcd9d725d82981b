//! wasm-calc CLI entry point.
//!
//! Runs the bootstrap sequence once: ensure the text-encoding capability,
//! load the configured WebAssembly module, call its exported `add`, and
//! print the result line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wasm_calc_common::DemoConfig;
use wasm_calc_core::{FsModuleLoader, WasmEngine};
use wasm_calc_host::{BundledPolyfillSource, CapabilityContext};
use wasm_calc_runner::{Bootstrap, ConsoleSink};

#[derive(Debug, Parser)]
#[command(name = "wasm-calc", about = "WebAssembly demonstration harness")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long, env = "WASM_CALC_CONFIG")]
    config: Option<PathBuf>,

    /// Module artifact to load, overriding the configuration file.
    #[arg(long)]
    module: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wasm_calc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => DemoConfig::from_file(path)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))?,
        None => DemoConfig::default(),
    };
    if let Some(module) = args.module {
        config.module.path = module;
    }

    info!(
        module_path = %config.module.path.display(),
        export = %config.invoke.export,
        "Configuration loaded"
    );

    let engine = WasmEngine::new()?;
    let loader = FsModuleLoader::new(engine.clone());

    let bootstrap = Bootstrap::new(
        engine,
        CapabilityContext::detect(),
        Arc::new(BundledPolyfillSource),
        Arc::new(loader),
        Arc::new(ConsoleSink),
        config.module,
        config.invoke,
    );

    bootstrap.run().await.context("Bootstrap sequence failed")?;

    Ok(())
}
