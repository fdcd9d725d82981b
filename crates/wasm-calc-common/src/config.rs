//! Configuration structures for the wasm-calc harness.
//!
//! This module defines structures for TOML configuration files:
//! - [`DemoConfig`]: Top-level configuration file structure
//! - [`ModuleConfig`]: Which module artifact to load
//! - [`InvokeConfig`]: Which export to call, with what arguments and label

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for the demo harness.
///
/// # Example
///
/// ```toml
/// [module]
/// path = "demos/add.wat"
///
/// [invoke]
/// export = "add"
/// lhs = 4
/// rhs = 6
/// label = "Calculated with WebAssembly"
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Module artifact to load at startup.
    #[serde(default)]
    pub module: ModuleConfig,

    /// Invocation settings.
    #[serde(default)]
    pub invoke: InvokeConfig,
}

impl DemoConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// The module artifact to load.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModuleConfig {
    /// Path to the WebAssembly artifact (`.wasm` bytes or `.wat` text).
    #[serde(default = "defaults::module_path")]
    pub path: PathBuf,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            path: defaults::module_path(),
        }
    }
}

/// Invocation settings for the demonstration call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InvokeConfig {
    /// Name of the exported function to call.
    #[serde(default = "defaults::export")]
    pub export: String,

    /// Left-hand argument.
    #[serde(default = "defaults::lhs")]
    pub lhs: i32,

    /// Right-hand argument.
    #[serde(default = "defaults::rhs")]
    pub rhs: i32,

    /// Label prefixed to the emitted result line.
    #[serde(default = "defaults::label")]
    pub label: String,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            export: defaults::export(),
            lhs: defaults::lhs(),
            rhs: defaults::rhs(),
            label: defaults::label(),
        }
    }
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}

/// Default value functions for serde.
mod defaults {
    use std::path::PathBuf;

    pub fn module_path() -> PathBuf {
        PathBuf::from("demos/add.wat")
    }

    pub fn export() -> String {
        "add".to_string()
    }

    pub const fn lhs() -> i32 {
        4
    }

    pub const fn rhs() -> i32 {
        6
    }

    pub fn label() -> String {
        "Calculated with WebAssembly".to_string()
    }
}
