//! Error types for the wasm-calc harness.
//!
//! A single hierarchy built with `thiserror`: [`BootstrapError`] covers every
//! failure the bootstrap sequence can hit. There is no local recovery anywhere
//! in the harness; each of these propagates to the top-level caller and aborts
//! the run.

use std::io;

use thiserror::Error;

/// Top-level errors for the bootstrap sequence.
///
/// All variants are fatal: the sequence runs to completion or fails, with no
/// retry and no partial-failure recovery.
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// The fallback text codec could not be fetched or installed.
    #[error("Text codec polyfill failed to load: {reason}")]
    CapabilityLoad {
        /// Description of the fetch or install failure.
        reason: String,
    },

    /// The computation module could not be loaded or instantiated.
    #[error("Module load failed: {reason}")]
    ModuleLoad {
        /// Description of the load failure.
        reason: String,
    },

    /// The named export was missing, had the wrong signature, or trapped.
    #[error("Invocation of export '{export}' failed: {reason}")]
    Invocation {
        /// Name of the export that was invoked.
        export: String,
        /// Description of the invocation failure.
        reason: String,
    },

    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl BootstrapError {
    /// Create a new `CapabilityLoad` error.
    pub fn capability_load(reason: impl Into<String>) -> Self {
        Self::CapabilityLoad {
            reason: reason.into(),
        }
    }

    /// Create a new `ModuleLoad` error.
    pub fn module_load(reason: impl Into<String>) -> Self {
        Self::ModuleLoad {
            reason: reason.into(),
        }
    }

    /// Create a new `Invocation` error.
    pub fn invocation(export: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invocation {
            export: export.into(),
            reason: reason.into(),
        }
    }

    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the failure occurred in the polyfill step.
    pub fn is_capability_load(&self) -> bool {
        matches!(self, Self::CapabilityLoad { .. })
    }

    /// Returns `true` if the failure occurred while loading the module.
    pub fn is_module_load(&self) -> bool {
        matches!(self, Self::ModuleLoad { .. })
    }

    /// Returns `true` if the failure occurred while resolving or calling the export.
    pub fn is_invocation(&self) -> bool {
        matches!(self, Self::Invocation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BootstrapError::capability_load("asset missing");
        assert_eq!(
            err.to_string(),
            "Text codec polyfill failed to load: asset missing"
        );

        let err = BootstrapError::invocation("add", "export not found");
        assert_eq!(
            err.to_string(),
            "Invocation of export 'add' failed: export not found"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err: BootstrapError = io_err.into();

        assert!(matches!(err, BootstrapError::Io(_)));
    }

    #[test]
    fn test_predicates() {
        assert!(BootstrapError::capability_load("x").is_capability_load());
        assert!(BootstrapError::module_load("x").is_module_load());
        assert!(BootstrapError::invocation("add", "x").is_invocation());
        assert!(!BootstrapError::module_load("x").is_capability_load());
        assert!(!BootstrapError::invalid_config("x").is_module_load());
    }
}
