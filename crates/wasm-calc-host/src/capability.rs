//! Text-codec capability detection and installation.
//!
//! [`CapabilityContext`] is the explicit, injected home of the capability:
//! a host-provided native codec when present, plus a write-once fallback slot
//! filled by the polyfill step. Consumers receive the context rather than
//! reading ambient global state, and the probe is decoupled from installation
//! so either branch can be exercised in tests.
//!
//! Concurrency: one writer (the polyfill step), any number of readers
//! afterwards. The slot is guarded by an `RwLock` and the first installed
//! codec wins.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use crate::polyfill::PolyfillSource;
use wasm_calc_common::{BootstrapError, TextCodec, Utf8TextCodec};

/// The capability context for text encoding.
///
/// Holds the native codec when the host provides one and a write-once slot
/// for the installed fallback. Once a codec is resolvable it stays resolvable
/// for the remaining process lifetime.
pub struct CapabilityContext {
    native: Option<Arc<dyn TextCodec>>,
    fallback: RwLock<Option<Arc<dyn TextCodec>>>,
}

impl CapabilityContext {
    /// Probe the host and build a context reflecting what it provides.
    ///
    /// Rust hosts always carry a UTF-8 codec, so this is the fast path in
    /// production; [`CapabilityContext::without_native`] models the host that
    /// needs the polyfill.
    pub fn detect() -> Self {
        Self {
            native: Some(Arc::new(Utf8TextCodec)),
            fallback: RwLock::new(None),
        }
    }

    /// Build a context for a host that lacks the native capability.
    pub fn without_native() -> Self {
        Self {
            native: None,
            fallback: RwLock::new(None),
        }
    }

    /// Returns `true` if the host provides the capability natively.
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Returns `true` if a fallback has been installed.
    pub fn has_fallback(&self) -> bool {
        self.fallback.read().is_some()
    }

    /// The active codec: native when present, installed fallback otherwise.
    pub fn codec(&self) -> Option<Arc<dyn TextCodec>> {
        self.native
            .clone()
            .or_else(|| self.fallback.read().clone())
    }

    /// Install a fallback codec.
    ///
    /// Write-once: if a fallback is already installed the new one is dropped
    /// and the existing binding stays stable.
    pub fn install(&self, codec: Arc<dyn TextCodec>) {
        let mut slot = self.fallback.write();
        if let Some(existing) = slot.as_ref() {
            debug!(codec = existing.name(), "Fallback already installed, keeping it");
            return;
        }

        info!(codec = codec.name(), "Fallback text codec installed");
        *slot = Some(codec);
    }
}

impl std::fmt::Debug for CapabilityContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityContext")
            .field("has_native", &self.has_native())
            .field("has_fallback", &self.has_fallback())
            .finish()
    }
}

/// Ensure the text-codec capability is present, loading the fallback if needed.
///
/// Fast path: a codec is already resolvable (natively or from an earlier
/// install), so this resolves immediately with no fetch and no mutation.
/// Cold path: the fallback is fetched asynchronously from `source` and
/// installed before resolving. Safe to call repeatedly.
///
/// # Errors
///
/// Returns `CapabilityLoad` if the fallback fetch fails. The caller must not
/// proceed with the bootstrap in that case.
#[instrument(skip(ctx, source))]
pub async fn ensure_text_codec(
    ctx: &CapabilityContext,
    source: &dyn PolyfillSource,
) -> Result<Arc<dyn TextCodec>, BootstrapError> {
    if let Some(codec) = ctx.codec() {
        debug!(codec = codec.name(), "Text codec already present");
        return Ok(codec);
    }

    info!("Text codec missing, fetching fallback");
    let fetched = source.fetch().await?;
    ctx.install(Arc::clone(&fetched));

    // Read back through the context so concurrent callers agree on one binding
    Ok(ctx.codec().unwrap_or(fetched))
}
