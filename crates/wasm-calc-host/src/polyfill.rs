//! The fallback text codec and its asynchronous source.
//!
//! When the host lacks a native text codec, the bootstrap fetches a substitute
//! through [`PolyfillSource`] and installs it into the capability context.
//! [`BundledPolyfillSource`] is the implementation shipped with the harness;
//! tests inject slow or failing sources to exercise the cold path.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use wasm_calc_common::{BootstrapError, DecodeError, TextCodec};

/// Asynchronous acquisition of the fallback text codec.
#[async_trait]
pub trait PolyfillSource: Send + Sync {
    /// Fetch the fallback codec.
    ///
    /// # Errors
    ///
    /// Returns `CapabilityLoad` if the fallback cannot be acquired. The
    /// bootstrap treats this as fatal; it must never be swallowed.
    async fn fetch(&self) -> Result<Arc<dyn TextCodec>, BootstrapError>;
}

/// The fallback codec bundled with the harness.
///
/// Yields once so the fetch is a genuine suspension point, then hands out
/// [`FallbackTextCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledPolyfillSource;

#[async_trait]
impl PolyfillSource for BundledPolyfillSource {
    #[instrument(skip(self))]
    async fn fetch(&self) -> Result<Arc<dyn TextCodec>, BootstrapError> {
        tokio::task::yield_now().await;

        debug!("Bundled fallback codec fetched");
        Ok(Arc::new(FallbackTextCodec))
    }
}

/// Substitute UTF-8 codec installed when the host lacks a native one.
///
/// Lenient where the native codec is strict: invalid sequences decode to the
/// replacement character instead of failing, matching how fallback encoders
/// behave in the environments that need them.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackTextCodec;

impl TextCodec for FallbackTextCodec {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn name(&self) -> &'static str {
        "fallback-utf-8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_source_yields_fallback_codec() {
        let codec = BundledPolyfillSource.fetch().await.unwrap();

        assert_eq!(codec.name(), "fallback-utf-8");
    }

    #[test]
    fn test_fallback_roundtrip() {
        let codec = FallbackTextCodec;
        let bytes = codec.encode("héllo wasm");

        assert_eq!(codec.decode(&bytes).unwrap(), "héllo wasm");
    }

    #[test]
    fn test_fallback_substitutes_invalid_input() {
        let codec = FallbackTextCodec;
        let decoded = codec.decode(&[0x68, 0x69, 0xff]).unwrap();

        assert!(decoded.starts_with("hi"));
        assert!(decoded.contains('\u{fffd}'));
    }
}
