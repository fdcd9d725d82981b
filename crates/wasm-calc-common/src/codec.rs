//! The text-encoding capability interface.
//!
//! Both the host's native codec and the asynchronously loaded fallback satisfy
//! [`TextCodec`], so consumers never care which one is installed. The trait is
//! deliberately minimal: `encode` and `decode`, plus a name for log correlation.

use thiserror::Error;

/// A text-encoding capability.
///
/// Implementations convert between host strings and guest byte buffers.
/// The harness treats the codec as write-once state: whichever implementation
/// is resolved at startup stays active for the process lifetime.
pub trait TextCodec: std::fmt::Debug + Send + Sync {
    /// Encode a string into bytes.
    fn encode(&self, text: &str) -> Vec<u8>;

    /// Decode bytes into a string.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the bytes are not valid in this codec's
    /// encoding. Implementations that substitute invalid sequences never fail.
    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError>;

    /// Short identifier for this implementation, used in log fields.
    fn name(&self) -> &'static str;
}

/// Decoding failed on invalid input.
#[derive(Debug, Error)]
#[error("invalid encoding at byte offset {valid_up_to}")]
pub struct DecodeError {
    /// Length of the valid prefix in bytes.
    pub valid_up_to: usize,
}

/// The host's native UTF-8 codec.
///
/// Strict: invalid UTF-8 input is rejected rather than substituted.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8TextCodec;

impl TextCodec for Utf8TextCodec {
    fn encode(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError {
            valid_up_to: e.utf8_error().valid_up_to(),
        })
    }

    fn name(&self) -> &'static str {
        "utf-8"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_roundtrip() {
        let codec = Utf8TextCodec;
        let bytes = codec.encode("héllo wasm");

        assert_eq!(codec.decode(&bytes).unwrap(), "héllo wasm");
    }

    #[test]
    fn test_utf8_rejects_invalid_input() {
        let codec = Utf8TextCodec;
        let err = codec.decode(&[0x68, 0x69, 0xff, 0xfe]).unwrap_err();

        assert_eq!(err.valid_up_to, 2);
    }

    #[test]
    fn test_codec_name() {
        assert_eq!(Utf8TextCodec.name(), "utf-8");
    }
}
