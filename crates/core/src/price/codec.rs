//! Byte encoding for persistence and transport.
//!
//! Any serde type gets [`BinaryCodec`]; prices encode as
//! `{"amount":"<decimal string>","currency":"<code>"}` so no digit is lost.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::PriceError;

/// Encodes a value to bytes and back.
pub trait BinaryCodec: Sized {
    /// Encodes the value.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Codec`] if the value cannot be serialized.
    fn encode(&self) -> Result<Vec<u8>, PriceError>;

    /// Decodes a value produced by [`BinaryCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Codec`] for malformed input.
    fn decode(bytes: &[u8]) -> Result<Self, PriceError>;
}

impl<T> BinaryCodec for T
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self) -> Result<Vec<u8>, PriceError> {
        Ok(serde_json::to_vec(self)?)
    }

    fn decode(bytes: &[u8]) -> Result<Self, PriceError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
