//! Codec trait and implementations for turning events into frames.
//!
//! The protocol layer does not care how events are serialized — it only
//! needs something implementing [`Codec`]. The default is [`JsonCodec`],
//! which matches the browser clients and keeps frames inspectable in
//! DevTools. Frames are text, so the codec works on `String`s rather
//! than byte buffers.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes values into text frames and decodes frames back.
///
/// `Send + Sync + 'static` because the codec is shared across the
/// connection tasks for the lifetime of the server.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into one frame.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError>;

    /// Deserializes a frame back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the frame is malformed or
    /// does not match the expected shape.
    fn decode<T: DeserializeOwned>(&self, frame: &str) -> Result<T, ProtocolError>;
}

/// A [`Codec`] that uses JSON via `serde_json`.
///
/// Behind the `json` feature flag (enabled by default).
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<String, ProtocolError> {
        serde_json::to_string(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, frame: &str) -> Result<T, ProtocolError> {
        serde_json::from_str(frame).map_err(ProtocolError::Decode)
    }
}
