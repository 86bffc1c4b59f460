//! Codecs turn records into bytes for the transport, and back.
//!
//! The packet layer only ever produces and consumes [`Record`](crate::Record)s.
//! Which byte format the transport uses is a separate choice, expressed by
//! the [`Codec`] trait. [`JsonCodec`] is the default.

use serde::{de::DeserializeOwned, Serialize};

use crate::ProtocolError;

/// Encodes values to bytes and decodes bytes back.
///
/// `Send + Sync + 'static` so a codec can be shared by every connection
/// task for the lifetime of the process.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented
    /// in this format.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// ## Example
///
/// ```rust
/// use starfall_protocol::{Codec, JsonCodec, Packet, PlayerDiedPacket, Record};
///
/// let codec = JsonCodec;
/// let record = PlayerDiedPacket::new("p1").encode();
///
/// let bytes = codec.encode(&record).unwrap();
/// let decoded: Record = codec.decode(&bytes).unwrap();
/// assert_eq!(record, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
