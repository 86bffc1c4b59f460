//! Unified error type for the Starfall facade.

use starfall_protocol::ProtocolError;

/// Top-level error returned by [`PacketEndpoint`](crate::PacketEndpoint).
///
/// `#[from]` lets `?` lift protocol errors without a `map_err`.
#[derive(Debug, thiserror::Error)]
pub enum StarfallError {
    /// A protocol-level error (codec, malformed or unknown packet,
    /// duplicate registration).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An inbound payload exceeded
    /// [`EndpointConfig::max_record_bytes`](crate::EndpointConfig::max_record_bytes)
    /// and was not parsed.
    #[error("record of {size} bytes exceeds the {limit} byte limit")]
    RecordTooLarge { size: usize, limit: usize },
}

impl StarfallError {
    /// Returns `true` if the peer sent something this side cannot accept.
    ///
    /// The session layer typically drops the message (or the connection)
    /// and keeps serving everyone else.
    pub fn is_rejected_record(&self) -> bool {
        match self {
            Self::Protocol(ProtocolError::Decode(_)) => true,
            Self::Protocol(e) => e.is_rejected_record(),
            Self::RecordTooLarge { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::UnknownPacketType("warp".into());
        let starfall_err: StarfallError = err.into();
        assert!(matches!(starfall_err, StarfallError::Protocol(_)));
        assert_eq!(starfall_err.to_string(), "unknown packet type `warp`");
    }

    #[test]
    fn test_record_too_large_message() {
        let err = StarfallError::RecordTooLarge { size: 70, limit: 64 };
        assert_eq!(err.to_string(), "record of 70 bytes exceeds the 64 byte limit");
    }

    #[test]
    fn test_duplicate_tag_is_not_a_rejected_record() {
        let err: StarfallError = ProtocolError::DuplicateTypeTag("chat").into();
        assert!(!err.is_rejected_record());
    }
}
