//! Error types for the protocol layer.
//!
//! Every failure here is final for the record that caused it: a malformed
//! record will not become well-formed on retry, so nothing in this crate
//! retries. Recovery (dropping the message, closing the connection) is up
//! to the caller.

use std::fmt;

/// What is wrong with a record that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldProblem {
    /// A required key is absent.
    Missing { key: String },

    /// A value has the wrong shape, e.g. a list where a string was
    /// expected, or `null` for a required field. `detail` is the
    /// deserializer's description of the mismatch.
    Invalid { detail: String },
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { key } => write!(f, "key `{key}` is missing"),
            Self::Invalid { detail } => f.write_str(detail),
        }
    }
}

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Turning a record into bytes failed.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Turning bytes into a record failed: not JSON, truncated, or the
    /// top-level value is not an object.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A record is missing a required key or holds a value of the wrong
    /// shape for that key.
    ///
    /// `packet` is the tag of the variant being decoded. For records whose
    /// own `type` key is the problem it is `"record"`.
    #[error("malformed packet `{packet}`: {problem}")]
    MalformedPacket {
        packet: String,
        problem: FieldProblem,
    },

    /// No decoder is registered under the record's type tag. Usually a
    /// version mismatch between sender and receiver.
    #[error("unknown packet type `{0}`")]
    UnknownPacketType(String),

    /// Two decoders were registered under the same tag. This is a
    /// programming error caught while the registry is being built.
    #[error("duplicate packet type tag `{0}`")]
    DuplicateTypeTag(&'static str),
}

impl ProtocolError {
    pub(crate) fn missing(packet: &str, key: &str) -> Self {
        Self::MalformedPacket {
            packet: packet.to_owned(),
            problem: FieldProblem::Missing {
                key: key.to_owned(),
            },
        }
    }

    pub(crate) fn invalid(packet: &str, detail: impl Into<String>) -> Self {
        Self::MalformedPacket {
            packet: packet.to_owned(),
            problem: FieldProblem::Invalid {
                detail: detail.into(),
            },
        }
    }

    /// Maps a `serde_json` error raised while deserializing packet
    /// `packet` from a record.
    ///
    /// serde reports absent struct fields as ``missing field `name` ``;
    /// that becomes [`FieldProblem::Missing`]. Everything else (wrong
    /// type, `null`, bad enum value) becomes [`FieldProblem::Invalid`].
    pub(crate) fn from_serde(packet: &str, err: serde_json::Error) -> Self {
        let message = err.to_string();
        let missing = message
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split_once('`'))
            .map(|(key, _)| key);
        match missing {
            Some(key) => Self::missing(packet, key),
            None => Self::invalid(packet, message),
        }
    }

    /// The key that was absent, if this is a missing-key `MalformedPacket`.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::MalformedPacket {
                problem: FieldProblem::Missing { key },
                ..
            } => Some(key),
            _ => None,
        }
    }

    /// Returns `true` for errors caused by the content of a received
    /// record, as opposed to codec or registration failures.
    pub fn is_rejected_record(&self) -> bool {
        matches!(
            self,
            Self::MalformedPacket { .. } | Self::UnknownPacketType(_)
        )
    }
}
