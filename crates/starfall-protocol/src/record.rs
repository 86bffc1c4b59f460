//! Records: the transport-neutral keyed form of a packet.
//!
//! A record is a JSON object. The transport decides how it becomes bytes
//! (see [`Codec`](crate::Codec)); this module only deals with keys and
//! values.
//!
//! Packets whose fields are plain data derive serde's `Serialize` and
//! `Deserialize` and go through [`encode_fields`] / [`decode_fields`].
//! Packets that embed game entities (which serialize themselves through
//! [`Serializable`](crate::Serializable), not serde) build their record
//! from [`base_record`] with [`insert_field`].

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{Packet, ProtocolError};

/// A mapping of string keys to JSON values: one packet, encoded.
///
/// This is an alias for `serde_json::Map`, not a new type. That keeps it
/// usable everywhere serde_json is: it implements `Serialize` and
/// `Deserialize` (so any [`Codec`](crate::Codec) can move it), it can be
/// indexed with `record["type"]`, and `serde_json::json!` output converts
/// into it with `.as_object()`.
///
/// Every record produced by [`Packet::encode`] looks like:
///
/// ```text
/// { "type": "<tag>", ...fields of that packet... }
/// ```
///
/// The `type` key is what lets a receiver decode a record without knowing
/// in advance which packet it holds.
pub type Record = Map<String, Value>;

/// The key every encoded packet carries its type tag under.
pub const TYPE_KEY: &str = "type";

/// Used as the `packet` name in errors about a record's own `type` key,
/// before the variant is known.
const UNTAGGED: &str = "record";

/// Returns the minimal record for packet type `P`: `{"type": <tag>}`.
///
/// Every `encode` implementation starts here and then adds its own keys.
pub fn base_record<P: Packet>() -> Record {
    let mut record = Record::new();
    record.insert(TYPE_KEY.to_owned(), Value::from(P::type_tag()));
    record
}

/// Inserts a packet field into a record built by [`base_record`].
///
/// The `type` key belongs to the base record and is never replaced: an
/// attempt to insert it is dropped (and logged) and this returns `false`.
pub fn insert_field(
    record: &mut Record,
    key: impl Into<String>,
    value: impl Into<Value>,
) -> bool {
    let key = key.into();
    if key == TYPE_KEY {
        tracing::warn!(
            tag = ?record.get(TYPE_KEY),
            "packet field would overwrite the type tag; dropped"
        );
        return false;
    }
    record.insert(key, value.into());
    true
}

/// Encodes a serde-serializable packet: the base record plus every field
/// `P` serializes.
///
/// `P` must serialize to a JSON object (any struct with named fields
/// does). A field named `type` is dropped by [`insert_field`].
pub fn encode_fields<P: Packet + Serialize>(packet: &P) -> Record {
    let mut record = base_record::<P>();
    match serde_json::to_value(packet) {
        Ok(Value::Object(fields)) => {
            for (key, value) in fields {
                insert_field(&mut record, key, value);
            }
        }
        Ok(other) => tracing::error!(
            tag = P::type_tag(),
            value = %other,
            "packet did not serialize to an object; fields dropped"
        ),
        Err(e) => tracing::error!(
            tag = P::type_tag(),
            error = %e,
            "packet failed to serialize; fields dropped"
        ),
    }
    record
}

/// Decodes a serde-deserializable packet from `record`.
///
/// Keys the packet does not declare (including `type`) are ignored.
///
/// # Errors
/// `MalformedPacket` if a required field is missing or has the wrong
/// shape. Missing fields are never defaulted.
pub fn decode_fields<P: Packet + DeserializeOwned>(record: &Record) -> Result<P, ProtocolError> {
    serde_json::from_value(Value::Object(record.clone()))
        .map_err(|e| ProtocolError::from_serde(P::type_tag(), e))
}

/// Reads the type tag of a raw record.
///
/// # Errors
/// `MalformedPacket` if `type` is missing or not a string.
pub fn type_tag_of(record: &Record) -> Result<&str, ProtocolError> {
    match record.get(TYPE_KEY) {
        Some(Value::String(tag)) => Ok(tag),
        Some(_) => Err(ProtocolError::invalid(UNTAGGED, "key `type` is not a string")),
        None => Err(ProtocolError::missing(UNTAGGED, TYPE_KEY)),
    }
}
