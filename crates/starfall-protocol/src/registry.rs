//! Routes received records to the right decoder by their type tag.
//!
//! Registration and dispatch are split across two types:
//!
//! ```text
//! PacketRegistryBuilder ──(register…)──→ build() ──→ PacketRegistry
//!        (startup only, &mut)                       (immutable, Send + Sync)
//! ```
//!
//! Once built, a registry can only dispatch, so it is safe to share
//! between connection tasks without locking.

use std::collections::HashMap;
use std::fmt;

use crate::{type_tag_of, AnyPacket, Decode, GameLeftPacket, PlayerDiedPacket, ProtocolError, Record};

/// A decode function stored in the registry.
///
/// `P` is the type dispatch produces, usually [`AnyPacket`].
pub type DecodeFn<P> = fn(&Record) -> Result<P, ProtocolError>;

fn decode_into<D, P>(record: &Record) -> Result<P, ProtocolError>
where
    D: Decode + Into<P>,
{
    D::decode(record).map(Into::into)
}

// ---------------------------------------------------------------------------
// PacketRegistryBuilder
// ---------------------------------------------------------------------------

/// Collects decoders before the registry is frozen.
///
/// Every `register*` call checks the tag against what is already there,
/// so a duplicate surfaces at startup, not at the first dispatch.
pub struct PacketRegistryBuilder<P = AnyPacket> {
    decoders: HashMap<&'static str, DecodeFn<P>>,
}

impl<P> PacketRegistryBuilder<P> {
    pub fn new() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// Registers packet type `D` under its own [`type_tag`](crate::Packet::type_tag).
    ///
    /// # Errors
    /// `DuplicateTypeTag` if the tag is already taken.
    pub fn register<D>(self) -> Result<Self, ProtocolError>
    where
        D: Decode + Into<P>,
    {
        self.register_fn(D::type_tag(), decode_into::<D, P>)
    }

    /// Registers a raw decode function under `tag`.
    ///
    /// For decoders that are not a single [`Decode`] type, e.g. packets
    /// contributed by plugins at startup.
    ///
    /// # Errors
    /// `DuplicateTypeTag` if the tag is already taken.
    pub fn register_fn(
        mut self,
        tag: &'static str,
        decode: DecodeFn<P>,
    ) -> Result<Self, ProtocolError> {
        if self.decoders.contains_key(tag) {
            return Err(ProtocolError::DuplicateTypeTag(tag));
        }
        self.decoders.insert(tag, decode);
        tracing::debug!(tag, "registered packet decoder");
        Ok(self)
    }

    /// Freezes the builder into a registry.
    pub fn build(self) -> PacketRegistry<P> {
        PacketRegistry {
            decoders: self.decoders,
        }
    }
}

impl<P> Default for PacketRegistryBuilder<P> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// PacketRegistry
// ---------------------------------------------------------------------------

/// An immutable tag → decoder table.
///
/// The receiving side gets records without knowing which packet type each
/// one holds. `dispatch` reads the record's `type` key, looks up the
/// decoder registered under it, and runs it. It never names a packet
/// type itself, so adding an event means one new type plus one
/// `register` call.
///
/// ## The `P` parameter
///
/// `P` is what dispatch produces. It defaults to [`AnyPacket`], the sum
/// type of the built-in decodable packets. A crate that adds its own
/// packets defines its own enum, implements `From<ItsPacket>` for it, and
/// builds a `PacketRegistry<ItsEnum>`. Each registered type only needs
/// `Into<P>`, so built-in and custom packets can share one table.
///
/// ## Why no `register` on the registry
///
/// Mutation lives on [`PacketRegistryBuilder`] only. A built registry
/// holds plain `fn` pointers in a `HashMap` that nothing can change, so
/// it is `Send + Sync`. Connection tasks can share it through a `&` or
/// an `Arc` without a `Mutex`, and they can never see a half-registered
/// table.
///
/// ## Example
///
/// ```rust
/// use serde_json::json;
/// use starfall_protocol::{AnyPacket, GameLeftPacket, PacketRegistry};
///
/// let registry = PacketRegistry::standard().unwrap();
/// let record = json!({"type": "leave_game", "player_id": "p1", "game_id": "g7"});
///
/// let packet = registry.dispatch(record.as_object().unwrap()).unwrap();
/// assert_eq!(packet, AnyPacket::GameLeft(GameLeftPacket::new("p1", "g7")));
/// ```
pub struct PacketRegistry<P = AnyPacket> {
    decoders: HashMap<&'static str, DecodeFn<P>>,
}

impl<P> PacketRegistry<P> {
    /// Starts a new, empty registration phase.
    pub fn builder() -> PacketRegistryBuilder<P> {
        PacketRegistryBuilder::new()
    }

    /// Decodes `record` with the decoder registered under its `type` tag.
    ///
    /// # Errors
    /// - `MalformedPacket` if `type` is missing or not a string, or if the
    ///   decoder rejects the record (passed through unchanged).
    /// - `UnknownPacketType` if no decoder is registered for the tag.
    pub fn dispatch(&self, record: &Record) -> Result<P, ProtocolError> {
        let tag = type_tag_of(record)?;
        let Some(decode) = self.decoders.get(tag) else {
            tracing::debug!(tag, "no decoder for packet type");
            return Err(ProtocolError::UnknownPacketType(tag.to_owned()));
        };
        decode(record)
    }

    /// Returns `true` if a decoder is registered under `tag`.
    pub fn contains(&self, tag: &str) -> bool {
        self.decoders.contains_key(tag)
    }

    /// The registered tags, in no particular order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.decoders.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl PacketRegistry<AnyPacket> {
    /// A registry holding every built-in packet that has a decoder.
    ///
    /// # Errors
    /// `DuplicateTypeTag` if two built-in packets share a tag.
    pub fn standard() -> Result<Self, ProtocolError> {
        Ok(Self::builder()
            .register::<GameLeftPacket>()?
            .register::<PlayerDiedPacket>()?
            .build())
    }
}

impl<P> fmt::Debug for PacketRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.tags().collect();
        tags.sort_unstable();
        f.debug_struct("PacketRegistry").field("tags", &tags).finish()
    }
}
