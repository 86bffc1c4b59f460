//! The packet contract and the sum type of decodable packets.
//!
//! Every event type implements [`Packet`]. Types that the receiving side
//! must reconstruct also implement [`Decode`]. Both `type_tag` and
//! `decode` are associated functions, so the registry can ask for them
//! before any packet exists.

use crate::{GameLeftPacket, PlayerDiedPacket, ProtocolError, Record};

/// A typed, self-describing unit of game-protocol communication.
///
/// Each game event (a player died, a player left, the asteroid field was
/// dealt) is its own Rust type implementing this trait. The receiving side
/// never sees those types directly; it sees a [`Record`] and has to work
/// out which type produced it. The `type` key inside every record is what
/// makes that possible.
///
/// ## Contract
///
/// - [`type_tag`](Packet::type_tag) returns a constant that is unique
///   among all packet types.
/// - [`encode`](Packet::encode) returns a record whose `type` key equals
///   that tag. Implementations build on
///   [`base_record`](crate::base_record) (or
///   [`encode_fields`](crate::encode_fields) for serde-derived packets)
///   and only add keys to it. [`insert_field`](crate::insert_field)
///   refuses to overwrite `type`.
///
/// ## `where Self: Sized` explained
///
/// `type_tag` takes no `self`: it describes the *type*, not a value, so
/// the registry can call `P::type_tag()` while it is being built, before
/// any packet exists. A function without a receiver would normally stop
/// the trait from being used as `dyn Packet`. The `where Self: Sized`
/// bound excludes just that one function from trait objects, so
/// `&dyn Packet` still works for anything that only needs `encode`.
///
/// ## Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use starfall_protocol::{encode_fields, Packet, Record};
///
/// #[derive(Serialize, Deserialize)]
/// struct ShieldsUp {
///     player_id: String,
/// }
///
/// impl Packet for ShieldsUp {
///     fn type_tag() -> &'static str {
///         "shields_up"
///     }
///
///     fn encode(&self) -> Record {
///         encode_fields(self)
///     }
/// }
///
/// let record = ShieldsUp { player_id: "p1".into() }.encode();
/// assert_eq!(record["type"], "shields_up");
/// assert_eq!(record["player_id"], "p1");
/// ```
pub trait Packet {
    /// The stable tag identifying this packet type on the wire.
    fn type_tag() -> &'static str
    where
        Self: Sized;

    /// Encodes this packet into a record. Pure and infallible.
    fn encode(&self) -> Record;
}

/// A packet type that can be rebuilt from a received record.
pub trait Decode: Packet + Sized {
    /// Reconstructs a packet from a record produced by
    /// [`Packet::encode`] for the same type.
    ///
    /// # Errors
    /// `MalformedPacket` if a required key is missing or has the wrong
    /// shape. Missing keys are never defaulted.
    fn decode(record: &Record) -> Result<Self, ProtocolError>;
}

/// Any packet the standard registry can decode.
///
/// `GameInitPacket` is absent on purpose: it is sent by the server and
/// has no decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyPacket {
    GameLeft(GameLeftPacket),
    PlayerDied(PlayerDiedPacket),
}

impl AnyPacket {
    /// The type tag of the wrapped packet.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::GameLeft(_) => GameLeftPacket::type_tag(),
            Self::PlayerDied(_) => PlayerDiedPacket::type_tag(),
        }
    }

    /// Encodes the wrapped packet.
    pub fn encode(&self) -> Record {
        match self {
            Self::GameLeft(p) => p.encode(),
            Self::PlayerDied(p) => p.encode(),
        }
    }
}

impl From<GameLeftPacket> for AnyPacket {
    fn from(packet: GameLeftPacket) -> Self {
        Self::GameLeft(packet)
    }
}

impl From<PlayerDiedPacket> for AnyPacket {
    fn from(packet: PlayerDiedPacket) -> Self {
        Self::PlayerDied(packet)
    }
}
