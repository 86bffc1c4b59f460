//! Packet protocol for Starfall.
//!
//! This crate defines the events that game servers and clients exchange,
//! and how they cross the wire:
//!
//! - **Contract** ([`Packet`], [`Decode`]): every event type has a unique
//!   type tag and an encoder. Received events also have a decoder.
//! - **Packets** ([`GameInitPacket`], [`GameLeftPacket`],
//!   [`PlayerDiedPacket`]) and the sum type [`AnyPacket`].
//! - **Records** ([`Record`]): the transport-neutral keyed form of a
//!   packet, always carrying a `type` key.
//! - **Registry** ([`PacketRegistry`]): routes a received record to the
//!   decoder registered under its tag.
//! - **Codec** ([`Codec`], [`JsonCodec`]): records to bytes and back.
//! - **Errors** ([`ProtocolError`]).
//!
//! # Flow
//!
//! ```text
//! send:    packet ──encode──→ Record ──codec──→ bytes ──→ transport
//! receive: transport ──→ bytes ──codec──→ Record ──registry──→ AnyPacket
//! ```
//!
//! Nothing here blocks or does I/O. Encoding and dispatch are pure and may
//! run concurrently from any number of tasks.

mod codec;
mod entity;
mod error;
mod packet;
mod packets;
mod record;
mod registry;
mod types;

pub use codec::{Codec, JsonCodec};
pub use entity::Serializable;
pub use error::{FieldProblem, ProtocolError};
pub use packet::{AnyPacket, Decode, Packet};
pub use packets::{GameInitPacket, GameLeftPacket, PlayerDiedPacket};
pub use record::{
    base_record, decode_fields, encode_fields, insert_field, type_tag_of, Record, TYPE_KEY,
};
pub use registry::{DecodeFn, PacketRegistry, PacketRegistryBuilder};
pub use types::{GameId, PlayerId};
