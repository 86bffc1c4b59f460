//! # Starfall
//!
//! The packet layer of the Starfall asteroid-field arcade game.
//!
//! [`starfall_protocol`] defines the packets, records, codecs and the
//! registry. This crate adds what a server or client wires up at startup:
//! a [`PacketEndpoint`] that turns transport bytes into typed packets, its
//! [`EndpointConfig`], a unified [`StarfallError`], and
//! [`telemetry::init_tracing`].
//!
//! ## Quick Start
//!
//! ```rust
//! use starfall::prelude::*;
//!
//! # fn main() -> Result<(), StarfallError> {
//! let endpoint = PacketEndpoint::new(EndpointConfig::default())?;
//!
//! let bytes = endpoint.encode(&PlayerDiedPacket::new("p1"))?;
//! match endpoint.decode(&bytes)? {
//!     AnyPacket::PlayerDied(died) => assert_eq!(died.player_id.as_str(), "p1"),
//!     other => panic!("unexpected packet {other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod endpoint;
mod error;
pub mod telemetry;

pub use config::{EndpointConfig, DEFAULT_MAX_RECORD_BYTES};
pub use endpoint::PacketEndpoint;
pub use error::StarfallError;

/// Re-exports everything needed to send and receive packets.
pub mod prelude {
    pub use crate::{EndpointConfig, PacketEndpoint, StarfallError};
    pub use starfall_protocol::{
        AnyPacket, Codec, Decode, GameId, GameInitPacket, GameLeftPacket, JsonCodec,
        Packet, PacketRegistry, PlayerDiedPacket, PlayerId, ProtocolError, Record,
        Serializable,
    };
}
