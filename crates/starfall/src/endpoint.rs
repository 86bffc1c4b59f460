//! `PacketEndpoint`: bytes in, typed packets out (and back).
//!
//! An endpoint sits at the boundary with the transport. The transport
//! hands it whatever bytes arrived for one message; the endpoint checks
//! the size, parses the record, and dispatches it through the registry.
//! Outbound packets take the reverse path.
//!
//! ```text
//! bytes ─(size check)─→ codec ─→ Record ─→ registry ─→ P
//! ```
//!
//! Endpoints hold no mutable state. Build one at startup, wrap it in an
//! `Arc`, and share it with every connection task.
//!
//! The endpoint produces whatever its registry produces: [`AnyPacket`] by
//! default, or a downstream crate's own packet enum when it is built
//! with a `PacketRegistry<ThatEnum>` through
//! [`PacketEndpoint::with_parts`].

use starfall_protocol::{
    AnyPacket, Codec, JsonCodec, Packet, PacketRegistry, Record,
};

use crate::{EndpointConfig, StarfallError};

pub struct PacketEndpoint<C: Codec = JsonCodec, P = AnyPacket> {
    registry: PacketRegistry<P>,
    codec: C,
    config: EndpointConfig,
}

impl PacketEndpoint<JsonCodec, AnyPacket> {
    /// Creates an endpoint with the standard registry and `JsonCodec`.
    ///
    /// # Errors
    /// Fails only if the standard registry cannot be built, which makes
    /// the process unfit to serve traffic.
    pub fn new(config: EndpointConfig) -> Result<Self, StarfallError> {
        let registry = PacketRegistry::standard()?;
        Ok(Self::with_parts(registry, JsonCodec, config))
    }
}

impl<C: Codec, P> PacketEndpoint<C, P> {
    /// Creates an endpoint from an already-built registry and a codec.
    pub fn with_parts(
        registry: PacketRegistry<P>,
        codec: C,
        config: EndpointConfig,
    ) -> Self {
        tracing::debug!(?registry, ?config, "packet endpoint ready");
        Self {
            registry,
            codec,
            config,
        }
    }

    pub fn registry(&self) -> &PacketRegistry<P> {
        &self.registry
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    /// Encodes a packet to bytes for the transport.
    pub fn encode<T: Packet>(&self, packet: &T) -> Result<Vec<u8>, StarfallError> {
        self.encode_record(&packet.encode())
    }

    /// Encodes an already-built record to bytes.
    pub fn encode_record(&self, record: &Record) -> Result<Vec<u8>, StarfallError> {
        let bytes = self.codec.encode(record)?;
        tracing::trace!(len = bytes.len(), "encoded record");
        Ok(bytes)
    }

    /// Turns one inbound message into a typed packet.
    ///
    /// # Errors
    /// - `RecordTooLarge` if `data` exceeds the configured limit.
    /// - `Protocol(Decode)` if the bytes are not a record.
    /// - `Protocol(MalformedPacket | UnknownPacketType)` from dispatch.
    pub fn decode(&self, data: &[u8]) -> Result<P, StarfallError> {
        let result = self.decode_inner(data);
        match &result {
            Ok(_) => tracing::trace!(len = data.len(), "decoded packet"),
            Err(e) => tracing::debug!(
                error = %e,
                len = data.len(),
                "rejected inbound record"
            ),
        }
        result
    }

    fn decode_inner(&self, data: &[u8]) -> Result<P, StarfallError> {
        if let Some(limit) = self.config.record_limit() {
            if data.len() > limit {
                return Err(StarfallError::RecordTooLarge {
                    size: data.len(),
                    limit,
                });
            }
        }
        let record: Record = self.codec.decode(data)?;
        Ok(self.registry.dispatch(&record)?)
    }
}
