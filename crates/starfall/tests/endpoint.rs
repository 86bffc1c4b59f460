//! Integration tests for `PacketEndpoint`: what a connection handler sees
//! when it feeds transport payloads through the packet layer.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use starfall::prelude::*;
use starfall_protocol::{decode_fields, encode_fields};

// =========================================================================
// Helpers
// =========================================================================

struct Asteroid {
    id: u32,
    radius: f32,
}

impl Serializable for Asteroid {
    fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("id".into(), json!(self.id));
        record.insert("radius".into(), json!(self.radius));
        record
    }
}

fn endpoint() -> PacketEndpoint {
    PacketEndpoint::new(EndpointConfig::default()).expect("standard registry")
}

// =========================================================================
// Outbound
// =========================================================================

#[test]
fn test_game_init_bytes_shape() {
    let field = [
        Asteroid { id: 0, radius: 2.0 },
        Asteroid { id: 1, radius: 4.0 },
    ];
    let bytes = endpoint().encode(&GameInitPacket::new(&field, 2)).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "game_init",
            "asteroids": [
                {"id": 0, "radius": 2.0},
                {"id": 1, "radius": 4.0}
            ],
            "level": 2
        })
    );
}

#[test]
fn test_encode_record_of_any_packet() {
    let endpoint = endpoint();
    let packet = AnyPacket::from(GameLeftPacket::new("p1", "g7"));
    let bytes = endpoint.encode_record(&packet.encode()).unwrap();
    assert_eq!(endpoint.decode(&bytes).unwrap(), packet);
}

// =========================================================================
// Inbound
// =========================================================================

#[test]
fn test_decode_leave_game_from_wire() {
    let packet = endpoint()
        .decode(br#"{"type":"leave_game","player_id":"p1","game_id":"g7"}"#)
        .unwrap();
    assert_eq!(packet, AnyPacket::GameLeft(GameLeftPacket::new("p1", "g7")));
}

#[test]
fn test_bad_messages_are_rejected_and_later_ones_still_decode() {
    let endpoint = endpoint();
    let inbox: [&[u8]; 5] = [
        br#"{"type":"unknown_kind"}"#,
        br#"{"type":"player_died"}"#,
        b"{not json",
        br#"["type","player_died"]"#,
        br#"{"type":"player_died","player_id":"p4"}"#,
    ];

    let mut rejected = 0;
    let mut accepted = Vec::new();
    for data in inbox {
        match endpoint.decode(data) {
            Ok(packet) => accepted.push(packet),
            Err(e) => {
                assert!(e.is_rejected_record(), "unexpected error: {e}");
                rejected += 1;
            }
        }
    }

    assert_eq!(rejected, 4);
    assert_eq!(
        accepted,
        vec![AnyPacket::PlayerDied(PlayerDiedPacket::new("p4"))]
    );
}

#[test]
fn test_unknown_type_error_surfaces_tag() {
    let err = endpoint().decode(br#"{"type":"unknown_kind"}"#).unwrap_err();
    assert!(matches!(
        err,
        StarfallError::Protocol(ProtocolError::UnknownPacketType(ref tag)) if tag == "unknown_kind"
    ));
}

#[test]
fn test_missing_player_id_is_malformed() {
    let err = endpoint().decode(br#"{"type":"player_died"}"#).unwrap_err();
    match err {
        StarfallError::Protocol(e) => assert_eq!(e.missing_key(), Some("player_id")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unlimited_config_accepts_large_records() {
    let config = EndpointConfig { max_record_bytes: 0 };
    let endpoint = PacketEndpoint::new(config).unwrap();

    let long_id = "p".repeat(100_000);
    let bytes = endpoint.encode(&PlayerDiedPacket::new(long_id.as_str())).unwrap();
    assert!(bytes.len() > starfall::DEFAULT_MAX_RECORD_BYTES);
    assert_eq!(
        endpoint.decode(&bytes).unwrap(),
        AnyPacket::PlayerDied(PlayerDiedPacket::new(long_id))
    );
}

// =========================================================================
// Sharing
// =========================================================================

#[test]
fn test_endpoint_shared_between_connection_threads() {
    let endpoint = Arc::new(endpoint());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let endpoint = Arc::clone(&endpoint);
            std::thread::spawn(move || {
                let packet = GameLeftPacket::new(format!("p{i}"), "g1");
                let bytes = endpoint.encode(&packet).unwrap();
                endpoint.decode(&bytes).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let decoded = handle.join().unwrap();
        assert_eq!(
            decoded,
            AnyPacket::GameLeft(GameLeftPacket::new(format!("p{i}"), "g1"))
        );
    }
}

#[test]
fn test_custom_registry_endpoint() {
    let registry = PacketRegistry::<AnyPacket>::builder()
        .register::<PlayerDiedPacket>()
        .unwrap()
        .build();
    let endpoint = PacketEndpoint::with_parts(registry, JsonCodec, EndpointConfig::default());

    // Only player_died is accepted by this endpoint.
    let left = endpoint.encode(&GameLeftPacket::new("p1", "g7")).unwrap();
    assert!(matches!(
        endpoint.decode(&left),
        Err(StarfallError::Protocol(ProtocolError::UnknownPacketType(_)))
    ));
}

// =========================================================================
// Downstream packet types
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PowerUpCollected {
    player_id: String,
    kind: String,
}

impl Packet for PowerUpCollected {
    fn type_tag() -> &'static str {
        "power_up_collected"
    }

    fn encode(&self) -> Record {
        encode_fields(self)
    }
}

impl Decode for PowerUpCollected {
    fn decode(record: &Record) -> Result<Self, ProtocolError> {
        decode_fields(record)
    }
}

#[derive(Debug, PartialEq)]
enum ArcadePacket {
    Died(PlayerDiedPacket),
    PowerUp(PowerUpCollected),
}

impl From<PlayerDiedPacket> for ArcadePacket {
    fn from(packet: PlayerDiedPacket) -> Self {
        Self::Died(packet)
    }
}

impl From<PowerUpCollected> for ArcadePacket {
    fn from(packet: PowerUpCollected) -> Self {
        Self::PowerUp(packet)
    }
}

#[test]
fn test_endpoint_decodes_into_downstream_enum() {
    let registry = PacketRegistry::<ArcadePacket>::builder()
        .register::<PlayerDiedPacket>()
        .unwrap()
        .register::<PowerUpCollected>()
        .unwrap()
        .build();
    let endpoint: PacketEndpoint<JsonCodec, ArcadePacket> =
        PacketEndpoint::with_parts(registry, JsonCodec, EndpointConfig::default());

    let power_up = PowerUpCollected {
        player_id: "p1".into(),
        kind: "triple_shot".into(),
    };
    let bytes = endpoint.encode(&power_up).unwrap();
    assert_eq!(
        endpoint.decode(&bytes).unwrap(),
        ArcadePacket::PowerUp(power_up)
    );

    let bytes = endpoint.encode(&PlayerDiedPacket::new("p2")).unwrap();
    assert_eq!(
        endpoint.decode(&bytes).unwrap(),
        ArcadePacket::Died(PlayerDiedPacket::new("p2"))
    );

    // Not registered with this endpoint.
    let left = endpoint.encode(&GameLeftPacket::new("p1", "g7")).unwrap();
    assert!(matches!(
        endpoint.decode(&left),
        Err(StarfallError::Protocol(ProtocolError::UnknownPacketType(ref tag))) if tag == "leave_game"
    ));
}

#[test]
fn test_downstream_endpoint_reports_missing_field() {
    let registry = PacketRegistry::<ArcadePacket>::builder()
        .register::<PowerUpCollected>()
        .unwrap()
        .build();
    let endpoint = PacketEndpoint::with_parts(registry, JsonCodec, EndpointConfig::default());

    let err = endpoint
        .decode(br#"{"type":"power_up_collected","player_id":"p1"}"#)
        .unwrap_err();
    match err {
        StarfallError::Protocol(e) => assert_eq!(e.missing_key(), Some("kind")),
        other => panic!("expected protocol error, got {other:?}"),
    }
}
