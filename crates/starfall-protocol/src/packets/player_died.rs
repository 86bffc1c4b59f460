use serde::{Deserialize, Serialize};

use crate::{decode_fields, encode_fields, Decode, Packet, PlayerId, ProtocolError, Record};

/// A player's ship was destroyed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDiedPacket {
    pub player_id: PlayerId,
}

impl PlayerDiedPacket {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: PlayerId::new(player_id),
        }
    }
}

impl Packet for PlayerDiedPacket {
    fn type_tag() -> &'static str {
        "player_died"
    }

    fn encode(&self) -> Record {
        encode_fields(self)
    }
}

impl Decode for PlayerDiedPacket {
    fn decode(record: &Record) -> Result<Self, ProtocolError> {
        decode_fields(record)
    }
}
