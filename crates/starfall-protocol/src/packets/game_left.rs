use serde::{Deserialize, Serialize};

use crate::{decode_fields, encode_fields, Decode, GameId, Packet, PlayerId, ProtocolError, Record};

/// Client → Server: a player left a game session.
///
/// The serde derives define the wire fields; `type` is added by
/// [`encode_fields`]:
///
/// ```text
/// { "type": "leave_game", "player_id": "p1", "game_id": "g7" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLeftPacket {
    pub player_id: PlayerId,
    pub game_id: GameId,
}

impl GameLeftPacket {
    pub fn new(player_id: impl Into<String>, game_id: impl Into<String>) -> Self {
        Self {
            player_id: PlayerId::new(player_id),
            game_id: GameId::new(game_id),
        }
    }
}

impl Packet for GameLeftPacket {
    fn type_tag() -> &'static str {
        "leave_game"
    }

    fn encode(&self) -> Record {
        encode_fields(self)
    }
}

impl Decode for GameLeftPacket {
    fn decode(record: &Record) -> Result<Self, ProtocolError> {
        decode_fields(record)
    }
}
