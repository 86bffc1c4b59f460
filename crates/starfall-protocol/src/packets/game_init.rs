use serde_json::Value;

use crate::{base_record, insert_field, Packet, Record, Serializable};

/// Server → Client: the initial asteroid field and the level to play.
///
/// The asteroids are borrowed from game state for as long as the packet
/// lives. Their order is part of the message: clients index asteroids by
/// position.
///
/// There is no decoder; the server only ever sends this packet.
#[derive(Debug)]
pub struct GameInitPacket<'a, E> {
    pub asteroids: &'a [E],
    pub level: u32,
}

impl<'a, E: Serializable> GameInitPacket<'a, E> {
    pub fn new(asteroids: &'a [E], level: u32) -> Self {
        Self { asteroids, level }
    }
}

impl<E: Serializable> Packet for GameInitPacket<'_, E> {
    fn type_tag() -> &'static str {
        "game_init"
    }

    fn encode(&self) -> Record {
        let mut record = base_record::<Self>();
        let asteroids = self
            .asteroids
            .iter()
            .map(|asteroid| Value::Object(asteroid.to_record()))
            .collect::<Vec<_>>();
        insert_field(&mut record, "asteroids", asteroids);
        insert_field(&mut record, "level", self.level);
        record
    }
}
