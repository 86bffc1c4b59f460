//! The concrete game events.

mod game_init;
mod game_left;
mod player_died;

pub use game_init::GameInitPacket;
pub use game_left::GameLeftPacket;
pub use player_died::PlayerDiedPacket;
