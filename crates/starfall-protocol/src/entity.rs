//! The boundary with game-state entities.

use crate::Record;

/// A domain object that can describe its own state as a record.
///
/// Packets that embed entities (e.g. the asteroid field in
/// [`GameInitPacket`](crate::GameInitPacket)) call this and put the result
/// on the wire as-is. They never look inside it, so an entity can change
/// its record layout without touching the packet layer.
pub trait Serializable {
    /// Returns this entity's current state as a record.
    fn to_record(&self) -> Record;
}

impl<T: Serializable + ?Sized> Serializable for &T {
    fn to_record(&self) -> Record {
        (**self).to_record()
    }
}
