use glam::Vec3;
use wall_schema::{BodyPart, WallId, WallSpec};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The spawner released a wall into the play area.
    Spawn(WallSpec),
    /// A tracked collider touched a wall at `position`.
    Strike {
        wall: WallId,
        body_part: BodyPart,
        position: Vec3,
    },
    /// The wall left the play area without being resolved.
    Missed { wall: WallId },
}
