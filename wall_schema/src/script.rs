use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::model::{BodyPart, WallId, WallSpec};

/// A body part touching a wall at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    pub time: f64,
    pub wall: WallId,
    pub body_part: BodyPart,
    pub position: Vec3,
}

/// A recorded play-through: the walls a level spawns and the strikes the
/// player's colliders produced against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub mode: String,
    #[serde(default)]
    pub player_name: String,
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub strikes: Vec<Strike>,
}
