use glam::Vec3;
use serde::Serialize;
use wall_schema::{BodyPart, WallId};

/// Upper distance bound (inclusive) for a PERFECT strike.
pub const PERFECT_DISTANCE: f32 = 0.2;
/// Upper distance bound (inclusive) for a GOOD strike.
pub const GOOD_DISTANCE: f32 = 0.5;
/// Share of `max_score` granted when every part hit the same kind of sub-point.
pub const COHESION_RATIO: f32 = 0.2;

/// Ordered best to worst, so the worst tier of a wall is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Perfect,
    Good,
    Missed,
}

impl Tier {
    pub fn classify(distance: f32) -> Self {
        if distance <= PERFECT_DISTANCE {
            Tier::Perfect
        } else if distance <= GOOD_DISTANCE {
            Tier::Good
        } else {
            Tier::Missed
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Perfect => "PERFECT",
            Tier::Good => "GOOD",
            Tier::Missed => "MISSED",
        }
    }
}

/// One body part's strike against a wall, already matched to its nearest sub-point.
#[derive(Debug, Clone, PartialEq)]
pub struct HitReport {
    pub wall: WallId,
    pub body_part: BodyPart,
    pub position: Vec3,
    pub hit_point: String,
    pub distance: f32,
    /// Which body part the matched sub-point is labelled for.
    pub hit_point_type: BodyPart,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartResult {
    pub body_part: BodyPart,
    pub hit_point_type: BodyPart,
    pub distance: f32,
    pub tier: Tier,
    pub quality: f32,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WallResolution {
    pub wall: WallId,
    pub parts: Vec<PartResult>,
    /// Worst tier among the parts.
    pub tier: Tier,
    /// Sum of part scores, zeroed when any part missed.
    pub base_score: i32,
    pub cohesion_awarded: bool,
    pub cohesion_bonus: i32,
    pub score: i32,
    /// Mean quality over the reporting parts.
    pub quality: f32,
    pub step_correct: bool,
}

impl WallResolution {
    /// Popup text shown over the wall, e.g. `GOOD!\n+90`.
    pub fn feedback_text(&self) -> String {
        format!("{}!\n+{}", self.tier.label(), self.score)
    }
}
