use std::collections::HashSet;

use glam::Vec3;
use tracing::{debug, error};
use wall_schema::{BodyPart, WallId, WallNode, WallSpec};

use crate::wall::HitReport;

/// Sits on one tracked collider and turns its wall contacts into hit reports.
#[derive(Debug, Clone)]
pub struct HitReporter {
    pub body_part: BodyPart,
    /// Walls this collider has already reported against.
    struck: HashSet<WallId>,
}

impl HitReporter {
    pub fn new(body_part: BodyPart) -> Self {
        Self {
            body_part,
            struck: HashSet::new(),
        }
    }

    /// Handles a contact between this collider and `wall` at `contact`.
    ///
    /// `roster` is the set of body-part labels a sub-point may carry. Any part may
    /// claim any labelled sub-point, so the search is not limited to
    /// `self.body_part`. Returns `None` for repeat contacts and for walls with no
    /// labelled sub-points; the latter is logged and does not mark the wall.
    pub fn strike(&mut self, wall: &WallSpec, contact: Vec3, roster: &[BodyPart]) -> Option<HitReport> {
        if self.struck.contains(&wall.id) {
            debug!(part = %self.body_part, wall = %wall.id, "already struck, ignoring contact");
            return None;
        }

        let Some((node, hit_point_type, distance)) = closest_hit_point(wall, contact, roster) else {
            error!(
                part = %self.body_part,
                wall = %wall.id,
                "no valid hit points found on wall"
            );
            return None;
        };

        debug!(
            part = %self.body_part,
            wall = %wall.id,
            hit_point = %node.name,
            distance,
            "struck {hit_point_type} target"
        );

        self.struck.insert(wall.id);

        Some(HitReport {
            wall: wall.id,
            body_part: self.body_part,
            position: contact,
            hit_point: node.name.clone(),
            distance,
            hit_point_type,
        })
    }

    pub fn has_struck(&self, wall: WallId) -> bool {
        self.struck.contains(&wall)
    }

    /// Forgets every wall this collider has struck (level restart).
    pub fn clear(&mut self) {
        self.struck.clear();
    }
}

/// Body-part label carried by a sub-point name, if any.
pub fn hit_point_type(name: &str, roster: &[BodyPart]) -> Option<BodyPart> {
    roster
        .iter()
        .copied()
        .find(|part| name.contains(&part.hit_point_marker()))
}

/// Nearest labelled sub-point under `wall`, with its label and distance to `contact`.
pub fn closest_hit_point<'a>(
    wall: &'a WallSpec,
    contact: Vec3,
    roster: &[BodyPart],
) -> Option<(&'a WallNode, BodyPart, f32)> {
    let mut closest: Option<(&WallNode, BodyPart, f32)> = None;

    // Direct children are visited first so they win distance ties.
    for node in wall.children.iter().chain(wall.descendants()) {
        let Some(kind) = hit_point_type(&node.name, roster) else {
            continue;
        };
        let distance = contact.distance(node.position);
        if closest.map_or(true, |(_, _, best)| distance < best) {
            closest = Some((node, kind, distance));
        }
    }

    closest
}
