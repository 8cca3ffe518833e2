use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Name prefix shared by every scoring sub-point on a wall.
pub const HIT_POINT_PREFIX: &str = "PerfectHitPoints_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    pub const ALL: [BodyPart; 4] = [
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BodyPart::LeftArm => "LeftArm",
            BodyPart::RightArm => "RightArm",
            BodyPart::LeftLeg => "LeftLeg",
            BodyPart::RightLeg => "RightLeg",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|part| part.label() == label)
    }

    /// Node name fragment that marks a sub-point meant for this part,
    /// e.g. `PerfectHitPoints_LeftArm`.
    pub fn hit_point_marker(self) -> String {
        format!("{HIT_POINT_PREFIX}{}", self.label())
    }
}

impl fmt::Display for BodyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WallId(pub u64);

impl fmt::Display for WallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallNode {
    pub name: String,
    pub position: Vec3,
    #[serde(default)]
    pub children: Vec<WallNode>,
}

impl WallNode {
    pub fn leaf(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub id: WallId,
    #[serde(default)]
    pub name: String,
    /// Seconds after the intro delay at which the spawner releases the wall.
    #[serde(default)]
    pub spawn_time: f64,
    /// Seconds the wall stays reachable once spawned; `None` uses the spawner default.
    #[serde(default)]
    pub lifetime: Option<f64>,
    #[serde(default)]
    pub children: Vec<WallNode>,
}

impl WallSpec {
    pub fn new(id: WallId, children: Vec<WallNode>) -> Self {
        Self {
            id,
            name: String::new(),
            spawn_time: 0.0,
            lifetime: None,
            children,
        }
    }

    /// Every node below the wall root, depth first.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a WallNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a WallNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
