use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, info};
use wall_schema::{BodyPart, WallId};

use crate::config::ScoringConfig;
use crate::wall::{HitReport, PartResult, Tier, WallResolution, COHESION_RATIO};

#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    /// Duplicate part, or the wall was already resolved or missed.
    Rejected,
    /// Stored; the wall still waits for other parts. `opened` is set on the
    /// wall's first report.
    Accepted { opened: bool },
    Resolved { opened: bool, resolution: WallResolution },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissedWall {
    pub wall: WallId,
    /// Required parts counted as missed hits.
    pub parts: usize,
    /// False when the wall had already been counted by an earlier report.
    pub newly_seen: bool,
}

/// Collects hit reports per wall until every required body part has reported,
/// then scores the wall exactly once.
#[derive(Debug, Clone)]
pub struct WallResolver {
    config: ScoringConfig,
    pending: HashMap<WallId, BTreeMap<BodyPart, HitReport>>,
    processed: HashSet<WallId>,
}

impl WallResolver {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            pending: HashMap::new(),
            processed: HashSet::new(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn register(&mut self, report: HitReport) -> Registration {
        let wall = report.wall;
        if self.processed.contains(&wall) {
            debug!(%wall, "report for finished wall dropped");
            return Registration::Rejected;
        }

        let opened = !self.pending.contains_key(&wall);
        let reports = self.pending.entry(wall).or_default();
        if reports.contains_key(&report.body_part) {
            debug!(%wall, part = %report.body_part, "duplicate report dropped");
            return Registration::Rejected;
        }
        reports.insert(report.body_part, report);

        let status: Vec<String> = self
            .config
            .body_parts
            .iter()
            .map(|part| {
                let state = if reports.contains_key(part) { "Hit" } else { "Not Hit" };
                format!("{part}: {state}")
            })
            .collect();
        debug!(%wall, "hit status: {}", status.join(", "));

        let complete = self.config.body_parts.iter().all(|part| reports.contains_key(part));
        if !complete {
            return Registration::Accepted { opened };
        }

        match self.resolve(wall) {
            Some(resolution) => Registration::Resolved { opened, resolution },
            None => Registration::Accepted { opened },
        }
    }

    /// Scores a pending wall with whatever reports it holds.
    pub fn force_resolve(&mut self, wall: WallId) -> Option<WallResolution> {
        self.resolve(wall)
    }

    /// Closes a wall that timed out. No tiers or cohesion are computed; every
    /// required part counts as a miss. `None` if the wall was already closed.
    pub fn register_missed(&mut self, wall: WallId) -> Option<MissedWall> {
        if !self.processed.insert(wall) {
            return None;
        }
        let newly_seen = self.pending.remove(&wall).is_none();
        Some(MissedWall {
            wall,
            parts: self.config.part_count(),
            newly_seen,
        })
    }

    pub fn is_processed(&self, wall: WallId) -> bool {
        self.processed.contains(&wall)
    }

    pub fn is_pending(&self, wall: WallId) -> bool {
        self.pending.contains_key(&wall)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Drops pending reports and forgets processed walls.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.processed.clear();
    }

    fn resolve(&mut self, wall: WallId) -> Option<WallResolution> {
        if self.processed.contains(&wall) {
            return None;
        }
        let reports = self.pending.remove(&wall)?;
        self.processed.insert(wall);
        Some(score_wall(wall, reports.values(), &self.config))
    }
}

/// Rounds like the scoring tables expect: halves go to the even neighbour.
pub fn round_to_int(value: f32) -> i32 {
    value.round_ties_even() as i32
}

pub fn score_wall<'a>(
    wall: WallId,
    reports: impl IntoIterator<Item = &'a HitReport>,
    config: &ScoringConfig,
) -> WallResolution {
    let share = 1.0 / config.part_count() as f32;
    let max_score = config.max_score as f32;

    let parts: Vec<PartResult> = reports
        .into_iter()
        .map(|report| {
            let tier = Tier::classify(report.distance);
            let score = match tier {
                Tier::Perfect => round_to_int(max_score * config.perfect_multiplier * share),
                Tier::Good => round_to_int(max_score * config.good_multiplier * share),
                Tier::Missed => 0,
            };
            let quality = 1.0 - (report.distance / config.max_distance).clamp(0.0, 1.0);

            debug!(
                %wall,
                part = %report.body_part,
                "hit {} target - distance {:.2} - quality {} - score {}",
                report.hit_point_type,
                report.distance,
                tier.label(),
                score
            );

            PartResult {
                body_part: report.body_part,
                hit_point_type: report.hit_point_type,
                distance: report.distance,
                tier,
                quality,
                score,
            }
        })
        .collect();

    let tier = parts.iter().map(|p| p.tier).max().unwrap_or(Tier::Perfect);

    // A single missed part voids the whole step.
    let base_score = if tier == Tier::Missed {
        0
    } else {
        parts.iter().fold(0i32, |acc, p| acc.saturating_add(p.score))
    };

    let quality = if parts.is_empty() {
        0.0
    } else {
        parts.iter().map(|p| p.quality).sum::<f32>() / parts.len() as f32
    };

    let same_type = parts
        .first()
        .map_or(true, |first| parts.iter().all(|p| p.hit_point_type == first.hit_point_type));
    let cohesion_awarded = same_type && base_score > 0;
    let cohesion_bonus = if cohesion_awarded {
        round_to_int(max_score * COHESION_RATIO)
    } else {
        0
    };
    if cohesion_awarded {
        info!(%wall, "cohesion bonus +{cohesion_bonus}");
    }

    let score = base_score.saturating_add(cohesion_bonus);
    let step_correct = tier != Tier::Missed && cohesion_awarded;

    info!(%wall, tier = tier.label(), step_correct, "wall score {score}");

    WallResolution {
        wall,
        parts,
        tier,
        base_score,
        cohesion_awarded,
        cohesion_bonus,
        score,
        quality,
        step_correct,
    }
}
