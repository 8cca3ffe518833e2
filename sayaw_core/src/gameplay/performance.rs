use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::gameplay::resolver::MissedWall;
use crate::wall::{Tier, WallResolution};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionStats {
    /// Walls that received a report or timed out.
    pub total_walls: u32,
    /// Walls that were scored.
    pub walls_hit: u32,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub missed_hits: u32,
    pub perfect_walls: u32,
    pub good_walls: u32,
    pub missed_walls: u32,
    pub cohesion_bonuses: u32,
    /// Sum of per-wall mean quality over scored walls.
    pub total_quality: f32,
    pub total_score: i32,
    pub wall_scores: Vec<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "S+")]
    SPlus,
    S,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_performance(weighted: f32) -> Self {
        if weighted >= 0.95 {
            Grade::SPlus
        } else if weighted >= 0.9 {
            Grade::S
        } else if weighted >= 0.8 {
            Grade::A
        } else if weighted >= 0.7 {
            Grade::B
        } else if weighted >= 0.6 {
            Grade::C
        } else if weighted >= 0.5 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Grade::SPlus => "S+",
            Grade::S => "S",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Grade::SPlus => "Master Dancer",
            Grade::S => "Expert Dancer",
            Grade::A => "Great Dancer",
            Grade::B => "Good Dancer",
            Grade::C => "Average Dancer",
            Grade::D | Grade::F => "Needs Practice",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.title())
    }
}

/// Blends accuracy (60%) with completion rate (40%) and maps it to a grade.
pub fn grade_for(accuracy: f32, walls_hit: u32, total_walls: u32) -> Grade {
    let completion = completion_rate(walls_hit, total_walls);
    Grade::from_performance(accuracy * 0.6 + completion * 0.4)
}

pub fn completion_rate(walls_hit: u32, total_walls: u32) -> f32 {
    if total_walls > 0 {
        walls_hit as f32 / total_walls as f32
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub final_score: i32,
    pub walls_hit: u32,
    pub total_walls: u32,
    pub perfect_walls: u32,
    pub good_walls: u32,
    pub missed_walls: u32,
    pub perfect_hits: u32,
    pub good_hits: u32,
    pub missed_hits: u32,
    pub accuracy: f32,
    pub completion_rate: f32,
    pub cohesion_bonuses: u32,
    pub average_wall_score: f32,
    pub grade: Grade,
}

impl fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final Score: {}", self.final_score)?;
        writeln!(f, "Grade: {}", self.grade)?;
        writeln!(f)?;
        writeln!(f, "Performance Summary:")?;
        writeln!(f)?;
        writeln!(f, "Walls Hit: {}/{}", self.walls_hit, self.total_walls)?;
        writeln!(f, "Perfect Walls: {}", self.perfect_walls)?;
        writeln!(f, "Good Walls: {}", self.good_walls)?;
        writeln!(f, "Missed Walls: {}", self.missed_walls)?;
        writeln!(f)?;
        writeln!(f, "Overall Accuracy: {:.1}%", self.accuracy * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Cohesion Bonuses: {}", self.cohesion_bonuses)?;
        write!(f, "Average Score per Wall: {:.1}", self.average_wall_score)
    }
}

/// Running statistics for one play session.
#[derive(Debug, Clone, Default)]
pub struct PerformanceTracker {
    stats: SessionStats,
}

impl PerformanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn total_score(&self) -> i32 {
        self.stats.total_score
    }

    /// Counts a wall the first time any part reports against it.
    pub fn record_seen(&mut self) {
        self.stats.total_walls += 1;
    }

    pub fn record_resolution(&mut self, resolution: &WallResolution) {
        let stats = &mut self.stats;
        stats.walls_hit += 1;

        for part in &resolution.parts {
            match part.tier {
                Tier::Perfect => stats.perfect_hits += 1,
                Tier::Good => stats.good_hits += 1,
                Tier::Missed => stats.missed_hits += 1,
            }
        }

        match resolution.tier {
            Tier::Perfect => stats.perfect_walls += 1,
            Tier::Good => stats.good_walls += 1,
            Tier::Missed => stats.missed_walls += 1,
        }

        if resolution.cohesion_awarded {
            stats.cohesion_bonuses += 1;
        }

        stats.total_quality += resolution.quality;
        stats.total_score = stats.total_score.saturating_add(resolution.score);
        stats.wall_scores.push(resolution.score);
    }

    pub fn record_missed(&mut self, missed: &MissedWall) {
        if missed.newly_seen {
            self.stats.total_walls += 1;
        }
        self.stats.missed_hits += missed.parts as u32;
        info!(
            wall = %missed.wall,
            total_walls = self.stats.total_walls,
            missed_hits = self.stats.missed_hits,
            "wall missed"
        );
    }

    /// Mean wall quality over scored walls; walls that timed out do not count.
    pub fn accuracy(&self) -> f32 {
        if self.stats.walls_hit > 0 {
            self.stats.total_quality / self.stats.walls_hit as f32
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> PerformanceSummary {
        let stats = &self.stats;
        let accuracy = self.accuracy();
        let average_wall_score = if stats.wall_scores.is_empty() {
            0.0
        } else {
            stats.wall_scores.iter().sum::<i32>() as f32 / stats.wall_scores.len() as f32
        };

        PerformanceSummary {
            final_score: stats.total_score,
            walls_hit: stats.walls_hit,
            total_walls: stats.total_walls,
            perfect_walls: stats.perfect_walls,
            good_walls: stats.good_walls,
            missed_walls: stats.missed_walls,
            perfect_hits: stats.perfect_hits,
            good_hits: stats.good_hits,
            missed_hits: stats.missed_hits,
            accuracy,
            completion_rate: completion_rate(stats.walls_hit, stats.total_walls),
            cohesion_bonuses: stats.cohesion_bonuses,
            average_wall_score,
            grade: grade_for(accuracy, stats.walls_hit, stats.total_walls),
        }
    }

    pub fn reset(&mut self) {
        self.stats = SessionStats::default();
    }
}
