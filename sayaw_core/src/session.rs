use std::collections::{BTreeMap, HashMap};

use glam::Vec3;
use score_ledger::ScoreLedger;
use tracing::{debug, error, info, warn};
use wall_schema::{BodyPart, WallId, WallSpec};

use crate::config::{ConfigError, ScoringConfig};
use crate::feedback::{CancelToken, DeferredAction, DisplayHandle};
use crate::gameplay::performance::{PerformanceSummary, PerformanceTracker, SessionStats};
use crate::gameplay::reporter::HitReporter;
use crate::gameplay::resolver::{Registration, WallResolver};
use crate::input::{events::GameEvent, EventQueue};
use crate::wall::WallResolution;

/// Everything one play session scores against.
///
/// Built explicitly and passed to whatever drives the frame loop; every
/// handler runs to completion before returning.
pub struct ScoreSession {
    config: ScoringConfig,
    walls: HashMap<WallId, WallSpec>,
    reporters: BTreeMap<BodyPart, HitReporter>,
    resolver: WallResolver,
    tracker: PerformanceTracker,
    display: DisplayHandle,
    feedback_clear: Option<CancelToken>,
    step_hide: Option<CancelToken>,
    player_name: String,
}

impl ScoreSession {
    pub fn new(config: ScoringConfig, display: DisplayHandle) -> Result<Self, ConfigError> {
        config.validate()?;

        let reporters = config
            .body_parts
            .iter()
            .map(|&part| (part, HitReporter::new(part)))
            .collect();

        Ok(Self {
            resolver: WallResolver::new(config.clone()),
            config,
            walls: HashMap::new(),
            reporters,
            tracker: PerformanceTracker::new(),
            display,
            feedback_clear: None,
            step_hide: None,
            player_name: String::new(),
        })
    }

    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Makes a wall strikable.
    pub fn spawn_wall(&mut self, wall: WallSpec) {
        debug!(wall = %wall.id, "wall spawned");
        self.walls.insert(wall.id, wall);
    }

    pub fn is_live(&self, wall: WallId) -> bool {
        self.walls.contains_key(&wall)
    }

    /// A tracked body part touched `wall` at `position`.
    ///
    /// Returns the resolution when this strike completed the wall.
    pub fn report_hit(
        &mut self,
        wall: WallId,
        body_part: BodyPart,
        position: Vec3,
    ) -> Option<WallResolution> {
        let Some(spec) = self.walls.get(&wall) else {
            debug!(%wall, part = %body_part, "strike on unknown or removed wall ignored");
            return None;
        };
        let Some(reporter) = self.reporters.get_mut(&body_part) else {
            warn!(part = %body_part, "strike from body part outside the roster ignored");
            return None;
        };

        let report = reporter.strike(spec, position, &self.config.body_parts)?;
        match self.resolver.register(report) {
            Registration::Rejected => None,
            Registration::Accepted { opened } => {
                if opened {
                    self.tracker.record_seen();
                }
                None
            }
            Registration::Resolved { opened, resolution } => {
                if opened {
                    self.tracker.record_seen();
                }
                self.complete(&resolution);
                Some(resolution)
            }
        }
    }

    /// Scores a wall that has at least one report, without waiting for the rest.
    pub fn force_resolve(&mut self, wall: WallId) -> Option<WallResolution> {
        let resolution = self.resolver.force_resolve(wall)?;
        self.complete(&resolution);
        Some(resolution)
    }

    /// The spawner gave up on `wall`. No-op for walls already closed.
    pub fn register_missed(&mut self, wall: WallId) {
        let Some(missed) = self.resolver.register_missed(wall) else {
            debug!(%wall, "missed notice for closed wall ignored");
            return;
        };
        self.walls.remove(&wall);
        self.tracker.record_missed(&missed);
        self.pulse_step(false);
    }

    /// Drains queued spawner and collider events, returning the walls they resolved.
    pub fn pump(&mut self, queue: &EventQueue) -> Vec<WallResolution> {
        let mut resolved = Vec::new();
        for event in queue.drain() {
            match event {
                GameEvent::Spawn(wall) => self.spawn_wall(wall),
                GameEvent::Strike {
                    wall,
                    body_part,
                    position,
                } => resolved.extend(self.report_hit(wall, body_part, position)),
                GameEvent::Missed { wall } => self.register_missed(wall),
            }
        }
        resolved
    }

    /// Forgets which walls each body part already struck (level restart).
    pub fn clear_reporters(&mut self) {
        for reporter in self.reporters.values_mut() {
            reporter.clear();
        }
    }

    /// Zeroes every counter, drops pending reports and forgets processed walls.
    ///
    /// Deferred display tasks already handed out are left alone.
    pub fn reset(&mut self) {
        self.resolver.reset();
        self.tracker.reset();
        self.display.score_text(score_line(0));
        self.display.feedback_text("");
        info!("scoring reset");
    }

    pub fn total_score(&self) -> i32 {
        self.tracker.total_score()
    }

    pub fn stats(&self) -> &SessionStats {
        self.tracker.stats()
    }

    pub fn summary(&self) -> PerformanceSummary {
        self.tracker.summary()
    }

    /// Ends the session and hands the final score to `ledger`.
    ///
    /// A ledger failure is logged; the summary is returned either way.
    pub fn finish(self, ledger: &dyn ScoreLedger, mode: &str) -> PerformanceSummary {
        let summary = self.tracker.summary();
        match ledger.save(mode, summary.final_score, &self.player_name) {
            Ok(()) => info!(mode, score = summary.final_score, "session score saved"),
            Err(e) => error!(mode, "failed to save session score: {e}"),
        }
        summary
    }

    fn complete(&mut self, resolution: &WallResolution) {
        self.walls.remove(&resolution.wall);
        self.tracker.record_resolution(resolution);

        self.display.score_text(score_line(self.tracker.total_score()));
        self.display.feedback_text(resolution.feedback_text());
        if let Some(token) = self.feedback_clear.take() {
            token.cancel();
        }
        self.feedback_clear = Some(
            self.display
                .schedule(self.config.feedback_clear_secs, DeferredAction::ClearFeedbackText),
        );

        self.pulse_step(resolution.step_correct);

        info!(
            wall = %resolution.wall,
            score = resolution.score,
            total = self.tracker.total_score(),
            "wall resolved"
        );
    }

    fn pulse_step(&mut self, correct: bool) {
        self.display.step_feedback(correct);
        if let Some(token) = self.step_hide.take() {
            token.cancel();
        }
        self.step_hide = Some(
            self.display
                .schedule(self.config.step_feedback_secs, DeferredAction::HideStepFeedback),
        );
    }
}

fn score_line(total: i32) -> String {
    format!("Score: {total}")
}
