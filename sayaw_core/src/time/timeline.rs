use tracing::debug;
use wall_schema::{WallId, WallSpec};

use crate::config::{ConfigError, SpawnerConfig};

struct LiveWall {
    id: WallId,
    deadline: f64,
}

/// Releases walls on schedule and reports the ones whose reach window has
/// closed. Times are session-clock seconds, intro delay included.
pub struct SpawnTimeline {
    queue: Vec<WallSpec>,
    next: usize,
    live: Vec<LiveWall>,
    config: SpawnerConfig,
}

impl SpawnTimeline {
    /// Fails on non-finite or negative spawn times and lifetimes.
    pub fn new(mut walls: Vec<WallSpec>, config: SpawnerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        for wall in &walls {
            if !(wall.spawn_time.is_finite() && wall.spawn_time >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "wall {} has invalid spawn_time {}",
                    wall.id, wall.spawn_time
                )));
            }
            if let Some(lifetime) = wall.lifetime {
                if !(lifetime.is_finite() && lifetime >= 0.0) {
                    return Err(ConfigError::Invalid(format!(
                        "wall {} has invalid lifetime {lifetime}",
                        wall.id
                    )));
                }
            }
        }

        walls.sort_by(|a, b| a.spawn_time.total_cmp(&b.spawn_time));
        Ok(Self {
            queue: walls,
            next: 0,
            live: Vec::new(),
            config,
        })
    }

    fn spawn_at(&self, wall: &WallSpec) -> f64 {
        self.config.intro_delay_secs + wall.spawn_time
    }

    fn deadline_for(&self, wall: &WallSpec) -> f64 {
        self.spawn_at(wall) + wall.lifetime.unwrap_or(self.config.default_lifetime_secs)
    }

    /// Walls whose spawn time has arrived by `now`, in spawn order.
    pub fn due(&mut self, now: f64) -> Vec<WallSpec> {
        let mut spawned = Vec::new();
        while let Some(wall) = self.queue.get(self.next) {
            if self.spawn_at(wall) > now {
                break;
            }
            let deadline = self.deadline_for(wall);
            debug!(wall = %wall.id, at = self.spawn_at(wall), deadline, "spawning wall");
            self.live.push(LiveWall { id: wall.id, deadline });
            spawned.push(wall.clone());
            self.next += 1;
        }
        spawned
    }

    /// Walls whose deadline passed before `now`. Each is reported once.
    pub fn expired(&mut self, now: f64) -> Vec<WallId> {
        self.take_live(|deadline| now > deadline)
    }

    /// Like [`expired`](Self::expired) but also takes walls whose deadline is exactly `now`.
    pub fn expired_through(&mut self, now: f64) -> Vec<WallId> {
        self.take_live(|deadline| now >= deadline)
    }

    fn take_live(&mut self, is_over: impl Fn(f64) -> bool) -> Vec<WallId> {
        let mut expired = Vec::new();
        self.live.retain(|w| {
            if is_over(w.deadline) {
                expired.push(w.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Stops tracking a wall that was resolved before its deadline.
    pub fn retire(&mut self, wall: WallId) {
        self.live.retain(|w| w.id != wall);
    }

    /// Earliest upcoming spawn or expiry after which something changes.
    pub fn next_event_time(&self) -> Option<f64> {
        let next_spawn = self.queue.get(self.next).map(|w| self.spawn_at(w));
        let next_deadline = self.live.iter().map(|w| w.deadline).reduce(f64::min);
        match (next_spawn, next_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.queue.len() && self.live.is_empty()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
