use clap::Args;
use sayaw_core::{ScoringConfig, SpawnerConfig};

/// Overrides applied on top of the default or `--config` scoring table.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    #[arg(long)]
    pub max_score: Option<i32>,
    #[arg(long)]
    pub max_distance: Option<f32>,
    #[arg(long)]
    pub perfect_multiplier: Option<f32>,
    #[arg(long)]
    pub good_multiplier: Option<f32>,
}

impl ScoringArgs {
    pub fn apply(&self, config: &mut ScoringConfig) {
        if let Some(v) = self.max_score {
            config.max_score = v;
        }
        if let Some(v) = self.max_distance {
            config.max_distance = v;
        }
        if let Some(v) = self.perfect_multiplier {
            config.perfect_multiplier = v;
        }
        if let Some(v) = self.good_multiplier {
            config.good_multiplier = v;
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SpawnerArgs {
    /// Seconds before the first wall appears.
    #[arg(long, default_value_t = 5.0)]
    pub intro_delay: f64,
    /// Seconds a wall stays reachable unless the script says otherwise.
    #[arg(long, default_value_t = 4.0)]
    pub wall_lifetime: f64,
}

impl From<&SpawnerArgs> for SpawnerConfig {
    fn from(args: &SpawnerArgs) -> Self {
        SpawnerConfig {
            intro_delay_secs: args.intro_delay,
            default_lifetime_secs: args.wall_lifetime,
        }
    }
}
