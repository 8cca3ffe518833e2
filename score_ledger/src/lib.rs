pub mod error;
pub mod mode;
pub mod store;

pub use error::LedgerError;
pub use mode::GameMode;
pub use store::{JsonFileStore, MemoryStore, ScoreStore};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

/// Entries kept per mode.
pub const MAX_SCORES_TO_SAVE: usize = 5;
/// Stored in place of an empty player name.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub score: i32,
    pub player_name: String,
    /// `dd/mm/yyyy`
    pub date: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct EntryList {
    #[serde(default)]
    scores: Vec<LedgerEntry>,
}

/// What a finished session needs from score persistence.
pub trait ScoreLedger {
    fn save(&self, mode: &str, score: i32, player_name: &str) -> Result<(), LedgerError>;
}

/// Top scores per game mode on top of a key-value store.
///
/// Unknown mode names are logged and treated as empty: reads return nothing
/// and writes are skipped.
#[derive(Debug)]
pub struct Leaderboard<S> {
    store: S,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolve_mode(mode: &str) -> Option<GameMode> {
        match GameMode::from_key(mode) {
            Ok(mode) => Some(mode),
            Err(e) => {
                error!("{e}");
                None
            }
        }
    }

    /// Saves with an explicit date; `save` stamps today's local date.
    pub fn save_dated(
        &self,
        mode: &str,
        score: i32,
        player_name: &str,
        date: NaiveDate,
    ) -> Result<(), LedgerError> {
        let Some(mode) = Self::resolve_mode(mode) else {
            return Ok(());
        };

        let player_name = if player_name.is_empty() {
            ANONYMOUS
        } else {
            player_name
        };

        let mut scores = self.read(mode)?;
        scores.push(LedgerEntry {
            score,
            player_name: player_name.to_string(),
            date: date.format("%d/%m/%Y").to_string(),
        });
        // Stable, so equal scores keep insertion order.
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores.truncate(MAX_SCORES_TO_SAVE);

        let count = scores.len();
        let json = serde_json::to_string(&EntryList { scores })?;
        self.store.set(mode.storage_key(), json)?;

        info!(%mode, score, player = player_name, count, "saved score");
        Ok(())
    }

    /// Entries for `mode`, best first.
    pub fn load_top(&self, mode: &str) -> Result<Vec<LedgerEntry>, LedgerError> {
        match Self::resolve_mode(mode) {
            Some(mode) => self.read(mode),
            None => Ok(Vec::new()),
        }
    }

    pub fn delete_all(&self, mode: &str) -> Result<(), LedgerError> {
        let Some(mode) = Self::resolve_mode(mode) else {
            return Ok(());
        };
        self.store.remove(mode.storage_key())?;
        info!(%mode, "deleted all scores");
        Ok(())
    }

    pub fn delete_everything(&self) -> Result<(), LedgerError> {
        for mode in GameMode::ALL {
            self.store.remove(mode.storage_key())?;
        }
        info!("deleted all scores for all game modes");
        Ok(())
    }

    fn read(&self, mode: GameMode) -> Result<Vec<LedgerEntry>, LedgerError> {
        match self.store.get(mode.storage_key())? {
            Some(json) if !json.is_empty() => {
                let list: EntryList = serde_json::from_str(&json)?;
                Ok(list.scores)
            }
            _ => Ok(Vec::new()),
        }
    }
}

impl<S: ScoreStore> ScoreLedger for Leaderboard<S> {
    fn save(&self, mode: &str, score: i32, player_name: &str) -> Result<(), LedgerError> {
        self.save_dated(mode, score, player_name, Local::now().date_naive())
    }
}
