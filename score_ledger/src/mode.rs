use std::{fmt, str::FromStr};

use crate::error::LedgerError;

/// A dance and difficulty pairing with its own leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Sinulog,
    SinulogEasy,
    Alitaptap,
    AlitaptapEasy,
    Maglalatik,
    MaglalatikEasy,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Sinulog,
        GameMode::SinulogEasy,
        GameMode::Alitaptap,
        GameMode::AlitaptapEasy,
        GameMode::Maglalatik,
        GameMode::MaglalatikEasy,
    ];

    /// Case-insensitive lookup of a mode name such as `sinulog_easy`.
    pub fn from_key(key: &str) -> Result<Self, LedgerError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.key().eq_ignore_ascii_case(key))
            .ok_or_else(|| LedgerError::UnknownMode(key.to_string()))
    }

    pub fn key(self) -> &'static str {
        match self {
            GameMode::Sinulog => "sinulog",
            GameMode::SinulogEasy => "sinulog_easy",
            GameMode::Alitaptap => "alitaptap",
            GameMode::AlitaptapEasy => "alitaptap_easy",
            GameMode::Maglalatik => "maglalatik",
            GameMode::MaglalatikEasy => "maglalatik_easy",
        }
    }

    /// Key under which the mode's scores live in the store.
    pub fn storage_key(self) -> &'static str {
        match self {
            GameMode::Sinulog => "SinulogScores",
            GameMode::SinulogEasy => "SinulogEasyScores",
            GameMode::Alitaptap => "AlitaptapScores",
            GameMode::AlitaptapEasy => "AlitaptapEasyScores",
            GameMode::Maglalatik => "MaglalatikScores",
            GameMode::MaglalatikEasy => "MaglalatikEasyScores",
        }
    }
}

impl FromStr for GameMode {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
