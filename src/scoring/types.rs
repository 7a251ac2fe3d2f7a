use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

pub type Games = u32;

/// Games won in a single set, seen from the logged-in player's side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SetScore {
    #[validate(range(max = 7, message = "Games in a set must be between 0 and 7"))]
    pub games_won_by_self: Games,
    #[validate(range(max = 7, message = "Games in a set must be between 0 and 7"))]
    pub games_won_by_opponent: Games,
}

impl SetScore {
    pub fn new(games_won_by_self: Games, games_won_by_opponent: Games) -> Self {
        Self {
            games_won_by_self,
            games_won_by_opponent,
        }
    }

    /// Same set seen from the opponent's side
    pub fn flipped(self) -> Self {
        Self::new(self.games_won_by_opponent, self.games_won_by_self)
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.games_won_by_self, self.games_won_by_opponent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetWinner {
    None,
    SelfPlayer,
    Opponent,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Win,
    Loss,
    #[default]
    Pending,
}

impl MatchOutcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, MatchOutcome::Pending)
    }

    /// Contribution to the cumulative performance score
    pub fn score_delta(&self) -> i32 {
        match self {
            MatchOutcome::Win => 1,
            MatchOutcome::Loss => -1,
            MatchOutcome::Pending => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "win",
            MatchOutcome::Loss => "loss",
            MatchOutcome::Pending => "pending",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "Win",
            MatchOutcome::Loss => "Loss",
            MatchOutcome::Pending => "Pending",
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown match outcome: {0}")]
pub struct ParseOutcomeError(pub String);

impl FromStr for MatchOutcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "win" => Ok(MatchOutcome::Win),
            "loss" => Ok(MatchOutcome::Loss),
            "pending" => Ok(MatchOutcome::Pending),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub self_sets_won: u32,
    pub opponent_sets_won: u32,
    pub outcome: MatchOutcome,
    pub is_finished: bool,
}

impl MatchAnalysis {
    /// One set apiece: the match needs a deciding set
    pub fn is_level_at_one(&self) -> bool {
        self.self_sets_won == 1 && self.opponent_sets_won == 1
    }
}
