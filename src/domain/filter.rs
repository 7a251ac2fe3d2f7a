use std::collections::BTreeSet;

use chrono::Datelike;
use serde::Deserialize;
use validator::Validate;

use super::models::Match;
use crate::errors::TrackerError;
use crate::scoring::MatchOutcome;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFilter {
    #[default]
    All,
    Win,
    Loss,
    Pending,
}

impl ResultFilter {
    fn accepts(&self, outcome: MatchOutcome) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Win => outcome == MatchOutcome::Win,
            ResultFilter::Loss => outcome == MatchOutcome::Loss,
            ResultFilter::Pending => outcome == MatchOutcome::Pending,
        }
    }
}

impl std::str::FromStr for ResultFilter {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ResultFilter::All),
            "win" => Ok(ResultFilter::Win),
            "loss" => Ok(ResultFilter::Loss),
            "pending" => Ok(ResultFilter::Pending),
            other => Err(TrackerError::InvalidInput(format!("unknown result filter: {}", other))),
        }
    }
}

/// Result and calendar filters applied to the match history.
/// Dates are compared in UTC.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFilter {
    #[serde(default)]
    pub result: ResultFilter,
    pub year: Option<i32>,
    #[validate(range(min = 1, max = 12, message = "Month must be between 1 and 12"))]
    pub month: Option<u32>,
}

impl HistoryFilter {
    pub fn matches(&self, game: &Match) -> bool {
        let date = game.created_at.date_naive();
        self.result.accepts(game.outcome)
            && self.year.is_none_or(|year| date.year() == year)
            && self.month.is_none_or(|month| date.month() == month)
    }

    /// Keeps matching entries in their current order
    pub fn apply(&self, matches: &[Match]) -> Vec<Match> {
        matches.iter().filter(|m| self.matches(m)).cloned().collect()
    }
}

/// Distinct years with at least one match, most recent first
pub fn available_years(matches: &[Match]) -> Vec<i32> {
    let years: BTreeSet<i32> = matches.iter().map(|m| m.created_at.year()).collect();
    years.into_iter().rev().collect()
}

pub fn sort_newest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

pub fn sort_oldest_first(matches: &mut [Match]) {
    matches.sort_by(|a, b| a.created_at.cmp(&b.created_at));
}
