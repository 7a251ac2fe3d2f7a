use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::Match;
use crate::scoring::MatchOutcome;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMetadata {
    pub opponent_name: String,
    pub outcome: MatchOutcome,
    pub created_at: DateTime<Utc>,
}

/// Cumulative win/loss score per match.
///
/// `points[i]`, `labels[i]` and `metadata[i]` always describe the same match;
/// chart tooltips resolve their content through that shared index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSeries {
    pub points: Vec<i32>,
    pub labels: Vec<String>,
    pub metadata: Vec<PointMetadata>,
}

impl PerformanceSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn final_score(&self) -> i32 {
        self.points.last().copied().unwrap_or(0)
    }
}

/// Builds the series from matches already sorted oldest first.
/// Each win adds one, each loss subtracts one, anything else leaves the score.
pub fn build(matches: &[Match]) -> PerformanceSeries {
    let mut series = PerformanceSeries {
        points: Vec::with_capacity(matches.len()),
        labels: Vec::with_capacity(matches.len()),
        metadata: Vec::with_capacity(matches.len()),
    };
    let mut score = 0;

    for (idx, game) in matches.iter().enumerate() {
        score += game.outcome.score_delta();
        series.points.push(score);
        series.labels.push(format!("#{}", idx + 1));
        series.metadata.push(PointMetadata {
            opponent_name: game.opponent_name.clone(),
            outcome: game.outcome,
            created_at: game.created_at,
        });
    }

    series
}
