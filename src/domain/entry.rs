use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use validator::Validate;

use super::models::{CurrentUser, NewMatch};
use crate::errors::TrackerError;
use crate::scoring::{analyze, MatchAnalysis, SetScore};

/// Raw score entry as submitted by the user.
///
/// The third set is only read when the first two sets end one apiece; when
/// it is needed but missing it counts as 0-0.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MatchEntryForm {
    #[validate(length(min = 2, message = "Opponent name must have at least 2 characters"))]
    pub opponent_name: String,
    #[validate(nested)]
    pub first_set: SetScore,
    #[validate(nested)]
    pub second_set: SetScore,
    #[serde(default)]
    #[validate(nested)]
    pub third_set: Option<SetScore>,
}

/// Sets and analysis of an entry that produced a decided match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredEntry {
    pub opponent_name: String,
    pub sets: Vec<SetScore>,
    pub analysis: MatchAnalysis,
}

impl ScoredEntry {
    pub fn into_new_match(self, user: &CurrentUser, created_at: DateTime<Utc>) -> NewMatch {
        NewMatch {
            user_id: user.id,
            user_name: user.display_name(),
            opponent_name: self.opponent_name,
            sets: self.sets,
            outcome: self.analysis.outcome,
            is_finished: self.analysis.is_finished,
            created_at,
        }
    }
}

/// True when the first two sets leave the match level and a third is needed
pub fn needs_third_set(first: SetScore, second: SetScore) -> bool {
    analyze(&[first, second]).is_level_at_one()
}

/// Validates the form, collects the deciding set when required and rejects
/// scorelines that do not end with one side on two sets.
pub fn score_entry(form: &MatchEntryForm) -> Result<ScoredEntry, TrackerError> {
    let form = MatchEntryForm {
        opponent_name: form.opponent_name.trim().to_string(),
        ..form.clone()
    };
    form.validate()?;

    let mut sets = vec![form.first_set, form.second_set];
    if needs_third_set(form.first_set, form.second_set) {
        sets.push(form.third_set.unwrap_or_default());
    }

    let analysis = analyze(&sets);
    if !analysis.is_finished {
        warn!(
            "Rejected scoreline against {}: {} sets to {}",
            form.opponent_name, analysis.self_sets_won, analysis.opponent_sets_won
        );
        return Err(TrackerError::IncompleteScoreline);
    }

    Ok(ScoredEntry {
        opponent_name: form.opponent_name,
        sets,
        analysis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::MatchOutcome;

    fn form(opponent: &str, sets: &[(u32, u32)]) -> MatchEntryForm {
        let set = |i: usize| sets.get(i).map(|&(a, b)| SetScore::new(a, b));
        MatchEntryForm {
            opponent_name: opponent.to_string(),
            first_set: set(0).unwrap_or_default(),
            second_set: set(1).unwrap_or_default(),
            third_set: set(2),
        }
    }

    #[test]
    fn test_two_set_win_ignores_third_set() {
        let entry = score_entry(&form("Rafa", &[(6, 3), (6, 4), (0, 6)]))
            .unwrap();
        assert_eq!(entry.sets.len(), 2);
        assert_eq!(entry.analysis.outcome, MatchOutcome::Win);
    }

    #[test]
    fn test_level_match_collects_third_set() {
        let entry = score_entry(&form("Rafa", &[(6, 2), (3, 6), (7, 5)]))
            .unwrap();
        assert_eq!(entry.sets, vec![SetScore::new(6, 2), SetScore::new(3, 6), SetScore::new(7, 5)]);
        assert_eq!(entry.analysis.self_sets_won, 2);
        assert_eq!(entry.analysis.opponent_sets_won, 1);
        assert_eq!(entry.analysis.outcome, MatchOutcome::Win);
    }

    #[test]
    fn test_missing_third_set_is_incomplete() {
        let result = score_entry(&form("Rafa", &[(6, 2), (6, 7)]));
        assert_eq!(result, Err(TrackerError::IncompleteScoreline));
    }

    #[test]
    fn test_undecided_sets_are_incomplete() {
        let result = score_entry(&form("Rafa", &[(6, 5), (6, 2)]));
        assert_eq!(result, Err(TrackerError::IncompleteScoreline));
    }

    #[test]
    fn test_opponent_name_is_trimmed_and_checked() {
        let entry = score_entry(&form("  Novak ", &[(6, 0), (6, 0)]))
            .unwrap();
        assert_eq!(entry.opponent_name, "Novak");

        let result = score_entry(&form(" N ", &[(6, 0), (6, 0)]));
        assert_eq!(
            result,
            Err(TrackerError::InvalidInput(
                "opponent_name: Opponent name must have at least 2 characters".to_string()
            ))
        );
    }

    #[test]
    fn test_game_counts_above_limit_rejected() {
        let result = score_entry(&form("Rafa", &[(8, 6), (6, 0)]));
        assert!(matches!(
            result,
            Err(TrackerError::InvalidInput(ref message)) if message.contains("first_set")
        ));

        let result = score_entry(&form("Rafa", &[(6, 0), (6, 0), (9, 0)]));
        assert!(matches!(result, Err(TrackerError::InvalidInput(_))));
    }

    #[test]
    fn test_needs_third_set() {
        assert!(needs_third_set(SetScore::new(6, 2), SetScore::new(6, 7)));
        assert!(!needs_third_set(SetScore::new(6, 2), SetScore::new(7, 6)));
        assert!(!needs_third_set(SetScore::new(6, 6), SetScore::new(6, 2)));
    }

    #[test]
    fn test_into_new_match_carries_analysis_and_owner() {
        let entry = score_entry(&form("Rafa", &[(2, 6), (4, 6)]))
            .unwrap();
        let user = CurrentUser {
            id: 9,
            name: "Dora".to_string(),
            email: "dora@example.com".to_string(),
        };
        let created_at = Utc::now();
        let new_match = entry.into_new_match(&user, created_at);
        assert_eq!(new_match.user_id, 9);
        assert_eq!(new_match.user_name, "Dora");
        assert_eq!(new_match.outcome, MatchOutcome::Loss);
        assert!(new_match.is_finished);
        assert_eq!(new_match.created_at, created_at);
    }
}
