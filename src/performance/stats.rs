use serde::Serialize;

use crate::domain::Match;
use crate::scoring::MatchOutcome;

/// Totals and percentage rates over a user's matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchStatistics {
    pub total: u32,
    pub victories: u32,
    pub defeats: u32,
    pub victory_rate: u32,
    pub defeat_rate: u32,
}

impl MatchStatistics {
    pub fn from_matches(matches: &[Match]) -> Self {
        let total = matches.len() as u32;
        let victories = count(matches, MatchOutcome::Win);
        let defeats = count(matches, MatchOutcome::Loss);

        Self {
            total,
            victories,
            defeats,
            victory_rate: percentage(victories, total),
            defeat_rate: percentage(defeats, total),
        }
    }
}

fn count(matches: &[Match], outcome: MatchOutcome) -> u32 {
    matches.iter().filter(|m| m.outcome == outcome).count() as u32
}

fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(total) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn game(outcome: MatchOutcome) -> Match {
        Match {
            id: 1,
            user_id: 1,
            user_name: "Ana".to_string(),
            opponent_name: "Bia".to_string(),
            sets: Vec::new(),
            outcome,
            is_finished: outcome.is_decided(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_matches() {
        assert_eq!(MatchStatistics::from_matches(&[]), MatchStatistics::default());
    }

    #[test]
    fn test_rates_are_rounded() {
        let matches = vec![
            game(MatchOutcome::Win),
            game(MatchOutcome::Win),
            game(MatchOutcome::Loss),
        ];
        let stats = MatchStatistics::from_matches(&matches);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.victories, 2);
        assert_eq!(stats.defeats, 1);
        assert_eq!(stats.victory_rate, 67);
        assert_eq!(stats.defeat_rate, 33);
    }

    #[test]
    fn test_pending_counts_towards_total_only() {
        let matches = vec![game(MatchOutcome::Win), game(MatchOutcome::Pending)];
        let stats = MatchStatistics::from_matches(&matches);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.victory_rate, 50);
        assert_eq!(stats.defeat_rate, 0);
    }

    #[test]
    fn test_half_rounds_up() {
        let mut matches = vec![game(MatchOutcome::Win)];
        matches.extend((0..7).map(|_| game(MatchOutcome::Loss)));
        let stats = MatchStatistics::from_matches(&matches);
        // 1/8 = 12.5%
        assert_eq!(stats.victory_rate, 13);
        assert_eq!(stats.defeat_rate, 88);
    }
}
