use serde::Serialize;
use tokio::sync::watch;

use crate::domain::filter::{sort_newest_first, sort_oldest_first};
use crate::domain::{available_years, HistoryFilter, Match};
use crate::performance::{self, MatchStatistics, PerformanceSeries};

/// Everything the home view shows, derived from one complete match list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_name: String,
    pub statistics: MatchStatistics,
    pub series: PerformanceSeries,
    pub available_years: Vec<i32>,
    pub history: Vec<Match>,
}

impl Dashboard {
    pub fn build(user_name: &str, matches: &[Match], filter: &HistoryFilter) -> Self {
        let mut chronological = matches.to_vec();
        sort_oldest_first(&mut chronological);

        let mut history = filter.apply(matches);
        sort_newest_first(&mut history);

        Self {
            user_name: user_name.to_string(),
            statistics: MatchStatistics::from_matches(matches),
            series: performance::build(&chronological),
            available_years: available_years(matches),
            history,
        }
    }
}

/// Dashboard that is rebuilt in full every time the match feed changes
pub struct LiveDashboard {
    user_name: String,
    filter: HistoryFilter,
    receiver: watch::Receiver<Vec<Match>>,
}

impl LiveDashboard {
    pub fn new(user_name: String, filter: HistoryFilter, receiver: watch::Receiver<Vec<Match>>) -> Self {
        Self {
            user_name,
            filter,
            receiver,
        }
    }

    pub fn current(&mut self) -> Dashboard {
        let matches = self.receiver.borrow_and_update();
        Dashboard::build(&self.user_name, &matches, &self.filter)
    }

    /// Waits for the next change; `None` once the feed has gone away
    pub async fn next(&mut self) -> Option<Dashboard> {
        self.receiver.changed().await.ok()?;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ResultFilter;
    use crate::scoring::MatchOutcome;
    use chrono::{TimeZone, Utc};

    fn game(id: i64, outcome: MatchOutcome, year: i32, day: u32) -> Match {
        Match {
            id,
            user_id: 1,
            user_name: "Ana".to_string(),
            opponent_name: format!("Opponent {}", id),
            sets: Vec::new(),
            outcome,
            is_finished: true,
            created_at: Utc.with_ymd_and_hms(year, 6, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_chart_is_chronological_and_history_newest_first() {
        let matches = vec![
            game(3, MatchOutcome::Loss, 2024, 20),
            game(1, MatchOutcome::Win, 2023, 1),
            game(2, MatchOutcome::Win, 2024, 2),
        ];
        let dashboard = Dashboard::build("Ana", &matches, &HistoryFilter::default());

        assert_eq!(dashboard.series.points, vec![1, 2, 1]);
        assert_eq!(dashboard.series.metadata[0].opponent_name, "Opponent 1");
        let history: Vec<i64> = dashboard.history.iter().map(|m| m.id).collect();
        assert_eq!(history, vec![3, 2, 1]);
        assert_eq!(dashboard.available_years, vec![2024, 2023]);
        assert_eq!(dashboard.statistics.total, 3);
    }

    #[test]
    fn test_filter_only_affects_history() {
        let matches = vec![
            game(1, MatchOutcome::Win, 2024, 1),
            game(2, MatchOutcome::Loss, 2024, 2),
        ];
        let filter = HistoryFilter {
            result: ResultFilter::Loss,
            ..Default::default()
        };
        let dashboard = Dashboard::build("Ana", &matches, &filter);

        assert_eq!(dashboard.history.len(), 1);
        assert_eq!(dashboard.series.len(), 2);
        assert_eq!(dashboard.statistics.total, 2);
    }

    #[tokio::test]
    async fn test_live_dashboard_rebuilds_on_change() {
        let (tx, rx) = watch::channel(vec![game(1, MatchOutcome::Win, 2024, 1)]);
        let mut live = LiveDashboard::new("Ana".to_string(), HistoryFilter::default(), rx);
        assert_eq!(live.current().series.points, vec![1]);

        tx.send_replace(vec![
            game(1, MatchOutcome::Win, 2024, 1),
            game(2, MatchOutcome::Loss, 2024, 2),
            game(3, MatchOutcome::Loss, 2024, 3),
        ]);
        let next = live.next().await.unwrap();
        assert_eq!(next.series.points, vec![1, 0, -1]);

        drop(tx);
        assert!(live.next().await.is_none());
    }
}
