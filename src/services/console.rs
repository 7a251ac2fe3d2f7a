use colored::{ColoredString, Colorize};

use crate::domain::Match;
use crate::performance::{MatchStatistics, PerformanceSeries};
use crate::scoring::MatchOutcome;

fn paint_outcome(outcome: MatchOutcome) -> ColoredString {
    match outcome {
        MatchOutcome::Win => outcome.label().green().bold(),
        MatchOutcome::Loss => outcome.label().red().bold(),
        MatchOutcome::Pending => outcome.label().yellow(),
    }
}

pub fn format_match(game: &Match) -> String {
    let sets: Vec<String> = game.sets.iter().map(ToString::to_string).collect();
    format!(
        "{:>5}  {}  vs {:<20} {:<17} {}",
        game.id,
        game.created_at.format("%d/%m/%Y"),
        game.opponent_name,
        sets.join(" "),
        paint_outcome(game.outcome)
    )
}

pub fn format_statistics(stats: &MatchStatistics) -> String {
    format!(
        "Matches: {}\nVictories: {} ({}%)\nDefeats: {} ({}%)",
        stats.total,
        stats.victories.to_string().green(),
        stats.victory_rate,
        stats.defeats.to_string().red(),
        stats.defeat_rate
    )
}

/// One line per chart point: label, running score and the match behind it
pub fn format_series(series: &PerformanceSeries) -> Vec<String> {
    series
        .points
        .iter()
        .zip(&series.labels)
        .zip(&series.metadata)
        .map(|((point, label), meta)| {
            format!(
                "{:>4} {:>+4}  {} {} ({})",
                label,
                point,
                meta.created_at.format("%d/%m/%Y"),
                meta.opponent_name,
                paint_outcome(meta.outcome)
            )
        })
        .collect()
}
