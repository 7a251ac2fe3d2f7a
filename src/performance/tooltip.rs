use serde::Serialize;

use super::series::PerformanceSeries;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tooltip {
    pub title: String,
    pub lines: Vec<String>,
}

/// Tooltip for the chart point at `index`, or `None` when the index has no
/// metadata (for example while a fresh series is still loading).
pub fn tooltip(series: &PerformanceSeries, index: usize) -> Option<Tooltip> {
    let meta = series.metadata.get(index)?;

    Some(Tooltip {
        title: format!("Match #{}", index + 1),
        lines: vec![
            format!("Opponent: {}", meta.opponent_name),
            format!("Result: {}", meta.outcome),
            format!("Date: {}", meta.created_at.format("%d/%m/%Y")),
        ],
    })
}
