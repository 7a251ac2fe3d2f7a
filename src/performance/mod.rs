pub mod series;
pub mod stats;
pub mod tooltip;

pub use series::{build, PerformanceSeries, PointMetadata};
pub use stats::MatchStatistics;
pub use tooltip::{tooltip, Tooltip};
