use serde::{Deserialize, Serialize};

pub use crate::auth::RegisterRequest;
use crate::config::settings::ChartSettings;
use crate::domain::CurrentUser;
use crate::performance::{PerformanceSeries, PointMetadata};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: CurrentUser,
    pub display_name: String,
}

/// Series plus the axis bounds and label the chart is drawn with
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResponse {
    pub points: Vec<i32>,
    pub labels: Vec<String>,
    pub metadata: Vec<PointMetadata>,
    pub y_min: i32,
    pub y_max: i32,
    pub dataset_label: String,
}

impl ChartResponse {
    pub fn new(series: PerformanceSeries, settings: &ChartSettings) -> Self {
        Self {
            points: series.points,
            labels: series.labels,
            metadata: series.metadata,
            y_min: settings.y_min,
            y_max: settings.y_max,
            dataset_label: settings.dataset_label.to_string(),
        }
    }
}
