#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "tennis_tracker.db".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub session_ttl_hours: i64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_ttl_hours: 24 * 7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub y_min: i32,
    pub y_max: i32,
    pub dataset_label: &'static str,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            y_min: -10,
            y_max: 10,
            dataset_label: "Cumulative performance",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub default_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { default_port: 3000 }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    pub chart: ChartSettings,
    pub server: ServerSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            database: DatabaseSettings::default(),
            auth: AuthSettings::default(),
            chart: ChartSettings::default(),
            server: ServerSettings::default(),
        }
    }
}
