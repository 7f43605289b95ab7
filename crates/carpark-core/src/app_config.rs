use std::path::PathBuf;

pub const DEFAULT_ENDPOINT: &str =
    "https://at.govt.nz/umbraco/Surface/ParkingAvailabilitySurface/ParkingAvailabilityResult";
pub const DEFAULT_CARPARK_IDS: [&str; 3] = ["civic", "downtown", "victoria st"];
pub const DEFAULT_CATEGORY: &str = "short-term";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; CarparkAnalytics/1.0)";
pub const DEFAULT_REFERER: &str = "https://at.govt.nz/parking/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub endpoint: String,
    pub carpark_ids: Vec<String>,
    pub category: String,
    pub data_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
    pub log_level: String,
}

impl AppConfig {
    /// Snapshot of the most recent run, overwritten every time.
    #[must_use]
    pub fn latest_path(&self) -> PathBuf {
        self.data_dir.join("latest.csv")
    }

    /// Cumulative record of every run.
    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.csv")
    }

    /// Optional `carpark,total_spaces` table used for occupancy.
    #[must_use]
    pub fn capacity_path(&self) -> PathBuf {
        self.data_dir.join("capacity_lookup.csv")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            carpark_ids: DEFAULT_CARPARK_IDS.iter().map(ToString::to_string).collect(),
            category: DEFAULT_CATEGORY.to_string(),
            data_dir: PathBuf::from("./data"),
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            log_level: "info".to_string(),
        }
    }
}
