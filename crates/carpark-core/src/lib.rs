pub mod app_config;
pub mod config;
pub mod enrich;
pub mod names;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use enrich::{enrich, occupancy};
pub use names::{normalize_key, CanonicalName, CarparkNames, NameTables};
pub use types::{CapacityTable, EnrichedRecord, RawRecord, RUN_TIMESTAMP_FORMAT};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
