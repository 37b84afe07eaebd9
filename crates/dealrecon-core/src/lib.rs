pub mod app_config;
pub mod config;
pub mod records;
pub mod report;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use records::{
    backend_date_as_naive, normalize_backend_date, ActivityRecord, BackendDate, CrazyDealRecord,
    PromotionRecord, MISSING,
};
pub use report::{ReportRow, REPORT_HEADER};

/// Errors raised while building [`AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
