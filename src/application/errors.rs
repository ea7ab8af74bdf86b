use std::path::PathBuf;

use thiserror::Error;

use crate::core::ports::FeedError;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("invalid setting {field}: {reason}")]
    InvalidSetting { field: &'static str, reason: String },

    #[error("invalid seed feed: {0}")]
    Seed(#[from] FeedError),
}
