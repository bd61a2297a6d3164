pub mod app_config;
pub mod config;
pub mod escape;
pub mod settings;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use escape::xml_escape;
pub use settings::{CachePolicy, SitemapSettings, GRAPHQL_MAX_ENTRIES, MAX_URLS, SITEMAPS_LIMIT};
pub use types::{ChangeFreq, ImageEntry, ResourceType, UrlEntry};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("sitemap chunk size must be a positive integer, got \"{0}\"")]
    InvalidChunkSize(String),
}
