use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-level configuration read from the environment at startup.
///
/// The two sitemap overrides are kept raw here; they are interpreted by
/// [`crate::SitemapSettings::resolve`], which logs and defaults bad values
/// instead of failing startup.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub storefront_endpoint: String,
    pub storefront_token: Option<String>,
    pub language: String,
    pub public_base_url: Option<String>,
    pub request_timeout_secs: u64,
    pub sitemaps_limit: usize,
    pub chunk_size_override: Option<String>,
    pub cache_settings_json: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("storefront_endpoint", &self.storefront_endpoint)
            .field(
                "storefront_token",
                &self.storefront_token.as_ref().map(|_| "[redacted]"),
            )
            .field("language", &self.language)
            .field("public_base_url", &self.public_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("sitemaps_limit", &self.sitemaps_limit)
            .field("chunk_size_override", &self.chunk_size_override)
            .field("cache_settings_json", &self.cache_settings_json)
            .finish()
    }
}
