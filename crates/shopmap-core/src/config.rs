use crate::app_config::{AppConfig, Environment};
use crate::settings::SITEMAPS_LIMIT;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_positive_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        match raw.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            }),
            Ok(n) => Ok(n),
            Err(e) => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        }
    };

    let storefront_endpoint = require("SHOPMAP_STOREFRONT_ENDPOINT")?;
    let storefront_token = optional("SHOPMAP_STOREFRONT_TOKEN");
    let language = or_default("SHOPMAP_LANGUAGE", "EN");

    let env = parse_environment(&or_default("SHOPMAP_ENV", "development"));

    let bind_addr = parse_addr("SHOPMAP_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPMAP_LOG_LEVEL", "info");
    let public_base_url = optional("SHOPMAP_PUBLIC_BASE_URL")
        .map(|raw| parse_base_url("SHOPMAP_PUBLIC_BASE_URL", &raw))
        .transpose()?;

    let request_timeout_secs = parse_u64("SHOPMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let sitemaps_limit =
        parse_positive_usize("SHOPMAP_SITEMAPS_LIMIT", &SITEMAPS_LIMIT.to_string())?;

    let chunk_size_override = optional("SITEMAP_URL_CHUNK_SIZE");
    let cache_settings_json = optional("SITEMAP_GRAPHQL_CACHE_SETTINGS_JSON");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        storefront_endpoint,
        storefront_token,
        language,
        public_base_url,
        request_timeout_secs,
        sitemaps_limit,
        chunk_size_override,
        cache_settings_json,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

/// Absolute `http(s)` URL with a host, normalized and without a trailing slash.
fn parse_base_url(var: &str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };
    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme \"{}\"", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}
