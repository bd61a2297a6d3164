//! Per-request sitemap limits and data-source cache policy.
//!
//! Two ceilings bound the output: the data source returns at most
//! [`GRAPHQL_MAX_ENTRIES`] nodes per call, and a single sitemap file may list
//! at most [`MAX_URLS`] URLs. The chunk size used to split output files can
//! be lowered (or raised) with `SITEMAP_URL_CHUNK_SIZE`; the fetch page size
//! never exceeds the protocol ceiling.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Maximum number of nodes the storefront API returns per paginated call.
pub const GRAPHQL_MAX_ENTRIES: usize = 250;

/// Maximum number of URLs allowed in a single sitemap file.
pub const MAX_URLS: usize = 50_000;

/// Default cap on the number of sitemap files one request may produce.
pub const SITEMAPS_LIMIT: usize = 300;

const DEFAULT_CHUNK_SIZE: NonZeroUsize = non_zero(MAX_URLS);
const FETCH_CEILING: NonZeroUsize = non_zero(GRAPHQL_MAX_ENTRIES);

const fn non_zero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("limit constants are non-zero"),
    }
}

/// Resolved, immutable limits for one sitemap generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSettings {
    /// Maximum URL entries per output sitemap file.
    pub chunk_size: NonZeroUsize,
    /// Nodes requested per data-source call.
    pub page_size: NonZeroUsize,
    /// Maximum number of sitemap files.
    pub sitemaps_limit: usize,
    pub cache: CachePolicy,
}

impl SitemapSettings {
    /// Builds settings from the loaded [`AppConfig`].
    ///
    /// A non-numeric chunk-size override is logged and ignored. Invalid cache
    /// JSON is logged and the default policy is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChunkSize`] if the override is `0`.
    pub fn resolve(config: &AppConfig) -> Result<Self, ConfigError> {
        let chunk_size = resolve_chunk_size(config.chunk_size_override.as_deref())?;
        Ok(Self::new(
            chunk_size,
            config.sitemaps_limit,
            CachePolicy::resolve(config.cache_settings_json.as_deref()),
        ))
    }

    #[must_use]
    pub fn new(chunk_size: NonZeroUsize, sitemaps_limit: usize, cache: CachePolicy) -> Self {
        Self {
            chunk_size,
            page_size: chunk_size.min(FETCH_CEILING),
            sitemaps_limit,
            cache,
        }
    }

    /// Upper bound on entries fetched for one resource type.
    #[must_use]
    pub fn entry_cap(&self) -> usize {
        self.sitemaps_limit.saturating_mul(self.chunk_size.get())
    }
}

impl Default for SitemapSettings {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, SITEMAPS_LIMIT, CachePolicy::default())
    }
}

/// Resolves the output chunk size from an optional raw override.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidChunkSize`] when the override parses to `0`.
pub fn resolve_chunk_size(raw: Option<&str>) -> Result<NonZeroUsize, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(DEFAULT_CHUNK_SIZE);
    };

    match raw.parse::<usize>() {
        Ok(n) => NonZeroUsize::new(n).ok_or_else(|| ConfigError::InvalidChunkSize(raw.to_owned())),
        Err(e) => {
            tracing::error!(
                value = raw,
                error = %e,
                "SITEMAP_URL_CHUNK_SIZE is not a valid integer; using default of {MAX_URLS}"
            );
            Ok(DEFAULT_CHUNK_SIZE)
        }
    }
}

/// Cache policy forwarded to the data source with every query.
///
/// Parsed from `SITEMAP_GRAPHQL_CACHE_SETTINGS_JSON`, e.g.
/// `{"mode":"public","maxAge":60,"staleWhileRevalidate":600}`. Missing keys
/// take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CachePolicy {
    pub mode: String,
    pub max_age: u64,
    pub stale_while_revalidate: u64,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            mode: "public".to_string(),
            max_age: 1,
            stale_while_revalidate: 300,
        }
    }
}

impl CachePolicy {
    /// Parses a JSON override, falling back to the default on any error.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        serde_json::from_str(raw).unwrap_or_else(|e| {
            tracing::error!(
                error = %e,
                "SITEMAP_GRAPHQL_CACHE_SETTINGS_JSON is not valid cache settings; using default"
            );
            Self::default()
        })
    }

    /// Renders the policy as a `Cache-Control` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!(
            "{}, max-age={}, stale-while-revalidate={}",
            self.mode, self.max_age, self.stale_while_revalidate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).expect("non-zero")
    }

    #[test]
    fn default_settings_use_platform_and_protocol_limits() {
        let settings = SitemapSettings::default();
        assert_eq!(settings.chunk_size.get(), 50_000);
        assert_eq!(settings.page_size.get(), 250);
        assert_eq!(settings.entry_cap(), 300 * 50_000);
    }

    #[test]
    fn missing_override_uses_max_urls() {
        assert_eq!(resolve_chunk_size(None).unwrap().get(), MAX_URLS);
        assert_eq!(resolve_chunk_size(Some("  ")).unwrap().get(), MAX_URLS);
    }

    #[test]
    fn numeric_override_replaces_output_limit() {
        assert_eq!(resolve_chunk_size(Some("1000")).unwrap().get(), 1000);
        assert_eq!(resolve_chunk_size(Some(" 75 ")).unwrap().get(), 75);
    }

    #[test]
    fn non_numeric_override_falls_back_to_default() {
        assert_eq!(resolve_chunk_size(Some("lots")).unwrap().get(), MAX_URLS);
        assert_eq!(resolve_chunk_size(Some("-5")).unwrap().get(), MAX_URLS);
    }

    #[test]
    fn zero_override_is_a_configuration_error() {
        let err = resolve_chunk_size(Some("0")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidChunkSize(ref v) if v == "0"));
    }

    #[test]
    fn page_size_stays_under_protocol_ceiling() {
        let large = SitemapSettings::new(nz(80_000), 300, CachePolicy::default());
        assert_eq!(large.page_size.get(), 250);

        let small = SitemapSettings::new(nz(40), 300, CachePolicy::default());
        assert_eq!(small.page_size.get(), 40);
        assert_eq!(small.chunk_size.get(), 40);
    }

    #[test]
    fn entry_cap_saturates() {
        let settings = SitemapSettings::new(nz(usize::MAX), 300, CachePolicy::default());
        assert_eq!(settings.entry_cap(), usize::MAX);
    }

    #[test]
    fn cache_policy_parses_camel_case_json() {
        let policy = CachePolicy::resolve(Some(
            r#"{"mode":"private","maxAge":60,"staleWhileRevalidate":600}"#,
        ));
        assert_eq!(policy.mode, "private");
        assert_eq!(policy.max_age, 60);
        assert_eq!(policy.stale_while_revalidate, 600);
    }

    #[test]
    fn cache_policy_fills_missing_keys_from_default() {
        let policy = CachePolicy::resolve(Some(r#"{"maxAge":120}"#));
        assert_eq!(policy.mode, "public");
        assert_eq!(policy.max_age, 120);
        assert_eq!(policy.stale_while_revalidate, 300);
    }

    #[test]
    fn invalid_cache_json_falls_back_to_default() {
        assert_eq!(CachePolicy::resolve(Some("{nope")), CachePolicy::default());
    }

    #[test]
    fn cache_policy_header_value() {
        assert_eq!(
            CachePolicy::default().header_value(),
            "public, max-age=1, stale-while-revalidate=300"
        );
    }
}
