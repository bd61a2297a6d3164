//! Storefront GraphQL response types for the sitemap queries.
//!
//! Every query returns the same connection shape:
//!
//! ```text
//! { "data": { "<resource>": { "nodes": [...], "pageInfo": { "hasNextPage", "endCursor" } } },
//!   "errors": [ { "message": "..." } ] }
//! ```
//!
//! `errors` is absent on success. `endCursor` is `null` on an empty page.
//! `onlineStoreUrl` is `null` for items not published to the online store;
//! that is the visibility flag used to filter sitemap entries.

use std::collections::HashMap;

use serde::Deserialize;

/// Top-level GraphQL envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` payload keyed by connection field (`products`, `collections`, `pages`).
pub type ConnectionData = HashMap<String, Connection>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default)]
    pub nodes: Vec<SitemapNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// A product, collection, or page node.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapNode {
    /// ISO-8601 timestamp, passed through to `<lastmod>` unchanged.
    pub updated_at: String,

    /// URL slug (e.g. `"blood-orange-cardamom"`).
    pub handle: String,

    /// Storefront URL; `None` when the item is not visible online.
    #[serde(default)]
    pub online_store_url: Option<String>,

    /// Products only.
    #[serde(default)]
    pub title: Option<String>,

    /// Products only.
    #[serde(default)]
    pub featured_image: Option<FeaturedImage>,
}

impl SitemapNode {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.online_store_url.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedImage {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}
