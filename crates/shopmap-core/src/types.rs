//! Domain types shared by the fetch, partition, and render stages.

use std::fmt;

/// One of the three catalog collections that appear in the sitemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Products,
    Collections,
    Pages,
}

impl ResourceType {
    /// Merge order of the per-type lists in the final sitemap.
    pub const ALL: [ResourceType; 3] = [
        ResourceType::Products,
        ResourceType::Collections,
        ResourceType::Pages,
    ];

    /// GraphQL connection field name, which doubles as the storefront URL
    /// path segment (`/products/{handle}`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Products => "products",
            ResourceType::Collections => "collections",
            ResourceType::Pages => "pages",
        }
    }

    #[must_use]
    pub fn change_freq(self) -> ChangeFreq {
        match self {
            ResourceType::Products | ResourceType::Collections => ChangeFreq::Daily,
            ResourceType::Pages => ChangeFreq::Weekly,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sitemap `<changefreq>` hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
        }
    }
}

/// A single `<url>` block. Text fields are already markup-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    pub url: String,
    pub last_mod: String,
    pub change_freq: ChangeFreq,
    pub image: Option<ImageEntry>,
}

/// Google image-sitemap extension block attached to product entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub url: String,
    pub title: Option<String>,
    pub caption: Option<String>,
}
