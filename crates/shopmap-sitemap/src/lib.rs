pub mod error;
pub mod partition;
pub mod render;

use std::num::NonZeroUsize;

pub use error::RenderError;
pub use partition::{chunk_count, index_urls, parse_page_index, select_page, SitemapPage};
pub use render::{render_index, render_urlset};

/// Which document `/sitemap.xml` serves for a merged entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapPlan {
    /// Everything fits in one `urlset`.
    Single,
    /// A `sitemapindex` pointing at these chunk URLs.
    Index(Vec<String>),
}

/// Chooses between a single `urlset` and an index of chunks.
#[must_use]
pub fn plan(total_entries: usize, chunk_size: NonZeroUsize, base_url: &str) -> SitemapPlan {
    if total_entries > chunk_size.get() {
        SitemapPlan::Index(index_urls(base_url, chunk_count(total_entries, chunk_size)))
    } else {
        SitemapPlan::Single
    }
}
