//! The seam between the pagination loop and the transport.

use std::future::Future;

use shopmap_core::{CachePolicy, ResourceType};

use crate::error::StorefrontError;
use crate::types::{PageInfo, SitemapNode};

/// Variables for one paginated query.
#[derive(Debug, Clone, Copy)]
pub struct PageRequest<'a> {
    pub page_size: usize,
    pub language: &'a str,
    /// `endCursor` of the previous page; `None` requests the first page.
    pub cursor: Option<&'a str>,
    pub cache: &'a CachePolicy,
}

/// One page of nodes plus the server-reported continuation.
#[derive(Debug, Default)]
pub struct ResourcePage {
    pub nodes: Vec<SitemapNode>,
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

impl ResourcePage {
    #[must_use]
    pub fn new(nodes: Vec<SitemapNode>, page_info: PageInfo) -> Self {
        Self {
            nodes,
            has_next_page: page_info.has_next_page,
            end_cursor: page_info.end_cursor,
        }
    }
}

/// A paginated source of sitemap nodes.
///
/// Implemented by [`crate::StorefrontClient`]; tests substitute scripted sources.
pub trait PageSource {
    fn fetch_page(
        &self,
        resource: ResourceType,
        request: PageRequest<'_>,
    ) -> impl Future<Output = Result<ResourcePage, StorefrontError>> + Send;
}
