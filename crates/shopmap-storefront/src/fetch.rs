//! Cursor-paginated fetch loops that turn storefront connections into
//! sitemap entries.

use shopmap_core::{ResourceType, SitemapSettings, UrlEntry};

use crate::normalize::build_entry;
use crate::pagination::PaginationCursor;
use crate::source::{PageRequest, PageSource};

/// Everything a fetch needs besides the source and the cursor.
#[derive(Debug, Clone, Copy)]
pub struct FetchContext<'a> {
    pub settings: &'a SitemapSettings,
    pub language: &'a str,
    /// Origin used to build absolute entry URLs.
    pub base_url: &'a str,
}

/// Why a fetch loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStop {
    /// The source reported no further pages.
    Exhausted,
    /// The entry limit was reached; entries are truncated to it.
    LimitReached,
    /// A page request failed; entries hold everything fetched before it.
    QueryFailed,
}

#[derive(Debug)]
pub struct FetchOutcome {
    pub resource: ResourceType,
    pub entries: Vec<UrlEntry>,
    pub pages: usize,
    pub stop: FetchStop,
}

/// Fetches `cursor`'s resource page by page until the source is exhausted,
/// a query fails, or `limit` entries (or scanned nodes) are reached.
///
/// Never fails: a query error is logged and the entries gathered so far are
/// returned. The returned list holds at most `limit` entries in source order.
/// The cursor is reset to the start on return.
pub async fn fetch_by_type<S: PageSource>(
    source: &S,
    cursor: &mut PaginationCursor,
    ctx: &FetchContext<'_>,
    limit: usize,
) -> FetchOutcome {
    let resource = cursor.resource();
    let mut entries: Vec<UrlEntry> = Vec::new();
    let mut scanned = 0usize;
    let mut pages = 0usize;

    let stop = loop {
        if entries.len() >= limit || scanned >= limit {
            tracing::info!(%resource, limit, "reached limit of sitemap files");
            break FetchStop::LimitReached;
        }

        let request = PageRequest {
            page_size: ctx.settings.page_size.get(),
            language: ctx.language,
            cursor: cursor.token(),
            cache: &ctx.settings.cache,
        };

        let page = match source.fetch_page(resource, request).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(%resource, pages, error = %e, "sitemap query failed; keeping partial results");
                break FetchStop::QueryFailed;
            }
        };
        pages += 1;

        if page.nodes.is_empty() {
            break FetchStop::Exhausted;
        }

        scanned += page.nodes.len();
        entries.extend(
            page.nodes
                .iter()
                .filter_map(|node| build_entry(node, resource, ctx.base_url)),
        );

        if entries.len() > limit {
            entries.truncate(limit);
            tracing::info!(%resource, limit, "reached limit of sitemap files");
            break FetchStop::LimitReached;
        }

        if !page.has_next_page {
            break FetchStop::Exhausted;
        }

        match page.end_cursor {
            Some(token) if cursor.token() != Some(token.as_str()) => cursor.advance(token),
            _ => {
                tracing::warn!(
                    %resource,
                    pages,
                    "source reported another page without a new end cursor; stopping"
                );
                break FetchStop::Exhausted;
            }
        }
    };

    cursor.reset();

    tracing::debug!(%resource, pages, entries = entries.len(), ?stop, "sitemap fetch finished");

    FetchOutcome {
        resource,
        entries,
        pages,
        stop,
    }
}

/// [`fetch_by_type`] bounded by the configured safety cap
/// (`sitemaps_limit * chunk_size`).
pub async fn fetch_all<S: PageSource>(
    source: &S,
    cursor: &mut PaginationCursor,
    ctx: &FetchContext<'_>,
) -> FetchOutcome {
    fetch_by_type(source, cursor, ctx, ctx.settings.entry_cap()).await
}

/// Fetches products, collections, and pages concurrently and merges them in
/// that order.
///
/// Each resource type gets its own request-owned cursor. A failure in one
/// type does not affect the others.
pub async fn generate_sitemap_urls<S: PageSource>(
    source: &S,
    ctx: &FetchContext<'_>,
) -> Vec<UrlEntry> {
    let [mut products, mut collections, mut pages] = ResourceType::ALL.map(PaginationCursor::start);

    let (products, collections, pages) = tokio::join!(
        fetch_all(source, &mut products, ctx),
        fetch_all(source, &mut collections, ctx),
        fetch_all(source, &mut pages, ctx),
    );

    let mut merged =
        Vec::with_capacity(products.entries.len() + collections.entries.len() + pages.entries.len());
    for outcome in [products, collections, pages] {
        tracing::info!(
            resource = %outcome.resource,
            pages = outcome.pages,
            entries = outcome.entries.len(),
            stop = ?outcome.stop,
            "fetched sitemap resources"
        );
        merged.extend(outcome.entries);
    }
    merged
}
