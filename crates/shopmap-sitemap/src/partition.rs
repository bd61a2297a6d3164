//! Splits the merged entry list into fixed-size sitemap files.
//!
//! Chunk `k` (1-based) holds entries `[(k-1) * chunk_size, k * chunk_size)`.
//! Chunks exist only when the list is larger than one chunk; a list that fits
//! is served as a single `urlset` and has no numbered chunks.

use std::num::NonZeroUsize;

use shopmap_core::UrlEntry;

/// One numbered sitemap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitemapPage<'a> {
    /// 1-based chunk number.
    pub index: usize,
    pub entries: &'a [UrlEntry],
}

/// Number of chunks needed for `total` entries.
#[must_use]
pub fn chunk_count(total: usize, chunk_size: NonZeroUsize) -> usize {
    total.div_ceil(chunk_size.get())
}

/// Returns chunk `page_index` of `entries`, or `None` if the index is out of
/// range or the list fits in a single sitemap.
#[must_use]
pub fn select_page(
    entries: &[UrlEntry],
    chunk_size: NonZeroUsize,
    page_index: usize,
) -> Option<SitemapPage<'_>> {
    let size = chunk_size.get();
    if entries.len() <= size {
        return None;
    }
    if page_index == 0 || page_index > chunk_count(entries.len(), chunk_size) {
        return None;
    }

    let start = (page_index - 1) * size;
    let end = entries.len().min(start + size);
    Some(SitemapPage {
        index: page_index,
        entries: &entries[start..end],
    })
}

/// Pointer URLs for an index document: `{base_url}/sitemap/{n}.xml`.
#[must_use]
pub fn index_urls(base_url: &str, total_chunks: usize) -> Vec<String> {
    let base = base_url.trim_end_matches('/');
    (1..=total_chunks)
        .map(|n| format!("{base}/sitemap/{n}.xml"))
        .collect()
}

/// Parses a `/sitemap/{file}` path segment (`"2.xml"`) into a 1-based index.
///
/// Returns `None` for anything other than a positive decimal integer
/// followed by `.xml`.
#[must_use]
pub fn parse_page_index(file: &str) -> Option<usize> {
    let digits = file.strip_suffix(".xml")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<usize>().ok().filter(|n| *n > 0)
}
