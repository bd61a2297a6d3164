pub mod client;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pagination;
pub mod queries;
pub mod source;
pub mod types;

pub use client::StorefrontClient;
pub use error::StorefrontError;
pub use fetch::{fetch_all, fetch_by_type, generate_sitemap_urls, FetchContext, FetchOutcome, FetchStop};
pub use normalize::build_entry;
pub use pagination::PaginationCursor;
pub use source::{PageRequest, PageSource, ResourcePage};
pub use types::{FeaturedImage, SitemapNode};
