//! Storefront GraphQL documents used to enumerate sitemap resources.
//!
//! Each query takes `$urlLimits` (page size), `$language`, and `$cursor`
//! (the `endCursor` of the previous page, `null` for the first page) and
//! filters server-side to items visible on the online store.

use shopmap_core::ResourceType;

pub const SITEMAP_PRODUCT_QUERY: &str = r#"#graphql
query SitemapProducts(
  $urlLimits: Int
  $language: LanguageCode
  $cursor: String
)
@inContext(language: $language) {
  products(
    first: $urlLimits
    after: $cursor
    query: "published_status:'online_store:visible'"
  ) {
    nodes {
      updatedAt
      handle
      onlineStoreUrl
      title
      featuredImage {
        url
        altText
      }
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

pub const SITEMAP_COLLECTION_QUERY: &str = r#"#graphql
query SitemapCollections(
  $urlLimits: Int
  $language: LanguageCode
  $cursor: String
)
@inContext(language: $language) {
  collections(
    first: $urlLimits
    after: $cursor
    query: "published_status:'online_store:visible'"
  ) {
    nodes {
      updatedAt
      handle
      onlineStoreUrl
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

pub const SITEMAP_PAGE_QUERY: &str = r#"#graphql
query SitemapPages(
  $urlLimits: Int
  $language: LanguageCode
  $cursor: String
)
@inContext(language: $language) {
  pages(
    first: $urlLimits
    after: $cursor
    query: "published_status:'published'"
  ) {
    nodes {
      updatedAt
      handle
      onlineStoreUrl
    }
    pageInfo {
      hasNextPage
      endCursor
    }
  }
}
"#;

/// Returns the query document for a resource type.
#[must_use]
pub fn query_for(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => SITEMAP_PRODUCT_QUERY,
        ResourceType::Collections => SITEMAP_COLLECTION_QUERY,
        ResourceType::Pages => SITEMAP_PAGE_QUERY,
    }
}

/// Returns the GraphQL operation name declared in [`query_for`]'s document.
#[must_use]
pub fn operation_name(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "SitemapProducts",
        ResourceType::Collections => "SitemapCollections",
        ResourceType::Pages => "SitemapPages",
    }
}
