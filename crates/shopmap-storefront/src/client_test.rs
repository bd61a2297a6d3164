use shopmap_core::CachePolicy;

use super::*;

#[test]
fn new_rejects_relative_endpoint() {
    let result = StorefrontClient::new("/api/graphql.json", None, 5);
    assert!(
        matches!(result, Err(StorefrontError::InvalidEndpoint { .. })),
        "expected InvalidEndpoint"
    );
}

#[test]
fn request_body_carries_query_and_variables() {
    let cache = CachePolicy::default();
    let request = PageRequest {
        page_size: 250,
        language: "EN",
        cursor: Some("abc"),
        cache: &cache,
    };
    let body = serde_json::to_value(build_request_body(ResourceType::Pages, &request))
        .expect("serializable");

    assert_eq!(body["operationName"], "SitemapPages");
    assert_eq!(body["variables"]["urlLimits"], 250);
    assert_eq!(body["variables"]["language"], "EN");
    assert_eq!(body["variables"]["cursor"], "abc");
    assert!(body["query"].as_str().unwrap().contains("pages("));
}

#[test]
fn first_page_sends_null_cursor() {
    let cache = CachePolicy::default();
    let request = PageRequest {
        page_size: 10,
        language: "FR",
        cursor: None,
        cache: &cache,
    };
    let body = serde_json::to_value(build_request_body(ResourceType::Products, &request))
        .expect("serializable");
    assert!(body["variables"]["cursor"].is_null());
}

#[test]
fn parse_page_extracts_nodes_and_page_info() {
    let body = r#"{"data":{"collections":{"nodes":[
        {"updatedAt":"2024-01-01T00:00:00Z","handle":"all","onlineStoreUrl":"https://s/collections/all"}
    ],"pageInfo":{"hasNextPage":false,"endCursor":"c1"}}}}"#;
    let page = parse_page(ResourceType::Collections, body).expect("valid page");
    assert_eq!(page.nodes.len(), 1);
    assert!(!page.has_next_page);
    assert_eq!(page.end_cursor.as_deref(), Some("c1"));
}

#[test]
fn parse_page_surfaces_error_list() {
    let body = r#"{"errors":[{"message":"Throttled"},{"message":"Try later"}]}"#;
    let err = parse_page(ResourceType::Products, body).unwrap_err();
    match err {
        StorefrontError::GraphQl { resource, messages } => {
            assert_eq!(resource, ResourceType::Products);
            assert_eq!(messages, ["Throttled", "Try later"]);
        }
        other => panic!("expected GraphQl error, got: {other:?}"),
    }
}

#[test]
fn parse_page_reports_missing_connection() {
    let body = r#"{"data":{"products":{"nodes":[],"pageInfo":{"hasNextPage":false,"endCursor":null}}}}"#;
    let err = parse_page(ResourceType::Pages, body).unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::MissingConnection {
            resource: ResourceType::Pages
        }
    ));
}

#[test]
fn parse_page_rejects_non_json() {
    let err = parse_page(ResourceType::Pages, "<html>oops</html>").unwrap_err();
    assert!(matches!(err, StorefrontError::Deserialize { .. }));
}
