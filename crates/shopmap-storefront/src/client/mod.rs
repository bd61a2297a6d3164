//! HTTP client for the storefront GraphQL endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Serialize;
use shopmap_core::ResourceType;

use crate::error::StorefrontError;
use crate::queries::{operation_name, query_for};
use crate::source::{PageRequest, PageSource, ResourcePage};
use crate::types::{ConnectionData, GraphQlResponse};

/// Header carrying the public storefront access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

const USER_AGENT: &str = "shopmap/0.1 (sitemap-generator)";

/// Client for the storefront GraphQL API.
///
/// Query errors reported in the response body are surfaced as
/// [`StorefrontError::GraphQl`]; nothing is retried.
pub struct StorefrontClient {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlRequest<'a> {
    query: &'static str,
    operation_name: &'static str,
    variables: QueryVariables<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryVariables<'a> {
    url_limits: usize,
    language: &'a str,
    cursor: Option<&'a str>,
}

impl StorefrontClient {
    /// Creates a client for `endpoint` with the given request timeout.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::InvalidEndpoint`] if `endpoint` is not an absolute URL.
    /// - [`StorefrontError::Http`] if the underlying `reqwest::Client` cannot be built.
    pub fn new(
        endpoint: &str,
        access_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, StorefrontError> {
        let endpoint_url = Url::parse(endpoint).map_err(|e| StorefrontError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint_url,
            access_token,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Fetches one page of `resource` nodes.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Http`] on network or TLS failure.
    /// - [`StorefrontError::UnexpectedStatus`] on any non-2xx status.
    /// - [`StorefrontError::Deserialize`] if the body is not the expected JSON.
    /// - [`StorefrontError::GraphQl`] if the response carries an `errors` list.
    /// - [`StorefrontError::MissingConnection`] if `data` lacks the connection.
    pub async fn fetch_resource_page(
        &self,
        resource: ResourceType,
        request: PageRequest<'_>,
    ) -> Result<ResourcePage, StorefrontError> {
        let body = build_request_body(resource, &request);

        let mut http_request = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, request.cache.header_value())
            .json(&body);

        if let Some(token) = &self.access_token {
            http_request = http_request.header(ACCESS_TOKEN_HEADER, token);
        }

        let response = http_request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorefrontError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let text = response.text().await?;
        parse_page(resource, &text)
    }
}

impl PageSource for StorefrontClient {
    async fn fetch_page(
        &self,
        resource: ResourceType,
        request: PageRequest<'_>,
    ) -> Result<ResourcePage, StorefrontError> {
        self.fetch_resource_page(resource, request).await
    }
}

fn build_request_body<'a>(
    resource: ResourceType,
    request: &PageRequest<'a>,
) -> GraphQlRequest<'a> {
    GraphQlRequest {
        query: query_for(resource),
        operation_name: operation_name(resource),
        variables: QueryVariables {
            url_limits: request.page_size,
            language: request.language,
            cursor: request.cursor,
        },
    }
}

/// Decodes a response body into a [`ResourcePage`], surfacing in-band errors.
fn parse_page(resource: ResourceType, body: &str) -> Result<ResourcePage, StorefrontError> {
    let parsed: GraphQlResponse<ConnectionData> =
        serde_json::from_str(body).map_err(|e| StorefrontError::Deserialize {
            context: format!("{resource} sitemap page"),
            source: e,
        })?;

    if !parsed.errors.is_empty() {
        return Err(StorefrontError::GraphQl {
            resource,
            messages: parsed.errors.into_iter().map(|e| e.message).collect(),
        });
    }

    let connection = parsed
        .data
        .and_then(|mut data| data.remove(resource.as_str()))
        .ok_or(StorefrontError::MissingConnection { resource })?;

    Ok(ResourcePage::new(connection.nodes, connection.page_info))
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
