use shopmap_core::ResourceType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The query executed but the response carried an `errors` list.
    #[error("GraphQL query for {resource} failed: {}", .messages.join("; "))]
    GraphQl {
        resource: ResourceType,
        messages: Vec<String>,
    },

    #[error("response for {resource} has no `{resource}` connection")]
    MissingConnection { resource: ResourceType },

    #[error("invalid storefront endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
