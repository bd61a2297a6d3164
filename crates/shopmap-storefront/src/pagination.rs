//! Request-owned pagination state.
//!
//! A cursor belongs to exactly one fetch of one resource type. It is created
//! by the caller, advanced by the fetch loop after each page, and reset to the
//! start when the loop exits, so concurrent requests never share position.

use shopmap_core::ResourceType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    resource: ResourceType,
    token: Option<String>,
}

impl PaginationCursor {
    /// A cursor positioned at the beginning of `resource`.
    #[must_use]
    pub fn start(resource: ResourceType) -> Self {
        Self {
            resource,
            token: None,
        }
    }

    /// A cursor resuming after a previously reported `endCursor`.
    #[must_use]
    pub fn resume(resource: ResourceType, token: impl Into<String>) -> Self {
        Self {
            resource,
            token: Some(token.into()),
        }
    }

    #[must_use]
    pub fn resource(&self) -> ResourceType {
        self.resource
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn is_at_start(&self) -> bool {
        self.token.is_none()
    }

    pub fn advance(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn reset(&mut self) {
        self.token = None;
    }
}
