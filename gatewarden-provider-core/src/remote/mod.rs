//! Gatewarden API boundary consumed by the resolver.
//!
//! The provider core treats the API client as a black box behind
//! [`PolicyDirectory`]: one call fetches a policy by ID, the other pulls
//! listing pages one cursor at a time. Pages are pulled, not pushed, so a
//! consumer that finds what it wants simply stops calling; nothing past
//! the last requested page is ever fetched. Production implementations
//! live with the transport layer; tests use in-memory stubs.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{PolicyPage, PolicyRecord};

#[derive(Error, Debug)]
/// Errors surfaced by a Gatewarden API client
pub enum DirectoryError {
    #[error("Gatewarden API error: {0}")]
    /// The service rejected or failed the request
    Api(String),
    #[error("Gatewarden transport error: {0}")]
    /// The request never completed (connection, TLS, timeout)
    Transport(String),
}

/// Read access to the Gatewarden policy directory.
///
/// `list_policies(None)` requests the first page; each returned
/// [`PolicyPage`] carries the cursor for the following page, or `None` at
/// end of stream. The stream is finite, delivered in server-determined
/// order, and not restartable mid-way.
#[async_trait]
pub trait PolicyDirectory: Send + Sync {
    /// Fetch one policy by its server-assigned ID, single round trip
    async fn fetch_policy(&self, id: &str) -> Result<PolicyRecord, DirectoryError>;

    /// Fetch one listing page at the given cursor
    async fn list_policies(&self, cursor: Option<&str>) -> Result<PolicyPage, DirectoryError>;
}
