//! Policy resolution by ID or by name.
//!
//! The data-source/resource layer calls [`resolve`] before anything else
//! touches a policy: an ID selector costs one fetch, a name selector
//! walks the paginated listing until the first exact match and stops
//! there. `resolve` is an async fn with no state across calls; dropping
//! its future aborts an in-flight search, and callers that need a
//! deadline wrap it in `tokio::time::timeout`.

use log::{debug, trace};

use crate::diagnostics::Diagnostics;
use crate::errors::ProviderError;
use crate::model::PolicyIdentity;
use crate::remote::PolicyDirectory;

/// Caller-supplied lookup key: exactly one of the two fields must be set.
///
/// The exactly-one rule is the caller's contract, validated where the
/// selector is assembled from configuration; [`resolve`] re-checks it so
/// misuse surfaces as a diagnostic rather than an arbitrary branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicySelector {
    /// Server-assigned policy ID
    pub policy_id: Option<String>,
    /// User-assigned policy name, matched case-sensitively
    pub name: Option<String>,
}

impl PolicySelector {
    /// Selector for an ID lookup
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            policy_id: Some(id.into()),
            name: None,
        }
    }

    /// Selector for a name lookup
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            policy_id: None,
            name: Some(name.into()),
        }
    }

    /// Enforce that exactly one lookup key is present
    pub fn validate(&self) -> Result<(), ProviderError> {
        match (&self.policy_id, &self.name) {
            (Some(_), Some(_)) => Err(ProviderError::invalid_configuration(
                "policy_id and name are mutually exclusive; set exactly one",
            )),
            (None, None) => Err(ProviderError::invalid_configuration(
                "one of policy_id or name must be set",
            )),
            _ => Ok(()),
        }
    }
}

/// Resolve a policy's identity (ID, name, description, status) from a
/// selector.
///
/// The ID branch is a single `fetch_policy` call. The name branch
/// consumes listing pages in delivery order and returns the first summary
/// whose name is exactly equal to the searched name; no further item or
/// page is examined after a match. Duplicate names upstream are not an
/// error: first match in stream delivery order wins. An exhausted stream
/// yields `NotFound` carrying how many pages and items were scanned.
pub async fn resolve<D: PolicyDirectory + ?Sized>(
    directory: &D,
    selector: &PolicySelector,
) -> Result<PolicyIdentity, Diagnostics> {
    selector.validate().map_err(Diagnostics::from)?;

    if let Some(id) = selector.policy_id.as_deref() {
        debug!("resolving policy by id '{id}'");
        let record = directory
            .fetch_policy(id)
            .await
            .map_err(|e| Diagnostics::from(ProviderError::fetch_with_source(id, e)))?;
        return Ok(PolicyIdentity::from(record));
    }

    // validate() guarantees the name is present on this branch
    let name = selector.name.as_deref().unwrap_or_default();
    debug!("resolving policy by name '{name}'");

    let mut cursor: Option<String> = None;
    let mut pages_scanned = 0usize;
    let mut items_scanned = 0usize;

    loop {
        let page = directory
            .list_policies(cursor.as_deref())
            .await
            .map_err(|e| Diagnostics::from(ProviderError::fetch_with_source(name, e)))?;
        pages_scanned += 1;

        for summary in page.policies {
            items_scanned += 1;
            trace!("page {pages_scanned}: saw policy '{}'", summary.name);
            if summary.name == name {
                debug!(
                    "matched policy '{name}' (id '{}') after {items_scanned} policies on {pages_scanned} pages",
                    summary.id
                );
                return Ok(PolicyIdentity::from(summary));
            }
        }

        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!("policy '{name}' not found after {items_scanned} policies on {pages_scanned} pages");
    Err(Diagnostics::from(ProviderError::not_found(
        name,
        pages_scanned,
        items_scanned,
    )))
}
