//! Error handling module

use thiserror::Error;

/// Result type alias for operations that can fail with `ProviderError`
pub(crate) type Result<T> = std::result::Result<T, ProviderError>;

/// Comprehensive error type for the provider core.
///
/// This enum covers all failure conditions that can occur while mapping
/// authentication profiles and resolving policies against the Gatewarden
/// API. Every variant carries enough context to act on: the offending
/// method tag, the searched ID or name, and the underlying error text
/// where one exists.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The assignment block for the declared authentication method is absent
    #[error("Missing {method} Profile: the assignment carries no {method} block for this instance")]
    MissingProfile {
        /// The authentication method whose sub-model was expected
        method: String,
    },

    /// The method tag is not one of the recognized authentication methods
    #[error("Unsupported Authentication Method: '{method}' is not a recognized authentication method")]
    UnsupportedMethod {
        /// The unrecognized method tag as received
        method: String,
    },

    /// A remote call to the Gatewarden API failed
    #[error("Failed to fetch policy '{subject}': {message}")]
    FetchError {
        /// The policy ID or name the call was made for
        subject: String,
        /// The underlying error text from the API client
        message: String,
        /// Optional underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A name search exhausted the policy listing without a match
    #[error("Policy named '{name}' not found: scanned {items_scanned} policies across {pages_scanned} pages")]
    NotFound {
        /// The name that was searched for
        name: String,
        /// Number of listing pages consumed before giving up
        pages_scanned: usize,
        /// Number of policy summaries examined before giving up
        items_scanned: usize,
    },

    /// Caller-level selector validation errors
    #[error("Invalid policy selector: {message}")]
    InvalidConfiguration {
        /// Detailed error message about the selector issue
        message: String,
    },
}

impl ProviderError {
    /// Short stable summary for this error, used as the diagnostic headline
    pub fn summary(&self) -> String {
        match self {
            Self::MissingProfile { method } => format!("Missing {method} Profile"),
            Self::UnsupportedMethod { .. } => "Unsupported Authentication Method".to_string(),
            Self::FetchError { .. } => "Error Fetching Policy".to_string(),
            Self::NotFound { .. } => "Policy Not Found".to_string(),
            Self::InvalidConfiguration { .. } => "Invalid Policy Selector".to_string(),
        }
    }

    /// Create a missing-profile error for a method
    pub(crate) fn missing_profile(method: impl Into<String>) -> Self {
        Self::MissingProfile {
            method: method.into(),
        }
    }

    /// Create an unsupported-method error from the raw tag
    pub(crate) fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Create a fetch error with the underlying API client error as source
    pub(crate) fn fetch_with_source(
        subject: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::FetchError {
            subject: subject.into(),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error carrying scan counts for diagnostics
    pub(crate) fn not_found(
        name: impl Into<String>,
        pages_scanned: usize,
        items_scanned: usize,
    ) -> Self {
        Self::NotFound {
            name: name.into(),
            pages_scanned,
            items_scanned,
        }
    }

    /// Create an invalid-selector error
    pub(crate) fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_profile_message_names_the_method() {
        let error = ProviderError::missing_profile("db_auth");
        assert_eq!(error.summary(), "Missing db_auth Profile");
        assert!(error.to_string().contains("db_auth"));
    }

    #[test]
    fn test_not_found_message_names_search_and_counts() {
        let error = ProviderError::not_found("payments-prod", 3, 57);
        assert_eq!(error.summary(), "Policy Not Found");
        assert!(error.to_string().contains("payments-prod"));
        assert!(error.to_string().contains("3 pages"));
        assert!(error.to_string().contains("57 policies"));
    }
}
