//! This crate provides the core business logic for the Gatewarden
//! Terraform provider:
//! - bidirectional mapping between database authentication assignments
//!   and Gatewarden's per-method profile variants
//! - policy resolution by ID or by paginated name search
//! - severity-tagged diagnostics in place of fatal failures
//!
//! Schema declarations, resource lifecycle wiring, and the API transport
//! live in the surrounding provider crates; this crate owns only the
//! translation and resolution logic between validated configuration
//! values and the [`remote::PolicyDirectory`] boundary.

pub mod diagnostics;
pub mod errors;
pub mod model;
pub mod profile;
pub mod remote;
pub mod resolver;

// Re-exports for a small, focused public API
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use errors::ProviderError;
pub use model::{
    AssignmentConfig, AuthMethod, AuthProfile, InstanceTarget, PolicyIdentity, PolicyPage,
    PolicyRecord, PolicySummary,
};
pub use profile::{build_profile, install_profile, parse_profile};
pub use remote::{DirectoryError, PolicyDirectory};
pub use resolver::{resolve, PolicySelector};
