//! Data model shared by the profile mapper and the policy resolver.
//!
//! The remote-side types (`InstanceTarget`, `PolicyRecord`, `PolicyPage`)
//! mirror the Gatewarden API's JSON shapes with camelCase field names. The
//! configuration-side types (`AssignmentConfig` and its sub-models) stand
//! between the IaC framework's schema values and the mapper: list fields
//! are `Option<Vec<String>>`, where `None` is the framework's null/unknown
//! decoded into absence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;

/// The closed set of database authentication methods Gatewarden supports.
///
/// Wire tags round-trip through [`AuthMethod::as_str`] and [`FromStr`];
/// unrecognized tags fail parsing and are never representable here, so
/// every `match` over this enum is exhaustive by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMethod {
    /// Password-based database authentication
    DbAuth,
    /// Directory-group authentication
    LdapAuth,
    /// Oracle wallet authentication
    OracleAuth,
    /// MongoDB role authentication
    MongoAuth,
    /// SQL Server authentication
    SqlServerAuth,
    /// Cloud-IAM database user authentication
    RdsIamUserAuth,
}

impl AuthMethod {
    /// The wire tag used by both the configuration schema and the remote API
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DbAuth => "db_auth",
            Self::LdapAuth => "ldap_auth",
            Self::OracleAuth => "oracle_auth",
            Self::MongoAuth => "mongo_auth",
            Self::SqlServerAuth => "sqlserver_auth",
            Self::RdsIamUserAuth => "rds_iam_user_auth",
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMethod {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "db_auth" => Ok(Self::DbAuth),
            "ldap_auth" => Ok(Self::LdapAuth),
            "oracle_auth" => Ok(Self::OracleAuth),
            "mongo_auth" => Ok(Self::MongoAuth),
            "sqlserver_auth" => Ok(Self::SqlServerAuth),
            "rds_iam_user_auth" => Ok(Self::RdsIamUserAuth),
            _ => Err(ProviderError::unsupported_method(s)),
        }
    }
}

/// Password-based database auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbAuthProfile {
    /// Database role names, order caller-controlled, not deduplicated
    pub roles: Vec<String>,
}

/// Directory-group auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LdapAuthProfile {
    /// Directory group names
    pub groups: Vec<String>,
}

/// Oracle wallet auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleAuthProfile {
    /// Oracle role names
    pub roles: Vec<String>,
}

/// MongoDB auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoAuthProfile {
    /// Mongo role names
    pub roles: Vec<String>,
}

/// SQL Server auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlServerAuthProfile {
    /// SQL Server role names
    pub roles: Vec<String>,
}

/// Cloud-IAM database user auth profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdsIamUserAuthProfile {
    /// The IAM-authenticated database user name
    pub db_user: String,
}

/// Remote-side tagged profile, one concrete shape per [`AuthMethod`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthProfile {
    /// `db_auth` variant
    Db(DbAuthProfile),
    /// `ldap_auth` variant
    Ldap(LdapAuthProfile),
    /// `oracle_auth` variant
    Oracle(OracleAuthProfile),
    /// `mongo_auth` variant
    Mongo(MongoAuthProfile),
    /// `sqlserver_auth` variant
    SqlServer(SqlServerAuthProfile),
    /// `rds_iam_user_auth` variant
    RdsIamUser(RdsIamUserAuthProfile),
}

impl AuthProfile {
    /// The method this profile belongs to
    pub fn method(&self) -> AuthMethod {
        match self {
            Self::Db(_) => AuthMethod::DbAuth,
            Self::Ldap(_) => AuthMethod::LdapAuth,
            Self::Oracle(_) => AuthMethod::OracleAuth,
            Self::Mongo(_) => AuthMethod::MongoAuth,
            Self::SqlServer(_) => AuthMethod::SqlServerAuth,
            Self::RdsIamUser(_) => AuthMethod::RdsIamUserAuth,
        }
    }
}

/// Configuration block for a `db_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbAuthAssignment {
    /// Role names; `None` when the framework value is null or unknown
    pub roles: Option<Vec<String>>,
}

/// Configuration block for an `ldap_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdapAuthAssignment {
    /// Group names; `None` when the framework value is null or unknown
    pub groups: Option<Vec<String>>,
}

/// Configuration block for an `oracle_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleAuthAssignment {
    /// Role names; `None` when the framework value is null or unknown
    pub roles: Option<Vec<String>>,
}

/// Configuration block for a `mongo_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoAuthAssignment {
    /// Role names; `None` when the framework value is null or unknown
    pub roles: Option<Vec<String>>,
}

/// Configuration block for a `sqlserver_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlServerAuthAssignment {
    /// Role names; `None` when the framework value is null or unknown
    pub roles: Option<Vec<String>>,
}

/// Configuration block for an `rds_iam_user_auth` assignment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdsIamUserAuthAssignment {
    /// IAM database user; `None` when the framework value is null or unknown
    pub db_user: Option<String>,
}

/// The configuration-side authentication assignment for one database
/// instance: at most one populated sub-model per method.
///
/// The mapper only ever reads the sub-model matching the declared method;
/// callers are not required to null the others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// `db_auth` block, if configured
    pub db_auth: Option<DbAuthAssignment>,
    /// `ldap_auth` block, if configured
    pub ldap_auth: Option<LdapAuthAssignment>,
    /// `oracle_auth` block, if configured
    pub oracle_auth: Option<OracleAuthAssignment>,
    /// `mongo_auth` block, if configured
    pub mongo_auth: Option<MongoAuthAssignment>,
    /// `sqlserver_auth` block, if configured
    pub sqlserver_auth: Option<SqlServerAuthAssignment>,
    /// `rds_iam_user_auth` block, if configured
    pub rds_iam_user_auth: Option<RdsIamUserAuthAssignment>,
}

/// One database instance entry attached to a policy.
///
/// Invariant: at most one profile field is populated and it matches
/// `auth_method`. [`crate::profile::install_profile`] establishes this;
/// targets arriving from the remote are trusted to uphold it.
///
/// `auth_method` stays a raw wire tag here because the remote can send
/// tags this crate does not recognize; [`crate::profile::parse_profile`]
/// rejects those with a diagnostic instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceTarget {
    /// Instance name as registered with Gatewarden
    pub name: String,
    /// Instance vendor tag (e.g. "postgres", "oracle")
    pub instance_type: String,
    /// Active authentication method wire tag
    pub auth_method: String,
    /// `db_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_auth_profile: Option<DbAuthProfile>,
    /// `ldap_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ldap_auth_profile: Option<LdapAuthProfile>,
    /// `oracle_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oracle_auth_profile: Option<OracleAuthProfile>,
    /// `mongo_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongo_auth_profile: Option<MongoAuthProfile>,
    /// `sqlserver_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqlserver_auth_profile: Option<SqlServerAuthProfile>,
    /// `rds_iam_user_auth` profile, if active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rds_iam_user_auth_profile: Option<RdsIamUserAuthProfile>,
}

/// Resolved policy metadata returned to the data-source/resource layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyIdentity {
    /// Server-assigned stable policy ID
    pub id: String,
    /// User-assigned policy name
    pub name: String,
    /// Policy description, possibly empty
    pub description: String,
    /// Status tag, e.g. "Active" or "Inactive"
    pub status: String,
}

/// One policy entry in a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    /// Server-assigned stable policy ID
    pub id: String,
    /// User-assigned policy name
    pub name: String,
    /// Policy description, possibly empty
    #[serde(default)]
    pub description: String,
    /// Status tag
    #[serde(default)]
    pub status: String,
}

impl From<PolicySummary> for PolicyIdentity {
    fn from(summary: PolicySummary) -> Self {
        Self {
            id: summary.id,
            name: summary.name,
            description: summary.description,
            status: summary.status,
        }
    }
}

/// One page of the paginated policy listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyPage {
    /// Policy summaries in server delivery order
    pub policies: Vec<PolicySummary>,
    /// Cursor for the following page; `None` at end of stream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Full policy as returned by a fetch-by-ID call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    /// Server-assigned stable policy ID
    pub id: String,
    /// User-assigned policy name
    pub name: String,
    /// Policy description, possibly empty
    #[serde(default)]
    pub description: String,
    /// Status tag
    #[serde(default)]
    pub status: String,
    /// Database instance targets attached to this policy
    #[serde(default)]
    pub targets: Vec<InstanceTarget>,
}

impl From<PolicyRecord> for PolicyIdentity {
    fn from(record: PolicyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            status: record.status,
        }
    }
}
