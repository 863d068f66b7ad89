//! Bidirectional mapping between configuration-side authentication
//! assignments and the Gatewarden API's per-method profile variants.
//!
//! `build_profile` goes configuration → remote, `parse_profile` goes
//! remote → configuration (the refresh direction), and `install_profile`
//! writes a built profile onto an instance target while clearing every
//! sibling profile field, which is what keeps the at-most-one-profile
//! invariant true even for targets arriving with stale data.

use log::trace;

use crate::diagnostics::Diagnostics;
use crate::errors::ProviderError;
use crate::model::{
    AssignmentConfig, AuthMethod, AuthProfile, DbAuthAssignment, DbAuthProfile,
    InstanceTarget, LdapAuthAssignment, LdapAuthProfile, MongoAuthAssignment, MongoAuthProfile,
    OracleAuthAssignment, OracleAuthProfile, RdsIamUserAuthAssignment, RdsIamUserAuthProfile,
    SqlServerAuthAssignment, SqlServerAuthProfile,
};

/// Materialize a framework list value into a plain ordered list.
///
/// `None` (null/unknown in the framework) becomes an empty list; contents
/// and order are otherwise preserved untouched.
fn materialize(list: &Option<Vec<String>>) -> Vec<String> {
    list.clone().unwrap_or_default()
}

/// Fail with `MissingProfile` when the block for the declared method is absent
fn required<'a, T>(block: &'a Option<T>, method: AuthMethod) -> crate::errors::Result<&'a T> {
    block
        .as_ref()
        .ok_or_else(|| ProviderError::missing_profile(method.as_str()))
}

/// Build the remote profile variant for `method` from the matching
/// configuration sub-model.
///
/// Fails with `UnsupportedMethod` when the tag is not recognized and with
/// `MissingProfile` when the config carries no block for the method.
/// Sub-models for other methods are never read.
pub fn build_profile(
    method: &str,
    config: &AssignmentConfig,
) -> Result<AuthProfile, Diagnostics> {
    let method: AuthMethod = method.parse().map_err(Diagnostics::from)?;

    let profile = match method {
        AuthMethod::DbAuth => {
            let block = required(&config.db_auth, method)?;
            AuthProfile::Db(DbAuthProfile {
                roles: materialize(&block.roles),
            })
        }
        AuthMethod::LdapAuth => {
            let block = required(&config.ldap_auth, method)?;
            AuthProfile::Ldap(LdapAuthProfile {
                groups: materialize(&block.groups),
            })
        }
        AuthMethod::OracleAuth => {
            let block = required(&config.oracle_auth, method)?;
            AuthProfile::Oracle(OracleAuthProfile {
                roles: materialize(&block.roles),
            })
        }
        AuthMethod::MongoAuth => {
            let block = required(&config.mongo_auth, method)?;
            AuthProfile::Mongo(MongoAuthProfile {
                roles: materialize(&block.roles),
            })
        }
        AuthMethod::SqlServerAuth => {
            let block = required(&config.sqlserver_auth, method)?;
            AuthProfile::SqlServer(SqlServerAuthProfile {
                roles: materialize(&block.roles),
            })
        }
        AuthMethod::RdsIamUserAuth => {
            let block = required(&config.rds_iam_user_auth, method)?;
            AuthProfile::RdsIamUser(RdsIamUserAuthProfile {
                db_user: block.db_user.clone().unwrap_or_default(),
            })
        }
    };

    trace!("built {} profile", method);
    Ok(profile)
}

/// Parse the profile for `method` off an instance target back into a
/// configuration model, used when refreshing state from the remote.
///
/// Returns a config with exactly the one matching sub-model populated.
/// Fails with `MissingProfile` when the expected profile field on the
/// target is empty, `UnsupportedMethod` for unrecognized tags.
pub fn parse_profile(
    method: &str,
    target: &InstanceTarget,
) -> Result<AssignmentConfig, Diagnostics> {
    let method: AuthMethod = method.parse().map_err(Diagnostics::from)?;

    let mut config = AssignmentConfig::default();
    match method {
        AuthMethod::DbAuth => {
            let profile = required(&target.db_auth_profile, method)?;
            config.db_auth = Some(DbAuthAssignment {
                roles: Some(profile.roles.clone()),
            });
        }
        AuthMethod::LdapAuth => {
            let profile = required(&target.ldap_auth_profile, method)?;
            config.ldap_auth = Some(LdapAuthAssignment {
                groups: Some(profile.groups.clone()),
            });
        }
        AuthMethod::OracleAuth => {
            let profile = required(&target.oracle_auth_profile, method)?;
            config.oracle_auth = Some(OracleAuthAssignment {
                roles: Some(profile.roles.clone()),
            });
        }
        AuthMethod::MongoAuth => {
            let profile = required(&target.mongo_auth_profile, method)?;
            config.mongo_auth = Some(MongoAuthAssignment {
                roles: Some(profile.roles.clone()),
            });
        }
        AuthMethod::SqlServerAuth => {
            let profile = required(&target.sqlserver_auth_profile, method)?;
            config.sqlserver_auth = Some(SqlServerAuthAssignment {
                roles: Some(profile.roles.clone()),
            });
        }
        AuthMethod::RdsIamUserAuth => {
            let profile = required(&target.rds_iam_user_auth_profile, method)?;
            config.rds_iam_user_auth = Some(RdsIamUserAuthAssignment {
                db_user: Some(profile.db_user.clone()),
            });
        }
    }

    trace!("parsed {} profile from target '{}'", method, target.name);
    Ok(config)
}

/// Install `profile` onto `target`: stamp the method tag, set the one
/// matching profile field, and unconditionally clear every sibling field
/// regardless of prior contents.
///
/// This is a structural assignment with no failure path; the profile
/// variant itself carries the method, so the tag and the populated field
/// cannot disagree. Switching a target from `ldap_auth` to `db_auth`
/// nulls out the old `ldap_auth` profile here, not in the caller.
pub fn install_profile(target: &mut InstanceTarget, profile: AuthProfile) {
    target.auth_method = profile.method().as_str().to_string();

    target.db_auth_profile = None;
    target.ldap_auth_profile = None;
    target.oracle_auth_profile = None;
    target.mongo_auth_profile = None;
    target.sqlserver_auth_profile = None;
    target.rds_iam_user_auth_profile = None;

    match profile {
        AuthProfile::Db(p) => target.db_auth_profile = Some(p),
        AuthProfile::Ldap(p) => target.ldap_auth_profile = Some(p),
        AuthProfile::Oracle(p) => target.oracle_auth_profile = Some(p),
        AuthProfile::Mongo(p) => target.mongo_auth_profile = Some(p),
        AuthProfile::SqlServer(p) => target.sqlserver_auth_profile = Some(p),
        AuthProfile::RdsIamUser(p) => target.rds_iam_user_auth_profile = Some(p),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_METHODS: [AuthMethod; 6] = [
        AuthMethod::DbAuth,
        AuthMethod::LdapAuth,
        AuthMethod::OracleAuth,
        AuthMethod::MongoAuth,
        AuthMethod::SqlServerAuth,
        AuthMethod::RdsIamUserAuth,
    ];

    fn sample_config(method: AuthMethod) -> AssignmentConfig {
        let mut config = AssignmentConfig::default();
        match method {
            AuthMethod::DbAuth => {
                config.db_auth = Some(DbAuthAssignment {
                    roles: Some(vec!["writer".to_string(), "reader".to_string()]),
                });
            }
            AuthMethod::LdapAuth => {
                config.ldap_auth = Some(LdapAuthAssignment {
                    groups: Some(vec!["dba-group".to_string()]),
                });
            }
            AuthMethod::OracleAuth => {
                config.oracle_auth = Some(OracleAuthAssignment {
                    roles: Some(vec!["dba".to_string()]),
                });
            }
            AuthMethod::MongoAuth => {
                config.mongo_auth = Some(MongoAuthAssignment {
                    roles: Some(vec!["readWrite".to_string()]),
                });
            }
            AuthMethod::SqlServerAuth => {
                config.sqlserver_auth = Some(SqlServerAuthAssignment {
                    roles: Some(vec!["db_datareader".to_string()]),
                });
            }
            AuthMethod::RdsIamUserAuth => {
                config.rds_iam_user_auth = Some(RdsIamUserAuthAssignment {
                    db_user: Some("app_user".to_string()),
                });
            }
        }
        config
    }

    fn profile_populated(target: &InstanceTarget, method: AuthMethod) -> bool {
        match method {
            AuthMethod::DbAuth => target.db_auth_profile.is_some(),
            AuthMethod::LdapAuth => target.ldap_auth_profile.is_some(),
            AuthMethod::OracleAuth => target.oracle_auth_profile.is_some(),
            AuthMethod::MongoAuth => target.mongo_auth_profile.is_some(),
            AuthMethod::SqlServerAuth => target.sqlserver_auth_profile.is_some(),
            AuthMethod::RdsIamUserAuth => target.rds_iam_user_auth_profile.is_some(),
        }
    }

    #[test]
    fn test_install_enforces_mutual_exclusivity() {
        for first in ALL_METHODS {
            for second in ALL_METHODS {
                if first == second {
                    continue;
                }
                let mut target = InstanceTarget::default();
                let p1 = build_profile(first.as_str(), &sample_config(first)).unwrap();
                let p2 = build_profile(second.as_str(), &sample_config(second)).unwrap();
                install_profile(&mut target, p1);
                install_profile(&mut target, p2);

                assert!(profile_populated(&target, second));
                assert_eq!(target.auth_method, second.as_str());
                for other in ALL_METHODS {
                    if other != second {
                        assert!(
                            !profile_populated(&target, other),
                            "{other} profile survived installing {second}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_install_clears_foreign_profile_data() {
        // Target arrives with stale remote state the caller never built.
        let mut target = InstanceTarget {
            name: "legacy-db".to_string(),
            instance_type: "oracle".to_string(),
            auth_method: "ldap_auth".to_string(),
            ldap_auth_profile: Some(LdapAuthProfile {
                groups: vec!["old-group".to_string()],
            }),
            ..InstanceTarget::default()
        };
        let profile = build_profile("db_auth", &sample_config(AuthMethod::DbAuth)).unwrap();
        install_profile(&mut target, profile);

        assert!(target.ldap_auth_profile.is_none());
        assert_eq!(target.auth_method, "db_auth");
        assert_eq!(
            target.db_auth_profile.unwrap().roles,
            vec!["writer".to_string(), "reader".to_string()]
        );
    }

    #[test]
    fn test_round_trip_preserves_config_for_every_method() {
        for method in ALL_METHODS {
            let config = sample_config(method);
            let profile = build_profile(method.as_str(), &config).unwrap();
            let mut target = InstanceTarget::default();
            install_profile(&mut target, profile);
            let parsed = parse_profile(method.as_str(), &target).unwrap();
            assert_eq!(parsed, config, "round trip diverged for {method}");
        }
    }

    #[test]
    fn test_build_missing_db_block_reports_single_error() {
        let diagnostics = build_profile("db_auth", &AssignmentConfig::default()).unwrap_err();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics.has_error());
        assert_eq!(diagnostics.records()[0].summary, "Missing db_auth Profile");
    }

    #[test]
    fn test_build_unknown_method_reports_unsupported() {
        let diagnostics = build_profile("not_a_method", &AssignmentConfig::default()).unwrap_err();
        assert_eq!(
            diagnostics.records()[0].summary,
            "Unsupported Authentication Method"
        );
        assert!(diagnostics.records()[0].detail.contains("not_a_method"));
    }

    #[test]
    fn test_build_ignores_sibling_blocks() {
        // A foreign block must never satisfy the declared method.
        let mut config = sample_config(AuthMethod::LdapAuth);
        config.db_auth = None;
        let diagnostics = build_profile("db_auth", &config).unwrap_err();
        assert_eq!(diagnostics.records()[0].summary, "Missing db_auth Profile");
    }

    #[test]
    fn test_build_decodes_null_list_to_empty() {
        let config = AssignmentConfig {
            db_auth: Some(DbAuthAssignment { roles: None }),
            ..AssignmentConfig::default()
        };
        let profile = build_profile("db_auth", &config).unwrap();
        assert_eq!(profile, AuthProfile::Db(DbAuthProfile { roles: vec![] }));
    }

    #[test]
    fn test_parse_empty_target_field_reports_missing() {
        let target = InstanceTarget {
            name: "orders-db".to_string(),
            auth_method: "sqlserver_auth".to_string(),
            ..InstanceTarget::default()
        };
        let diagnostics = parse_profile("sqlserver_auth", &target).unwrap_err();
        assert_eq!(
            diagnostics.records()[0].summary,
            "Missing sqlserver_auth Profile"
        );
    }

    #[test]
    fn test_parse_unknown_method_reports_unsupported() {
        let diagnostics =
            parse_profile("kerberos_auth", &InstanceTarget::default()).unwrap_err();
        assert_eq!(
            diagnostics.records()[0].summary,
            "Unsupported Authentication Method"
        );
    }

    proptest! {
        #[test]
        fn prop_db_roles_round_trip_preserves_order_and_duplicates(
            roles in proptest::collection::vec("[a-zA-Z0-9_-]{1,12}", 0..8)
        ) {
            let config = AssignmentConfig {
                db_auth: Some(DbAuthAssignment { roles: Some(roles.clone()) }),
                ..AssignmentConfig::default()
            };
            let profile = build_profile("db_auth", &config).unwrap();
            let mut target = InstanceTarget::default();
            install_profile(&mut target, profile);
            let parsed = parse_profile("db_auth", &target).unwrap();
            prop_assert_eq!(parsed.db_auth.unwrap().roles.unwrap(), roles);
        }
    }
}
