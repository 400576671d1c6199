//! Authorization decisions over the current request's authorities.
//!
//! Every predicate is pure and takes the authority set (or principal)
//! explicitly. An unauthenticated request has no authorities and is denied by
//! every role check.

use serde::Serialize;
use thiserror::Error;

use crate::identity;
use crate::principal::{Authorities, Principal};
use crate::provider::IdentityProvider;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unauthenticated")]
    Unauthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),
}

/// True iff any (upper-cased) authority satisfies `matcher`.
pub fn has_role_matching<F>(authorities: &Authorities, matcher: F) -> bool
where
    F: Fn(&str) -> bool,
{
    authorities.iter().any(matcher)
}

/// Exact, case-insensitive match of a concrete role name.
pub fn has_concrete_role(authorities: &Authorities, role: impl AsRef<str>) -> bool {
    let role = role.as_ref().to_uppercase();
    has_role_matching(authorities, |authority| authority == role)
}

/// The role is held in any scope: bare (`ROLE`) or scoped (`ROLE_<scope>`).
pub fn has_role(authorities: &Authorities, role: impl AsRef<str>) -> bool {
    let role = role.as_ref().to_uppercase();
    let scoped = format!("{role}_");
    has_role_matching(authorities, |authority| {
        authority == role || authority.starts_with(&scoped)
    })
}

/// The abstract role `<prefix>_<scope>` is held exactly.
pub fn has_abstract_role(
    authorities: &Authorities,
    role_prefix: impl AsRef<str>,
    scope_id: impl AsRef<str>,
) -> bool {
    let expected = format!("{}_{}", role_prefix.as_ref(), scope_id.as_ref()).to_uppercase();
    has_role_matching(authorities, |authority| authority == expected)
}

/// The principal's resolved identity provider is `target`.
///
/// Never fails: no principal, or a provider claim the registry does not
/// know, is a denial.
pub fn has_idp_provider(principal: Option<&Principal>, target: IdentityProvider) -> bool {
    let Some(principal) = principal else {
        return false;
    };

    match principal.identity_provider() {
        Ok(provider) => provider == target,
        Err(err) => {
            tracing::warn!(
                %err,
                expected = %target,
                "provider check on unrecognized identity provider"
            );
            false
        }
    }
}

/// [`has_idp_provider`] keyed by a provider claim value such as `"idir"`.
///
/// The BCSC client id is accepted as a target, as it is in the token.
pub fn has_idp_provider_claim(principal: Option<&Principal>, provider: &str) -> bool {
    identity::resolve_provider(provider).is_some_and(|target| has_idp_provider(principal, target))
}

/// A route-level access rule, composed by the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessRule {
    PermitAll,
    Authenticated,
    DenyAll,
    /// Role held in any scope.
    Role { role: String },
    ConcreteRole { role: String },
    AbstractRole { prefix: String, scope: String },
    IdentityProvider { provider: IdentityProvider },
}

impl AccessRule {
    pub fn role(role: impl AsRef<str>) -> Self {
        Self::Role {
            role: role.as_ref().to_string(),
        }
    }

    pub fn concrete_role(role: impl AsRef<str>) -> Self {
        Self::ConcreteRole {
            role: role.as_ref().to_string(),
        }
    }

    /// `scope` is typically extracted from the request (path or query).
    pub fn abstract_role(prefix: impl AsRef<str>, scope: impl Into<String>) -> Self {
        Self::AbstractRole {
            prefix: prefix.as_ref().to_string(),
            scope: scope.into(),
        }
    }

    pub fn identity_provider(provider: IdentityProvider) -> Self {
        Self::IdentityProvider { provider }
    }

    /// Evaluate the rule against the request's principal.
    pub fn evaluate(&self, principal: Option<&Principal>) -> AccessDecision {
        let empty = Authorities::default();
        let authorities = principal.map_or(&empty, Principal::authorities);

        let granted = match self {
            Self::PermitAll => true,
            Self::DenyAll => false,
            Self::Authenticated => principal.is_some(),
            Self::Role { role } => has_role(authorities, role),
            Self::ConcreteRole { role } => has_concrete_role(authorities, role),
            Self::AbstractRole { prefix, scope } => has_abstract_role(authorities, prefix, scope),
            Self::IdentityProvider { provider } => has_idp_provider(principal, *provider),
        };

        let decision = AccessDecision {
            rule: self.to_string(),
            granted,
            authenticated: principal.is_some(),
            reason: self.reason(granted, principal.is_some()),
        };

        tracing::debug!(rule = %decision.rule, granted, "access decision");
        decision
    }

    fn reason(&self, granted: bool, authenticated: bool) -> String {
        match (self, granted) {
            (Self::PermitAll, _) => "rule permits every request".to_string(),
            (Self::DenyAll, _) => "rule denies every request".to_string(),
            (_, false) if !authenticated => "request is not authenticated".to_string(),
            (Self::Authenticated, _) => "request is authenticated".to_string(),
            (Self::IdentityProvider { provider }, true) => {
                format!("principal authenticated with {provider}")
            }
            (Self::IdentityProvider { provider }, false) => {
                format!("principal did not authenticate with {provider}")
            }
            (_, true) => format!("principal holds a grant satisfying {self}"),
            (_, false) => format!("principal holds no grant satisfying {self}"),
        }
    }
}

impl core::fmt::Display for AccessRule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PermitAll => f.write_str("permit_all"),
            Self::Authenticated => f.write_str("authenticated"),
            Self::DenyAll => f.write_str("deny_all"),
            Self::Role { role } => write!(f, "role({})", role.to_uppercase()),
            Self::ConcreteRole { role } => write!(f, "concrete_role({})", role.to_uppercase()),
            Self::AbstractRole { prefix, scope } => {
                write!(f, "abstract_role({}_{})", prefix.to_uppercase(), scope)
            }
            Self::IdentityProvider { provider } => write!(f, "identity_provider({provider})"),
        }
    }
}

/// Outcome of evaluating an [`AccessRule`], suitable for audit logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub rule: String,
    pub granted: bool,
    pub authenticated: bool,
    pub reason: String,
}

impl AccessDecision {
    pub fn into_result(self) -> Result<(), AuthzError> {
        match (self.granted, self.authenticated) {
            (true, _) => Ok(()),
            (false, false) => Err(AuthzError::Unauthenticated),
            (false, true) => Err(AuthzError::Forbidden(self.rule)),
        }
    }
}

/// Gate a request: `Ok` when `rule` grants access to `principal`.
pub fn authorize(principal: Option<&Principal>, rule: &AccessRule) -> Result<(), AuthzError> {
    rule.evaluate(principal).into_result()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::claims::ClaimMap;
    use crate::roles::Role;

    fn authorities(groups: &[&str]) -> Authorities {
        Authorities::from_groups(groups)
    }

    fn principal(value: Value) -> Principal {
        match value {
            Value::Object(map) => Principal::from_claims(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn concrete_role_requires_exact_match() {
        let a = authorities(&["Viewer_00012120", "Submitter_00012120", "Area", "Admin"]);
        assert!(has_concrete_role(&a, Role::Area));
        assert!(has_concrete_role(&a, "admin"));
        assert!(!has_concrete_role(&a, Role::District));
        assert!(!has_concrete_role(&a, Role::Viewer));

        assert!(has_concrete_role(&authorities(&["Viewer"]), "Viewer"));
    }

    #[test]
    fn role_matches_bare_or_scoped() {
        let a = authorities(&["Approver_12345678"]);
        assert!(has_role(&a, "Approver"));
        assert!(has_role(&a, "approver_12345678"));
        assert!(!has_role(&a, "Viewer"));

        assert!(has_role(&authorities(&["APPROVER"]), "Approver"));
        assert!(!has_role(&authorities(&["APPROVERS"]), "Approver"));
    }

    #[test]
    fn abstract_role_requires_matching_scope() {
        let a = authorities(&[
            "Viewer_00000111",
            "Submitter_00012120",
            "Approver_00010040",
            "Admin",
        ]);
        assert!(has_abstract_role(&a, Role::Viewer, "00000111"));
        assert!(has_abstract_role(&a, "viewer", "00000111"));
        assert!(!has_abstract_role(&a, Role::Viewer, "00000112"));
        assert!(!has_abstract_role(&a, Role::Admin, "00012120"));

        let a = authorities(&["Submitter_00012120", "Approver_00010040"]);
        assert!(!has_abstract_role(&a, Role::Viewer, "00000111"));
    }

    #[test]
    fn unauthenticated_denies_every_role_check() {
        let none = Authorities::default();
        assert!(!has_role_matching(&none, |_| true));
        assert!(!has_concrete_role(&none, Role::Admin));
        assert!(!has_role(&none, Role::Viewer));
        assert!(!has_abstract_role(&none, Role::Viewer, "00000111"));
        assert!(!has_idp_provider(None, IdentityProvider::Idir));
        assert!(!has_idp_provider_claim(None, "idir"));
    }

    #[test]
    fn identity_provider_checks() {
        let idir = principal(json!({ "custom:idp_name": "idir" }));
        assert!(has_idp_provider(Some(&idir), IdentityProvider::Idir));
        assert!(!has_idp_provider(Some(&idir), IdentityProvider::BusinessBceid));
        assert!(has_idp_provider_claim(Some(&idir), "idir"));
        assert!(has_idp_provider_claim(Some(&idir), "IDIR"));
        assert!(!has_idp_provider_claim(Some(&idir), "github"));

        let bcsc = principal(json!({ "custom:idp_name": "ca.bc.gov.flnr.fam.test" }));
        assert!(has_idp_provider(Some(&bcsc), IdentityProvider::Bcsc));
        assert!(has_idp_provider_claim(Some(&bcsc), "ca.bc.gov.flnr.fam.dev"));
        assert!(has_idp_provider_claim(Some(&bcsc), "bcsc"));
        assert!(!has_idp_provider_claim(Some(&idir), "ca.bc.gov.flnr.fam.dev"));
    }

    #[test]
    fn unrecognized_provider_is_denied_not_raised() {
        let unknown = principal(json!({ "custom:idp_name": "github" }));
        assert!(!has_idp_provider(Some(&unknown), IdentityProvider::Idir));

        let missing = Principal::from_claims(ClaimMap::new());
        assert!(!has_idp_provider(Some(&missing), IdentityProvider::Idir));
        assert!(missing.identity_provider().is_err());
    }

    #[test]
    fn rules_evaluate_against_principal() {
        let p = principal(json!({
            "custom:idp_name": "bceidbusiness",
            "cognito:groups": ["Viewer_00010040", "District"],
        }));
        let p = Some(&p);

        assert!(AccessRule::PermitAll.evaluate(None).granted);
        assert!(!AccessRule::DenyAll.evaluate(p).granted);
        assert!(AccessRule::Authenticated.evaluate(p).granted);
        assert!(!AccessRule::Authenticated.evaluate(None).granted);
        assert!(AccessRule::role(Role::Viewer).evaluate(p).granted);
        assert!(!AccessRule::role(Role::Submitter).evaluate(p).granted);
        assert!(AccessRule::concrete_role(Role::District).evaluate(p).granted);
        assert!(!AccessRule::concrete_role(Role::Viewer).evaluate(p).granted);
        assert!(AccessRule::abstract_role(Role::Viewer, "00010040").evaluate(p).granted);
        assert!(!AccessRule::abstract_role(Role::Viewer, "00012120").evaluate(p).granted);
        assert!(
            AccessRule::identity_provider(IdentityProvider::BusinessBceid)
                .evaluate(p)
                .granted
        );
        assert!(!AccessRule::identity_provider(IdentityProvider::Idir).evaluate(p).granted);
    }

    #[test]
    fn authorize_distinguishes_unauthenticated_from_forbidden() {
        let p = principal(json!({ "cognito:groups": ["Admin"] }));

        assert_eq!(authorize(Some(&p), &AccessRule::concrete_role(Role::Admin)), Ok(()));
        assert_eq!(
            authorize(None, &AccessRule::concrete_role(Role::Admin)),
            Err(AuthzError::Unauthenticated)
        );
        assert_eq!(
            authorize(Some(&p), &AccessRule::abstract_role(Role::Viewer, "00000111")),
            Err(AuthzError::Forbidden("abstract_role(VIEWER_00000111)".to_string()))
        );
    }

    #[test]
    fn decision_explains_outcome() {
        let p = principal(json!({ "custom:idp_name": "idir" }));
        let decision =
            AccessRule::identity_provider(IdentityProvider::BusinessBceid).evaluate(Some(&p));

        assert!(!decision.granted);
        assert!(decision.authenticated);
        assert_eq!(decision.rule, "identity_provider(BUSINESS_BCEID)");
        assert_eq!(decision.reason, "principal did not authenticate with BUSINESS_BCEID");

        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["granted"], json!(false));

        let decision = AccessRule::role("Viewer").evaluate(None);
        assert_eq!(decision.reason, "request is not authenticated");
    }

    #[test]
    fn rules_serialize_with_kind_tag() {
        let json = serde_json::to_value(AccessRule::abstract_role("Viewer", "00010040")).unwrap();
        assert_eq!(
            json,
            json!({ "kind": "abstract_role", "prefix": "Viewer", "scope": "00010040" })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a granted scope is found exactly; other scopes are not.
            #[test]
            fn abstract_scope_round_trips(
                scope in "[0-9]{8}",
                other in "[0-9]{8}",
                role in prop_oneof![Just(Role::Viewer), Just(Role::Submitter)]
            ) {
                let group = format!("{}_{scope}", role.as_str().to_lowercase());
                let a = Authorities::from_groups([group]);
                prop_assert!(has_abstract_role(&a, role, &scope));
                prop_assert!(has_role(&a, role));
                prop_assert!(!has_concrete_role(&a, role));
                prop_assert_eq!(has_abstract_role(&a, role, &other), scope == other);
            }
        }
    }
}
