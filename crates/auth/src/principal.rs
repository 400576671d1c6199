use std::collections::BTreeSet;

use hrs_core::{SecurityConfig, UserId};

use crate::assignments::RoleAssignments;
use crate::claims::{ClaimMap, claim_set};
use crate::identity::{self, CanonicalIdentity, IdentityError};
use crate::provider::IdentityProvider;

/// Upper-cased authority strings granted to the current request.
///
/// The default value is the empty set of an unauthenticated request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorities(BTreeSet<String>);

impl Authorities {
    pub fn from_groups<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            groups
                .into_iter()
                .map(|g| g.as_ref().to_uppercase())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, authority: &str) -> bool {
        self.0.contains(&authority.to_uppercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// An authenticated principal: the validated claim set of its token, its
/// group strings and the authorities derived from them.
///
/// Built once per request and passed explicitly to every check.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    claims: ClaimMap,
    groups: BTreeSet<String>,
    authorities: Authorities,
}

impl Principal {
    /// Build a principal using the default groups claim.
    pub fn from_claims(claims: ClaimMap) -> Self {
        Self::with_config(claims, &SecurityConfig::default())
    }

    pub fn with_config(claims: ClaimMap, config: &SecurityConfig) -> Self {
        let groups = claim_set(&claims, &config.groups_claim);
        let authorities = Authorities::from_groups(&groups);
        Self {
            claims,
            groups,
            authorities,
        }
    }

    pub fn claims(&self) -> &ClaimMap {
        &self.claims
    }

    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    pub fn authorities(&self) -> &Authorities {
        &self.authorities
    }

    pub fn identity(&self) -> CanonicalIdentity {
        identity::extract(&self.claims)
    }

    pub fn identity_provider(&self) -> Result<IdentityProvider, IdentityError> {
        identity::get_identity_provider(&self.claims)
    }

    /// Role assignments parsed from the principal's group strings.
    pub fn roles(&self) -> RoleAssignments {
        RoleAssignments::parse(&self.groups)
    }

    /// Client numbers the principal may act for.
    pub fn clients(&self) -> BTreeSet<String> {
        self.roles().clients()
    }

    /// Canonical user id, `None` when the token carries no username or id.
    pub fn user_id(&self) -> Option<UserId> {
        identity::canonical_user_id(&self.claims)
    }
}

/// Auditor recorded in created/modified audit columns.
pub fn current_auditor(principal: Option<&Principal>) -> Option<UserId> {
    principal.and_then(Principal::user_id)
}
