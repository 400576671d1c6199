use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::claims::{self, ClaimMap};
use crate::roles::Role;

/// Roles held by a principal, each with the scope ids it applies to.
///
/// Concrete roles map to an empty set; abstract roles map to the client or
/// business numbers they were granted for. Roles never granted are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleAssignments(BTreeMap<Role, BTreeSet<String>>);

impl RoleAssignments {
    /// Parse group strings (`"Admin"`, `"Viewer_00010040"`, ...).
    ///
    /// The part before the first underscore is matched case-insensitively
    /// against [`Role`]. Unknown roles and abstract roles without a scope are
    /// dropped.
    pub fn parse<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut assignments: BTreeMap<Role, BTreeSet<String>> = BTreeMap::new();

        for group in groups {
            let group = group.as_ref();
            let (name, scope) = match group.split_once('_') {
                Some((name, scope)) => (name, Some(scope)),
                None => (group, None),
            };

            let Some(role) = Role::from_value(name) else {
                tracing::trace!(group, "dropping group with unknown role");
                continue;
            };

            if role.is_concrete() {
                assignments.entry(role).or_default();
                continue;
            }

            match scope.filter(|s| !s.trim().is_empty()) {
                Some(scope) => {
                    assignments.entry(role).or_default().insert(scope.to_string());
                }
                None => tracing::trace!(group, "dropping abstract role without scope"),
            }
        }

        Self(assignments)
    }

    /// Parse the groups claim of a token.
    pub fn from_claims(claims: &ClaimMap) -> Self {
        Self::parse(claims::get_groups(claims))
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    /// Scope ids granted for `role`; `None` when the role is not held.
    pub fn scopes(&self, role: Role) -> Option<&BTreeSet<String>> {
        self.0.get(&role)
    }

    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.keys().copied()
    }

    /// Every scope id granted by any abstract role, deduplicated.
    pub fn clients(&self) -> BTreeSet<String> {
        self.0
            .iter()
            .filter(|(role, _)| role.is_abstract())
            .flat_map(|(_, scopes)| scopes.iter().cloned())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Role, &BTreeSet<String>)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<Role, BTreeSet<String>> {
        self.0
    }
}

/// Parse group strings into role assignments.
pub fn parse_roles<I, S>(groups: I) -> RoleAssignments
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RoleAssignments::parse(groups)
}

/// Scope ids the principal may act for, regardless of which abstract role
/// granted them.
pub fn clients_from_roles<I, S>(groups: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    RoleAssignments::parse(groups).clients()
}
