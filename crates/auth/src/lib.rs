//! `hrs-auth` — identity normalization and role-based authorization.
//!
//! This crate is intentionally decoupled from HTTP and storage: it receives
//! the claims of an already-validated token and answers two questions, "who
//! is this?" ([`CanonicalIdentity`]) and "may they do this?" ([`AccessRule`]).

pub mod assignments;
pub mod authorize;
pub mod claims;
pub mod display_name;
pub mod identity;
pub mod principal;
pub mod provider;
pub mod roles;

pub use assignments::{RoleAssignments, clients_from_roles, parse_roles};
pub use authorize::{
    AccessDecision, AccessRule, AuthzError, authorize, has_abstract_role, has_concrete_role,
    has_idp_provider, has_idp_provider_claim, has_role, has_role_matching,
};
pub use claims::ClaimMap;
pub use display_name::{ParsedName, parse_display_name};
pub use identity::{CanonicalIdentity, IdentityError, extract};
pub use principal::{Authorities, Principal, current_auditor};
pub use provider::IdentityProvider;
pub use roles::{Role, RoleType};
