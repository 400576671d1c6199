//! Claim extraction: provider-specific claim shapes → canonical identity.
//!
//! Every accessor is a pure projection of the claim map. Missing claims
//! resolve to empty strings; only [`get_identity_provider`] can fail.

use hrs_core::UserId;
use serde::Serialize;
use thiserror::Error;

use crate::claims::{self, ClaimMap, claim_str};
use crate::display_name::{ParsedName, parse_display_name};
use crate::provider::IdentityProvider;

/// Prefix of the broker client id that BCSC tokens carry as provider tag.
const BCSC_CLIENT_PREFIX: &str = "ca.bc.gov.flnr.fam.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The provider claim is blank or names no supported provider.
    ///
    /// Callers that need a provider must authenticate first; this is never
    /// folded into a default value.
    #[error("identity provider not found for claim '{claim}'")]
    ProviderNotFound { claim: String },
}

/// Canonical identity of the principal behind a claim set.
///
/// Recomputed from the claims on every request; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalIdentity {
    pub user_id: String,
    pub provider: Option<IdentityProvider>,
    pub idp_username: String,
    pub business_id: String,
    pub business_name: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub full_name: String,
}

/// Project a claim map into its canonical identity.
pub fn extract(claims: &ClaimMap) -> CanonicalIdentity {
    let name = name_parts(claims);

    CanonicalIdentity {
        user_id: get_user_id(claims),
        provider: get_identity_provider(claims).ok(),
        idp_username: get_idp_username(claims),
        business_id: get_business_id(claims),
        business_name: get_business_name(claims),
        email: get_email(claims),
        first_name: name.first,
        last_name: name.last,
        display_name: get_display_name(claims),
        full_name: name.full,
    }
}

/// Fold a raw provider claim value, mapping the BCSC client-id alias to
/// `bcsc`. The value is otherwise kept as sent.
fn fold_provider_claim(raw: &str) -> String {
    let is_bcsc_client = raw
        .get(..BCSC_CLIENT_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BCSC_CLIENT_PREFIX));

    if is_bcsc_client {
        IdentityProvider::Bcsc.claim_name().to_string()
    } else {
        raw.to_string()
    }
}

/// Registry lookup of a provider claim value, accepting the BCSC client id.
pub(crate) fn resolve_provider(raw: &str) -> Option<IdentityProvider> {
    IdentityProvider::from_claim(&fold_provider_claim(raw))
}

fn provider_claim(claims: &ClaimMap) -> String {
    fold_provider_claim(&claim_str(claims, claims::IDP_NAME))
}

/// Upper-cased provider claim (`IDIR`, `BCEIDBUSINESS`, `BCSC`), or the empty
/// string when the claim is missing or unrecognized.
pub fn get_provider(claims: &ClaimMap) -> String {
    let claim = provider_claim(claims);
    match IdentityProvider::from_claim(&claim) {
        Some(_) => claim.to_uppercase(),
        None => String::new(),
    }
}

/// Strict provider lookup against the registry.
pub fn get_identity_provider(claims: &ClaimMap) -> Result<IdentityProvider, IdentityError> {
    let claim = provider_claim(claims);
    IdentityProvider::from_claim(&claim).ok_or(IdentityError::ProviderNotFound { claim })
}

/// Provider username, falling back to the opaque provider user id.
/// Surrounding whitespace is stripped.
pub fn get_idp_username(claims: &ClaimMap) -> String {
    let username = claim_str(claims, claims::IDP_USERNAME);
    let username = username.trim();
    if !username.is_empty() {
        return username.to_string();
    }

    claim_str(claims, claims::IDP_USER_ID).trim().to_string()
}

/// Canonical [`UserId`]: the provider-qualified username or id, the bare
/// name when the provider is blank, `None` when there is no name at all.
///
/// This is the single source for both the preference key and the auditor.
pub fn canonical_user_id(claims: &ClaimMap) -> Option<UserId> {
    let username = get_idp_username(claims);
    let provider = get_provider(claims);
    UserId::new(Some(&provider), &username).ok()
}

/// [`canonical_user_id`] as a string; empty when there is no name.
pub fn get_user_id(claims: &ClaimMap) -> String {
    canonical_user_id(claims).map(String::from).unwrap_or_default()
}

pub fn get_business_id(claims: &ClaimMap) -> String {
    claim_str(claims, claims::IDP_BUSINESS_ID)
}

pub fn get_business_name(claims: &ClaimMap) -> String {
    claim_str(claims, claims::IDP_BUSINESS_NAME)
}

pub fn get_email(claims: &ClaimMap) -> String {
    claim_str(claims, claims::EMAIL)
}

/// Raw display-name claim, whatever the provider.
pub fn get_display_name(claims: &ClaimMap) -> String {
    claim_str(claims, claims::IDP_DISPLAY_NAME)
}

pub fn get_first_name(claims: &ClaimMap) -> String {
    name_parts(claims).first
}

pub fn get_last_name(claims: &ClaimMap) -> String {
    name_parts(claims).last
}

/// Full name of the principal.
///
/// On the display-name path this is the display name as sent, including any
/// `Last, First ORG:TAG` punctuation.
pub fn get_name(claims: &ClaimMap) -> String {
    name_parts(claims).full
}

fn name_parts(claims: &ClaimMap) -> ParsedName {
    let standard = standard_name(claims);
    let display_name = get_display_name(claims);

    // Unset or unknown providers only ever use the standard claims.
    let uses_display_name = match get_identity_provider(claims) {
        Ok(IdentityProvider::BusinessBceid) => !display_name.trim().is_empty(),
        Ok(IdentityProvider::Idir | IdentityProvider::Bcsc) => standard.full.is_empty(),
        Err(_) => false,
    };

    if uses_display_name {
        parse_display_name(&display_name)
    } else {
        standard
    }
}

/// Names from the standard `given_name` / `family_name` claims.
fn standard_name(claims: &ClaimMap) -> ParsedName {
    let first = claim_str(claims, claims::GIVEN_NAME).trim().to_string();
    let last = claim_str(claims, claims::FAMILY_NAME).trim().to_string();

    let full = [first.as_str(), last.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    ParsedName { first, last, full }
}
