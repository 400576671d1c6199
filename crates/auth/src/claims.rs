use std::collections::BTreeSet;

use serde_json::Value;

/// Claim set of an already-validated token (transport-agnostic).
///
/// Signature verification and decoding happen upstream; this crate only reads
/// the resulting claims and never mutates them.
pub type ClaimMap = serde_json::Map<String, Value>;

/// Provider tag (`idir`, `bceidbusiness`, `bcsc` or the BCSC client id).
pub const IDP_NAME: &str = "custom:idp_name";
pub const IDP_USERNAME: &str = "custom:idp_username";
/// Opaque provider-side user id, used when the username is blank.
pub const IDP_USER_ID: &str = "custom:idp_user_id";
pub const IDP_BUSINESS_ID: &str = "custom:idp_business_id";
pub const IDP_BUSINESS_NAME: &str = "custom:idp_business_name";
/// Free-text display name (the only name claim Business BCeID populates).
pub const IDP_DISPLAY_NAME: &str = "custom:idp_display_name";
pub const EMAIL: &str = "email";
pub const GIVEN_NAME: &str = "given_name";
pub const FAMILY_NAME: &str = "family_name";
pub const GROUPS: &str = "cognito:groups";

/// Read a single claim as a string.
///
/// Missing, null and structured values resolve to the empty string; scalar
/// values are rendered as text.
pub fn claim_str(claims: &ClaimMap, key: &str) -> String {
    match claims.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Read a multi-valued claim as a set of strings.
///
/// A single string counts as a one-element list. Non-string list entries are
/// skipped; anything else yields the empty set.
pub fn claim_set(claims: &ClaimMap, key: &str) -> BTreeSet<String> {
    match claims.get(key) {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => BTreeSet::from([s.clone()]),
        _ => BTreeSet::new(),
    }
}

/// Group strings from the default groups claim.
pub fn get_groups(claims: &ClaimMap) -> BTreeSet<String> {
    claim_set(claims, GROUPS)
}
