//! Heuristic parser for the single free-text display-name claim.
//!
//! Two shapes arrive from the identity broker:
//!
//! - `"First Last"` / `"First Middle Last"`: first token is the first name,
//!   the rest is the last name.
//! - `"Last, First[ M] ORG:TAG"`: the last word before the comma is the last
//!   name; after the comma, the organizational `ORG:TAG` token and single
//!   letter initials are dropped and the first remaining token is the first
//!   name.
//!
//! In both shapes the full name is the input string, untouched.

use serde::Serialize;

/// Name components recovered from a display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedName {
    pub first: String,
    pub last: String,
    pub full: String,
}

/// Parse a display name into first/last/full components.
///
/// A blank input yields three empty strings.
pub fn parse_display_name(raw: &str) -> ParsedName {
    if raw.trim().is_empty() {
        return ParsedName::default();
    }

    let (first, last) = match raw.split_once(',') {
        Some((surname, given)) => (
            name_tokens(given).next().unwrap_or_default().to_string(),
            surname.split_whitespace().last().unwrap_or_default().to_string(),
        ),
        None => {
            let mut tokens = raw.split_whitespace().filter(|t| !is_org_suffix(t));
            let first = tokens.next().unwrap_or_default().to_string();
            (first, tokens.collect::<Vec<_>>().join(" "))
        }
    };

    ParsedName {
        first,
        last,
        full: raw.to_string(),
    }
}

/// Tokens of the given-name segment that can be a first name.
fn name_tokens(segment: &str) -> impl Iterator<Item = &str> {
    segment
        .split_whitespace()
        .filter(|t| !is_org_suffix(t) && !is_initial(t))
}

/// Organizational suffix such as `WLRS:EX`.
fn is_org_suffix(token: &str) -> bool {
    token.contains(':')
}

/// Middle initial such as `V` or `V.`.
fn is_initial(token: &str) -> bool {
    let mut chars = token.trim_end_matches('.').chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
