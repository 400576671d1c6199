//! Strongly-typed identifiers used across the domain.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const PROVIDER_SEPARATOR: char = '\\';

/// Canonical identifier of a user (actor identity).
///
/// Rendered as `<PROVIDER>\<username>` when the identity provider is known
/// (e.g. `IDIR\JWICK`), or as the bare username otherwise. This is the key
/// used for audit columns and user preference records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Build a user id from an optional provider prefix and a username.
    ///
    /// A blank provider omits the prefix; the provider is upper-cased.
    pub fn new(provider: Option<&str>, username: &str) -> Result<Self, DomainError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(DomainError::invalid_id("UserId: username is blank"));
        }

        match provider.map(str::trim).filter(|p| !p.is_empty()) {
            Some(provider) => Ok(Self(format!(
                "{}{PROVIDER_SEPARATOR}{username}",
                provider.to_uppercase()
            ))),
            None => Ok(Self(username.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider prefix, if the id carries one.
    pub fn provider(&self) -> Option<&str> {
        self.0.split_once(PROVIDER_SEPARATOR).map(|(provider, _)| provider)
    }

    /// Username portion (everything after the provider prefix).
    pub fn username(&self) -> &str {
        self.0
            .split_once(PROVIDER_SEPARATOR)
            .map_or(self.0.as_str(), |(_, username)| username)
    }
}

impl core::fmt::Display for UserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id("UserId: value is blank"));
        }

        match s.split_once(PROVIDER_SEPARATOR) {
            Some((provider, username)) => {
                if provider.trim().is_empty() || username.trim().is_empty() {
                    return Err(DomainError::validation(format!(
                        "UserId: malformed provider-qualified id '{s}'"
                    )));
                }
                Self::new(Some(provider), username)
            }
            None => Self::new(None, s),
        }
    }
}
