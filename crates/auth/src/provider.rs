use serde::{Deserialize, Serialize};

/// Identity providers this application accepts tokens from.
///
/// Each provider carries the exact (lowercase) value its tokens use in the
/// provider-tag claim.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityProvider {
    Idir,
    BusinessBceid,
    Bcsc,
}

impl IdentityProvider {
    pub const ALL: [IdentityProvider; 3] = [Self::Idir, Self::BusinessBceid, Self::Bcsc];

    /// Claim value identifying this provider in a token.
    pub const fn claim_name(self) -> &'static str {
        match self {
            Self::Idir => "idir",
            Self::BusinessBceid => "bceidbusiness",
            Self::Bcsc => "bcsc",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idir => "IDIR",
            Self::BusinessBceid => "BUSINESS_BCEID",
            Self::Bcsc => "BCSC",
        }
    }

    /// Look a provider up by its claim value (exact, case-insensitive).
    pub fn from_claim(claim: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|provider| provider.claim_name().eq_ignore_ascii_case(claim))
    }
}

impl core::fmt::Display for IdentityProvider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
