use serde::{Deserialize, Serialize};

/// Whether a role stands alone or must be paired with a scope id.
///
/// - `Concrete`: global role names (e.g. `"Admin"`).
/// - `Abstract`: role names combined with a client/business number
///   (e.g. `"Viewer_00010040"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleType {
    Concrete,
    Abstract,
}

/// Roles known to the application.
///
/// The concrete/abstract classification is fixed per variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Viewer,
    Submitter,
    Area,
    District,
    Admin,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Self::Viewer,
        Self::Submitter,
        Self::Area,
        Self::District,
        Self::Admin,
    ];

    pub const fn role_type(self) -> RoleType {
        match self {
            Self::Viewer | Self::Submitter => RoleType::Abstract,
            Self::Area | Self::District | Self::Admin => RoleType::Concrete,
        }
    }

    pub const fn is_concrete(self) -> bool {
        matches!(self.role_type(), RoleType::Concrete)
    }

    pub const fn is_abstract(self) -> bool {
        matches!(self.role_type(), RoleType::Abstract)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Viewer => "VIEWER",
            Self::Submitter => "SUBMITTER",
            Self::Area => "AREA",
            Self::District => "DISTRICT",
            Self::Admin => "ADMIN",
        }
    }

    /// Case-insensitive lookup by role name; `None` for unknown names.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(value))
    }
}

impl AsRef<str> for Role {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
