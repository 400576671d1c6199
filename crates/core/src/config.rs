//! Security-related environment configuration.

use serde::{Deserialize, Serialize};

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "HRS_ENVIRONMENT";

/// Environment variable overriding the claim that carries group grants.
pub const GROUPS_CLAIM_VAR: &str = "HRS_GROUPS_CLAIM";

pub const DEFAULT_ENVIRONMENT: &str = "PROD";
pub const DEFAULT_GROUPS_CLAIM: &str = "cognito:groups";

const LOCAL_ENVIRONMENT: &str = "local";

/// Settings consumed by the identity/authorization layer and the logging setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Deployment environment name (`local`, `dev`, `PROD`, ...).
    pub environment: String,

    /// Claim holding the principal's group strings.
    pub groups_claim: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            groups_claim: DEFAULT_GROUPS_CLAIM.to_string(),
        }
    }
}

impl SecurityConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let config = Self {
            environment: read(ENVIRONMENT_VAR, DEFAULT_ENVIRONMENT),
            groups_claim: read(GROUPS_CLAIM_VAR, DEFAULT_GROUPS_CLAIM),
        };

        tracing::debug!(
            environment = %config.environment,
            groups_claim = %config.groups_claim,
            "loaded security configuration"
        );

        config
    }

    /// True when running in the `local` environment (case-insensitive).
    pub fn is_local(&self) -> bool {
        is_local_environment(&self.environment)
    }
}

/// True when `environment` names the local environment, ignoring case.
pub fn is_local_environment(environment: &str) -> bool {
    environment.eq_ignore_ascii_case(LOCAL_ENVIRONMENT)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = SecurityConfig::from_lookup(lookup(&[]));
        assert_eq!(config, SecurityConfig::default());
        assert_eq!(config.environment, "PROD");
        assert_eq!(config.groups_claim, "cognito:groups");
        assert!(!config.is_local());
    }

    #[test]
    fn reads_overrides() {
        let config = SecurityConfig::from_lookup(lookup(&[
            (ENVIRONMENT_VAR, "Local"),
            (GROUPS_CLAIM_VAR, "groups"),
        ]));
        assert_eq!(config.environment, "Local");
        assert_eq!(config.groups_claim, "groups");
        assert!(config.is_local());
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = SecurityConfig::from_lookup(lookup(&[
            (ENVIRONMENT_VAR, "   "),
            (GROUPS_CLAIM_VAR, ""),
        ]));
        assert_eq!(config, SecurityConfig::default());
    }

    #[test]
    fn local_detection_ignores_case() {
        assert!(is_local_environment("local"));
        assert!(is_local_environment("LOCAL"));
        assert!(!is_local_environment("dev"));
        assert!(!is_local_environment(""));
    }
}
