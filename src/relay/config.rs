use std::env;

use crate::relay::error::RelayError;

/// Path appended to the target base URL.
pub const ORCHESTRATE_SYNC_PATH: &str = "/api/internal/orchestrate-sync";

/// Environment variable holding the target base URL.
pub const TARGET_URL_VAR: &str = "SYNC_TARGET_URL";

/// Environment variable holding the target API key.
pub const TARGET_API_KEY_VAR: &str = "SYNC_TARGET_API_KEY";

const MISSING_CONFIGURATION: &str = "missing target environment configuration";

/// Configuration for the sync-trigger relay.
///
/// Both values are optional here so that a half-configured environment can be
/// loaded without failing; [`validate`](RelayConfig::validate) is where absence
/// becomes an error.
#[derive(Clone, Default)]
pub struct RelayConfig {
    /// Base URL of the target application (e.g. `https://app.example.com`)
    pub base_url: Option<String>,
    /// Bearer credential sent to the target
    pub api_key: Option<String>,
}

/// A configuration whose values are present and non-empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidConfig<'a> {
    pub base_url: &'a str,
    pub api_key: &'a str,
}

impl RelayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            api_key: Some(api_key.into()),
        }
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            let value = lookup(key).filter(|v| !v.is_empty());
            if value.is_none() {
                log::debug!("{} is not set", key);
            }
            value
        };

        Self {
            base_url: read(TARGET_URL_VAR),
            api_key: read(TARGET_API_KEY_VAR),
        }
    }

    /// Checks that both values are present and non-empty.
    pub fn validate(&self) -> Result<ValidConfig<'_>, RelayError> {
        let base_url = self.base_url.as_deref().filter(|v| !v.is_empty());
        let api_key = self.api_key.as_deref().filter(|v| !v.is_empty());

        match (base_url, api_key) {
            (Some(base_url), Some(api_key)) => Ok(ValidConfig { base_url, api_key }),
            _ => Err(RelayError::Configuration(MISSING_CONFIGURATION.to_string())),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

impl ValidConfig<'_> {
    /// The full orchestrate-sync endpoint URL.
    pub fn endpoint(&self) -> String {
        endpoint(self.base_url)
    }
}

/// Appends [`ORCHESTRATE_SYNC_PATH`] to a base URL, dropping trailing slashes first.
pub fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), ORCHESTRATE_SYNC_PATH)
}

// The API key never reaches logs through Debug.
impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_is_incomplete() {
        let config = RelayConfig::default();
        assert!(config.base_url.is_none());
        assert!(config.api_key.is_none());
        assert!(!config.is_complete());
    }

    #[test]
    fn test_from_lookup_reads_both_keys() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            (TARGET_URL_VAR, "https://app.example.com"),
            (TARGET_API_KEY_VAR, "secret"),
        ]));
        let valid = config.validate().unwrap();
        assert_eq!(valid.base_url, "https://app.example.com");
        assert_eq!(valid.api_key, "secret");
    }

    #[test]
    fn test_from_lookup_treats_empty_as_missing() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            (TARGET_URL_VAR, "https://app.example.com"),
            (TARGET_API_KEY_VAR, ""),
        ]));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_validate_missing_values() {
        let cases = [
            RelayConfig::default(),
            RelayConfig {
                base_url: Some("https://app.example.com".into()),
                api_key: None,
            },
            RelayConfig {
                base_url: None,
                api_key: Some("secret".into()),
            },
            RelayConfig::new("", "secret"),
            RelayConfig::new("https://app.example.com", ""),
        ];

        for config in cases {
            match config.validate() {
                Err(RelayError::Configuration(msg)) => {
                    assert_eq!(msg, "missing target environment configuration")
                }
                other => panic!("expected configuration error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("https://app.example.com"),
            "https://app.example.com/api/internal/orchestrate-sync"
        );
        assert_eq!(
            endpoint("https://app.example.com/"),
            "https://app.example.com/api/internal/orchestrate-sync"
        );
        assert_eq!(
            endpoint("https://app.example.com/tenant"),
            "https://app.example.com/tenant/api/internal/orchestrate-sync"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = RelayConfig::new("https://app.example.com", "super-secret");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
