use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::remediation::RemediationRegistry;

pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:5001";
pub const DEFAULT_ACTION_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub remediation: RemediationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationConfig {
    /// YAML remediation table. The built-in table is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
    pub action_timeout_secs: u64,
}

impl Default for RemediationConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            action_timeout_secs: DEFAULT_ACTION_TIMEOUT_SECS,
        }
    }
}

impl RemediationConfig {
    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }

    pub fn load_registry(&self) -> crate::Result<RemediationRegistry> {
        match &self.config_path {
            Some(path) => RemediationRegistry::from_file(path),
            None => {
                tracing::warn!("REMEDIATION_CONFIG is not set. Using the built-in remediation table.");
                Ok(RemediationRegistry::builtin())
            }
        }
    }
}

/// Values given on the command line. Each one replaces the matching
/// environment variable before anything is parsed or validated.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub addr: Option<String>,
    pub remediations: Option<PathBuf>,
    pub action_timeout_secs: Option<u64>,
}

impl Config {
    /// Read `.env` and the process environment, apply `overrides`, then
    /// validate the result.
    pub fn load(overrides: Overrides) -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self::from_vars(|key| std::env::var(key).ok(), overrides)?;
        config.validate()?;
        Ok(config)
    }

    fn from_vars<F>(var: F, overrides: Overrides) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let action_timeout_secs = match overrides.action_timeout_secs {
            Some(secs) => secs,
            None => match var("ACTION_TIMEOUT_SECS") {
                Some(raw) => raw.trim().parse().map_err(|_| {
                    crate::Error::Config(format!("ACTION_TIMEOUT_SECS must be an integer, got '{}'", raw))
                })?,
                None => DEFAULT_ACTION_TIMEOUT_SECS,
            },
        };

        Ok(Config {
            server: ServerConfig {
                addr: overrides
                    .addr
                    .or_else(|| var("SERVER_ADDR"))
                    .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string()),
            },
            remediation: RemediationConfig {
                config_path: overrides
                    .remediations
                    .or_else(|| var("REMEDIATION_CONFIG").filter(|s| !s.is_empty()).map(PathBuf::from)),
                action_timeout_secs,
            },
        })
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.server.addr.is_empty() {
            return Err(crate::Error::Config("SERVER_ADDR must not be empty".to_string()));
        }
        if self.remediation.action_timeout_secs == 0 {
            return Err(crate::Error::Config(
                "action timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                addr: DEFAULT_SERVER_ADDR.to_string(),
            },
            remediation: RemediationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::dispatch::DEFAULT_ACTION_TIMEOUT;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr, "0.0.0.0:5001");
        assert_eq!(config.remediation.action_timeout(), Duration::from_secs(30));
        assert_eq!(config.remediation.action_timeout(), DEFAULT_ACTION_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_vars_reads_environment() {
        let config = Config::from_vars(
            vars(&[
                ("SERVER_ADDR", "127.0.0.1:9000"),
                ("REMEDIATION_CONFIG", "/etc/remediator/table.yaml"),
                ("ACTION_TIMEOUT_SECS", "12"),
            ]),
            Overrides::default(),
        )
        .unwrap();

        assert_eq!(config.server.addr, "127.0.0.1:9000");
        assert_eq!(
            config.remediation.config_path,
            Some(PathBuf::from("/etc/remediator/table.yaml"))
        );
        assert_eq!(config.remediation.action_timeout_secs, 12);
    }

    #[test]
    fn test_unset_environment_uses_defaults() {
        let config = Config::from_vars(vars(&[("REMEDIATION_CONFIG", "")]), Overrides::default()).unwrap();
        assert_eq!(config.server.addr, DEFAULT_SERVER_ADDR);
        assert_eq!(config.remediation.config_path, None);
        assert_eq!(config.remediation.action_timeout_secs, DEFAULT_ACTION_TIMEOUT_SECS);
    }

    #[test]
    fn test_non_integer_timeout_is_rejected() {
        let result = Config::from_vars(vars(&[("ACTION_TIMEOUT_SECS", "abc")]), Overrides::default());
        assert!(matches!(result, Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_cli_overrides_replace_bad_environment() {
        let overrides = Overrides {
            addr: Some("0.0.0.0:8080".to_string()),
            remediations: Some(PathBuf::from("config/remediations.yaml")),
            action_timeout_secs: Some(10),
        };
        let config = Config::from_vars(
            vars(&[
                ("SERVER_ADDR", ""),
                ("REMEDIATION_CONFIG", "/missing.yaml"),
                ("ACTION_TIMEOUT_SECS", "abc"),
            ]),
            overrides,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.server.addr, "0.0.0.0:8080");
        assert_eq!(
            config.remediation.config_path,
            Some(PathBuf::from("config/remediations.yaml"))
        );
        assert_eq!(config.remediation.action_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_cli_timeout_rescues_zero_environment_value() {
        let bare = Config::from_vars(vars(&[("ACTION_TIMEOUT_SECS", "0")]), Overrides::default()).unwrap();
        assert!(bare.validate().is_err());

        let overrides = Overrides {
            action_timeout_secs: Some(10),
            ..Default::default()
        };
        let config = Config::from_vars(vars(&[("ACTION_TIMEOUT_SECS", "0")]), overrides).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.remediation.action_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(crate::Error::Config(_))));
    }

    #[test]
    fn test_builtin_registry_without_path() {
        let registry = RemediationConfig::default().load_registry().unwrap();
        assert!(registry.lookup("HighCPUUsage").is_some());
    }

    #[test]
    fn test_missing_registry_file_fails() {
        let config = RemediationConfig {
            config_path: Some(PathBuf::from("/nonexistent/remediations.yaml")),
            ..Default::default()
        };
        assert!(config.load_registry().is_err());
    }
}
