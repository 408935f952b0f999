use std::collections::HashMap;
use std::path::Path;
use tracing::info;

use super::spec::{RemediationSpec, AUTO_DETECT_NODE};
use crate::{Error, Result};

/// Read-only table of alert name to remediation.
///
/// Built once at startup and shared behind an `Arc`; there is no way to
/// mutate a registry after construction. Replacing the table means building
/// a new registry from a different source.
#[derive(Debug, Clone, Default)]
pub struct RemediationRegistry {
    entries: HashMap<String, RemediationSpec>,
}

impl RemediationRegistry {
    pub fn new(entries: HashMap<String, RemediationSpec>) -> Result<Self> {
        for (alert_name, spec) in &entries {
            if alert_name.is_empty() {
                return Err(Error::Config("remediation entry with empty alert name".into()));
            }
            spec.validate()
                .map_err(|e| Error::Config(format!("remediation for {}: {}", alert_name, e)))?;
        }
        Ok(Self { entries })
    }

    /// The mapping shipped with the service.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "HighCPUUsage".to_string(),
            RemediationSpec::ScaleDeployment {
                deployment: "demo-app".to_string(),
                namespace: "default".to_string(),
                replicas: 5,
            },
        );
        entries.insert(
            "HighMemoryUsage".to_string(),
            RemediationSpec::RestartDeployment {
                deployment: "demo-app".to_string(),
                namespace: "default".to_string(),
            },
        );
        entries.insert(
            "PodCrashLooping".to_string(),
            RemediationSpec::RestartPod {
                namespace: "default".to_string(),
            },
        );
        entries.insert(
            "HighDiskUsage".to_string(),
            RemediationSpec::CleanupLogs {
                node: AUTO_DETECT_NODE.to_string(),
            },
        );
        Self { entries }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let entries: HashMap<String, RemediationSpec> = serde_yaml::from_str(yaml)?;
        Self::new(entries)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_yaml_str(&contents)?;
        info!(
            "Loaded {} remediations from {}",
            registry.len(),
            path.display()
        );
        Ok(registry)
    }

    /// Exact, case-sensitive match on the alert name.
    pub fn lookup(&self, alert_name: &str) -> Option<&RemediationSpec> {
        self.entries.get(alert_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn alert_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
