use serde::{Deserialize, Serialize};
use std::fmt;

/// Node name that defers node selection to the alert's `instance` label.
pub const AUTO_DETECT_NODE: &str = "auto-detect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    ScaleDeployment,
    RestartDeployment,
    RestartPod,
    CleanupLogs,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::ScaleDeployment => write!(f, "scale_deployment"),
            ActionKind::RestartDeployment => write!(f, "restart_deployment"),
            ActionKind::RestartPod => write!(f, "restart_pod"),
            ActionKind::CleanupLogs => write!(f, "cleanup_logs"),
        }
    }
}

/// Remediation bound to an alert name.
///
/// Only the parameters known ahead of time live here. Anything that has to
/// come from the alert itself (the crashing pod, the affected node) is
/// resolved at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RemediationSpec {
    ScaleDeployment {
        deployment: String,
        namespace: String,
        replicas: i32,
    },
    RestartDeployment {
        deployment: String,
        namespace: String,
    },
    RestartPod {
        namespace: String,
    },
    CleanupLogs {
        #[serde(default = "default_node")]
        node: String,
    },
}

fn default_node() -> String {
    AUTO_DETECT_NODE.to_string()
}

impl RemediationSpec {
    pub fn kind(&self) -> ActionKind {
        match self {
            RemediationSpec::ScaleDeployment { .. } => ActionKind::ScaleDeployment,
            RemediationSpec::RestartDeployment { .. } => ActionKind::RestartDeployment,
            RemediationSpec::RestartPod { .. } => ActionKind::RestartPod,
            RemediationSpec::CleanupLogs { .. } => ActionKind::CleanupLogs,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let require = |field: &str, value: &str| {
            if value.trim().is_empty() {
                Err(format!("{} action requires a non-empty {}", self.kind(), field))
            } else {
                Ok(())
            }
        };

        match self {
            RemediationSpec::ScaleDeployment { deployment, namespace, replicas } => {
                require("deployment", deployment)?;
                require("namespace", namespace)?;
                if *replicas < 0 {
                    return Err(format!("replica count must not be negative, got {}", replicas));
                }
            }
            RemediationSpec::RestartDeployment { deployment, namespace } => {
                require("deployment", deployment)?;
                require("namespace", namespace)?;
            }
            RemediationSpec::RestartPod { namespace } => require("namespace", namespace)?,
            RemediationSpec::CleanupLogs { node } => require("node", node)?,
        }
        Ok(())
    }
}

/// A remediation with every parameter filled in, ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ScaleDeployment {
        deployment: String,
        namespace: String,
        replicas: i32,
    },
    RestartDeployment {
        deployment: String,
        namespace: String,
    },
    RestartPod {
        pod: String,
        namespace: String,
    },
    CleanupLogs {
        node: String,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::ScaleDeployment { .. } => ActionKind::ScaleDeployment,
            Action::RestartDeployment { .. } => ActionKind::RestartDeployment,
            Action::RestartPod { .. } => ActionKind::RestartPod,
            Action::CleanupLogs { .. } => ActionKind::CleanupLogs,
        }
    }

    /// Human readable summary reported back to the caller.
    pub fn description(&self) -> String {
        match self {
            Action::ScaleDeployment { deployment, replicas, .. } => {
                format!("Scaled {} to {} replicas", deployment, replicas)
            }
            Action::RestartDeployment { deployment, .. } => {
                format!("Restarted deployment {}", deployment)
            }
            Action::RestartPod { pod, .. } => format!("Restarted pod {}", pod),
            Action::CleanupLogs { node } => format!("Cleaned logs on {} (simulated)", node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_deserializes_from_tagged_yaml() {
        let yaml = "action: scale_deployment\ndeployment: demo-app\nnamespace: default\nreplicas: 5\n";
        let spec: RemediationSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            spec,
            RemediationSpec::ScaleDeployment {
                deployment: "demo-app".to_string(),
                namespace: "default".to_string(),
                replicas: 5,
            }
        );
        assert_eq!(spec.kind(), ActionKind::ScaleDeployment);
    }

    #[test]
    fn test_cleanup_node_defaults_to_auto_detect() {
        let spec: RemediationSpec = serde_yaml::from_str("action: cleanup_logs\n").unwrap();
        assert_eq!(spec, RemediationSpec::CleanupLogs { node: AUTO_DETECT_NODE.to_string() });
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<RemediationSpec, _> = serde_yaml::from_str("action: drain_node\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_negative_replicas() {
        let spec = RemediationSpec::ScaleDeployment {
            deployment: "demo-app".to_string(),
            namespace: "default".to_string(),
            replicas: -1,
        };
        assert!(spec.validate().unwrap_err().contains("negative"));
    }

    #[test]
    fn test_validate_rejects_blank_namespace() {
        let spec = RemediationSpec::RestartPod { namespace: " ".to_string() };
        assert!(spec.validate().unwrap_err().contains("namespace"));
    }

    #[test]
    fn test_action_descriptions() {
        let scale = Action::ScaleDeployment {
            deployment: "demo-app".to_string(),
            namespace: "default".to_string(),
            replicas: 5,
        };
        assert_eq!(scale.description(), "Scaled demo-app to 5 replicas");

        let pod = Action::RestartPod {
            pod: "demo-app-7d9f".to_string(),
            namespace: "default".to_string(),
        };
        assert_eq!(pod.description(), "Restarted pod demo-app-7d9f");
        assert_eq!(pod.kind().to_string(), "restart_pod");
    }
}
