use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::{
    config::DEFAULT_ACTION_TIMEOUT_SECS,
    kubernetes::ClusterControl,
    remediation::Action,
    Error, Result,
};

pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(DEFAULT_ACTION_TIMEOUT_SECS);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub output: String,
}

impl ActionOutcome {
    pub fn succeeded(output: impl Into<String>) -> Self {
        Self { success: true, output: output.into() }
    }

    pub fn failed(output: impl Into<String>) -> Self {
        Self { success: false, output: output.into() }
    }
}

/// Runs one resolved action against the cluster.
///
/// `execute` never fails: cluster errors and timeouts come back as an
/// unsuccessful `ActionOutcome` carrying the diagnostic text. Nothing is
/// rolled back or retried.
#[derive(Clone)]
pub struct ActionExecutor {
    cluster: Arc<dyn ClusterControl>,
    timeout: Duration,
}

impl ActionExecutor {
    pub fn new(cluster: Arc<dyn ClusterControl>) -> Self {
        Self::with_timeout(cluster, DEFAULT_ACTION_TIMEOUT)
    }

    pub fn with_timeout(cluster: Arc<dyn ClusterControl>, timeout: Duration) -> Self {
        Self { cluster, timeout }
    }

    pub async fn execute(&self, action: &Action) -> ActionOutcome {
        if let Action::CleanupLogs { node } = action {
            return Self::cleanup_logs(node);
        }

        match timeout(self.timeout, self.invoke(action)).await {
            Ok(Ok(output)) => {
                info!("{} succeeded: {}", action.kind(), output);
                ActionOutcome::succeeded(output)
            }
            Ok(Err(e)) => {
                warn!("{} failed: {}", action.kind(), e);
                ActionOutcome::failed(e.to_string())
            }
            Err(_) => {
                warn!("{} timed out after {:?}", action.kind(), self.timeout);
                ActionOutcome::failed(format!(
                    "{} timed out after {}s",
                    action.kind(),
                    self.timeout.as_secs_f64()
                ))
            }
        }
    }

    async fn invoke(&self, action: &Action) -> Result<String> {
        match action {
            Action::ScaleDeployment { deployment, namespace, replicas } => {
                self.cluster.scale_deployment(namespace, deployment, *replicas).await
            }
            Action::RestartDeployment { deployment, namespace } => {
                self.cluster.restart_deployment(namespace, deployment).await
            }
            Action::RestartPod { pod, namespace } => self.cluster.delete_pod(namespace, pod).await,
            Action::CleanupLogs { .. } => Err(Error::Internal(
                "cleanup_logs is not a cluster operation".into(),
            )),
        }
    }

    /// Placeholder for node log cleanup.
    ///
    /// STUB: no cleanup is performed and the cluster is never contacted. It
    /// always reports success so integrators can wire the alert up now; the
    /// output text says the run was simulated.
    fn cleanup_logs(node: &str) -> ActionOutcome {
        info!("Would clean logs on {}", node);
        ActionOutcome::succeeded(format!("Log cleanup simulated on {}", node))
    }
}
