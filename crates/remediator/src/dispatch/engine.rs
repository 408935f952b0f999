use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    dispatch::ActionExecutor,
    metrics,
    remediation::{Action, RemediationRegistry, RemediationSpec, AUTO_DETECT_NODE},
    sources::{classify, Alert},
};

pub const PROCESSED: &str = "processed";

/// Outcome of one remediation attempt. Only produced for firing alerts that
/// matched a registry entry and had every parameter the action needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    #[serde(rename = "alert")]
    pub alert_name: String,
    #[serde(rename = "action")]
    pub description: String,
    pub success: bool,
    pub output: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    pub status: String,
    pub actions: Vec<ActionResult>,
}

/// Why a matched alert was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingParameter(&'static str),
}

/// Fill in the alert-derived parameters of a remediation.
pub fn resolve(spec: &RemediationSpec, alert: &Alert) -> Result<Action, SkipReason> {
    let action = match spec {
        RemediationSpec::ScaleDeployment { deployment, namespace, replicas } => Action::ScaleDeployment {
            deployment: deployment.clone(),
            namespace: namespace.clone(),
            replicas: *replicas,
        },
        RemediationSpec::RestartDeployment { deployment, namespace } => Action::RestartDeployment {
            deployment: deployment.clone(),
            namespace: namespace.clone(),
        },
        RemediationSpec::RestartPod { namespace } => {
            let pod = alert.pod().ok_or(SkipReason::MissingParameter("pod"))?;
            Action::RestartPod {
                pod: pod.to_string(),
                namespace: namespace.clone(),
            }
        }
        RemediationSpec::CleanupLogs { node } => {
            let node = if node == AUTO_DETECT_NODE { alert.instance() } else { node.as_str() };
            Action::CleanupLogs { node: node.to_string() }
        }
    };
    Ok(action)
}

/// Classifies a batch, resolves each alert against the registry and runs the
/// resulting actions one after another in input order.
///
/// Holds no mutable state, so one engine can serve concurrent batches.
#[derive(Clone)]
pub struct DispatchEngine {
    registry: Arc<RemediationRegistry>,
    executor: ActionExecutor,
}

impl DispatchEngine {
    pub fn new(registry: Arc<RemediationRegistry>, executor: ActionExecutor) -> Self {
        Self { registry, executor }
    }

    pub async fn dispatch(&self, batch: &[Alert]) -> DispatchReport {
        let firing = classify(batch);
        info!(
            "Dispatching {} firing alerts out of {} received",
            firing.len(),
            batch.len()
        );

        let mut actions = Vec::with_capacity(firing.len());
        for alert in firing {
            if let Some(result) = self.dispatch_alert(alert).await {
                actions.push(result);
            }
        }

        DispatchReport {
            status: PROCESSED.to_string(),
            actions,
        }
    }

    async fn dispatch_alert(&self, alert: &Alert) -> Option<ActionResult> {
        info!("Processing alert: {} on {}", alert.name, alert.instance());

        let Some(spec) = self.registry.lookup(&alert.name) else {
            debug!("No remediation configured for {}", alert.name);
            metrics::record_skipped("unknown_alert");
            return None;
        };

        let action = match resolve(spec, alert) {
            Ok(action) => action,
            Err(SkipReason::MissingParameter(label)) => {
                warn!(
                    "Skipping {} for alert {}: missing '{}' label",
                    spec.kind(),
                    alert.name,
                    label
                );
                metrics::record_skipped("missing_parameter");
                return None;
            }
        };

        let outcome = self.executor.execute(&action).await;
        metrics::record_action(&action.kind().to_string(), outcome.success);

        Some(ActionResult {
            alert_name: alert.name.clone(),
            description: action.description(),
            success: outcome.success,
            output: outcome.output,
        })
    }
}
