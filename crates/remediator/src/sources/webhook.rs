use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::{Error, Result};

pub const ALERTNAME_LABEL: &str = "alertname";
pub const INSTANCE_LABEL: &str = "instance";
pub const POD_LABEL: &str = "pod";
pub const UNKNOWN_INSTANCE: &str = "unknown";

// AlertManager webhook payload structures. Only `alerts[].status` and
// `alerts[].labels` are required; everything else Alertmanager sends is
// optional here.
#[derive(Debug, Deserialize, Serialize)]
pub struct AlertManagerWebhook {
    #[serde(default)]
    pub receiver: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub alerts: Vec<AlertManagerAlert>,
    #[serde(rename = "groupKey", default)]
    pub group_key: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct AlertManagerAlert {
    #[serde(deserialize_with = "status_or_unknown")]
    pub status: AlertStatus,
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub annotations: HashMap<String, String>,
    #[serde(default)]
    pub fingerprint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Firing,
    Resolved,
    /// Any other status value, including null or non-string ones. Never acted on.
    Unknown,
}

impl From<&str> for AlertStatus {
    fn from(s: &str) -> Self {
        match s {
            "firing" => AlertStatus::Firing,
            "resolved" => AlertStatus::Resolved,
            _ => AlertStatus::Unknown,
        }
    }
}

// The field itself must be present, but a value of the wrong type only
// disqualifies that one alert.
fn status_or_unknown<'de, D>(deserializer: D) -> std::result::Result<AlertStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().map(AlertStatus::from).unwrap_or(AlertStatus::Unknown))
}

/// An alert as seen by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub name: String,
    pub status: AlertStatus,
    pub labels: HashMap<String, String>,
}

impl Alert {
    pub fn new(name: impl Into<String>, status: AlertStatus) -> Self {
        let name = name.into();
        let mut labels = HashMap::new();
        labels.insert(ALERTNAME_LABEL.to_string(), name.clone());
        Self { name, status, labels }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn is_firing(&self) -> bool {
        self.status == AlertStatus::Firing
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn instance(&self) -> &str {
        self.label(INSTANCE_LABEL).unwrap_or(UNKNOWN_INSTANCE)
    }

    pub fn pod(&self) -> Option<&str> {
        self.label(POD_LABEL).filter(|p| !p.is_empty())
    }
}

impl From<AlertManagerAlert> for Alert {
    fn from(alert: AlertManagerAlert) -> Self {
        let name = alert.labels.get(ALERTNAME_LABEL).cloned().unwrap_or_default();
        Self {
            name,
            status: alert.status,
            labels: alert.labels,
        }
    }
}

impl AlertManagerWebhook {
    pub fn into_alerts(self) -> Vec<Alert> {
        self.alerts.into_iter().map(Alert::from).collect()
    }
}

/// Parse a raw webhook body. The whole batch is rejected if the body is not
/// a JSON object or any alert is missing its `status` or `labels`.
pub fn parse_webhook(body: &[u8]) -> Result<AlertManagerWebhook> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| Error::Payload(format!("invalid JSON body: {}", e)))?;

    if !value.is_object() {
        return Err(Error::Payload("webhook body must be a JSON object".into()));
    }

    serde_json::from_value(value)
        .map_err(|e| Error::Payload(format!("invalid webhook payload: {}", e)))
}
