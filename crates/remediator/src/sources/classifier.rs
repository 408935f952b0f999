use tracing::debug;

use super::webhook::Alert;

/// Keep only alerts that are firing and carry an alert name, in input order.
pub fn classify(batch: &[Alert]) -> Vec<&Alert> {
    batch
        .iter()
        .filter(|alert| {
            if !alert.is_firing() {
                debug!("Ignoring {:?} alert {}", alert.status, alert.name);
                return false;
            }
            if alert.name.is_empty() {
                debug!("Ignoring firing alert without alertname: {:?}", alert.labels);
                return false;
            }
            true
        })
        .collect()
}
