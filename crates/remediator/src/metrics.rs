use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    pub static ref ALERTS_RECEIVED_TOTAL: IntCounter = register_int_counter!(
        "remediator_alerts_received_total",
        "Total number of alerts received on the webhook."
    )
    .unwrap();
    pub static ref ALERTS_SKIPPED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "remediator_alerts_skipped_total",
        "Firing alerts that produced no action, by reason.",
        &["reason"]
    )
    .unwrap();
    pub static ref ACTIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "remediator_actions_total",
        "Remediation actions attempted, by action kind and outcome.",
        &["action", "outcome"]
    )
    .unwrap();
}

pub fn record_action(action: &str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    ACTIONS_TOTAL.with_label_values(&[action, outcome]).inc();
}

pub fn record_skipped(reason: &str) {
    ALERTS_SKIPPED_TOTAL.with_label_values(&[reason]).inc();
}

// Function to gather metrics for exposition
pub fn gather_metrics() -> crate::Result<String> {
    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    encoder
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|e| crate::Error::Internal(format!("failed to encode metrics: {}", e)))?;
    String::from_utf8(buffer).map_err(|e| crate::Error::Internal(e.to_string()))
}
