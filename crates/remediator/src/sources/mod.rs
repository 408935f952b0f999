pub mod classifier;
pub mod webhook;

pub use classifier::classify;
pub use webhook::{parse_webhook, Alert, AlertManagerAlert, AlertManagerWebhook, AlertStatus};
