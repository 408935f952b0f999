use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use super::Server;
use crate::{dispatch::DispatchReport, metrics, sources::parse_webhook, Result};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn webhook(
    State(server): State<Arc<Server>>,
    body: Bytes,
) -> Result<Json<DispatchReport>> {
    debug!("Received webhook: {}", String::from_utf8_lossy(&body));

    let alerts = parse_webhook(&body)?.into_alerts();
    metrics::ALERTS_RECEIVED_TOTAL.inc_by(alerts.len() as u64);

    let report = server.engine.dispatch(&alerts).await;
    Ok(Json(report))
}

pub async fn prometheus_metrics() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(e) => e.into_response(),
    }
}
