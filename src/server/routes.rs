use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use error_stack::Report;
use serde_json::Value;
use tracing::{error, info};

use crate::{
    domain::sheets::write_request::{AppendRequest, UpdateRequest},
    ports::sheets_gateway::SheetsGatewayError,
};

use super::{
    error::{ProxyError, ProxyOperation, UpstreamError},
    state::AppState,
};

pub const LIVENESS_MESSAGE: &str = "Order Management App - DEMO API running";

pub async fn liveness_handler() -> &'static str {
    LIVENESS_MESSAGE
}

fn upstream(operation: ProxyOperation) -> impl FnOnce(Report<SheetsGatewayError>) -> ProxyError {
    move |report| {
        error!("❌ {}: {:?}", operation.failure_message(), report);
        UpstreamError::from_report(operation, &report).into()
    }
}

pub async fn read_handler(
    State(state): State<Arc<AppState>>,
    Path(range): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let spreadsheet_id = state.spreadsheet_id()?;

    let payload = state
        .gateway
        .get_values(spreadsheet_id, &range)
        .await
        .map_err(upstream(ProxyOperation::Read))?;

    Ok(Json(payload))
}

pub async fn update_handler(
    State(state): State<Arc<AppState>>,
    Path(range): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    let spreadsheet_id = state.spreadsheet_id()?;
    let request = UpdateRequest::parse(&body)?;

    info!(range = %range, rows = request.values.row_count(), "Updating range");
    let payload = state
        .gateway
        .update_values(spreadsheet_id, &range, request.values)
        .await
        .map_err(upstream(ProxyOperation::Update))?;

    Ok(Json(payload))
}

pub async fn append_handler(
    State(state): State<Arc<AppState>>,
    Path(sheet): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    let spreadsheet_id = state.spreadsheet_id()?;
    let request = AppendRequest::parse(&body)?;

    info!(
        sheet = %sheet,
        rows = request.values.row_count(),
        operation = %request.operation,
        "Appending rows"
    );
    let payload = state
        .gateway
        .append_values(spreadsheet_id, &sheet, request.values)
        .await
        .map_err(upstream(ProxyOperation::Append))?;

    Ok(Json(payload))
}
