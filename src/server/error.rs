use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use error_stack::{FrameKind, Report};
use serde::Serialize;
use thiserror::Error;

use crate::{
    config::sheets_config::ConfigError, domain::sheets::write_request::ValidationError,
    ports::sheets_gateway::SheetsGatewayError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyOperation {
    Read,
    Update,
    Append,
}

impl ProxyOperation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            ProxyOperation::Read => "Failed to retrieve data",
            ProxyOperation::Update => "Update failed",
            ProxyOperation::Append => "Append failed",
        }
    }
}

/// Anything that went wrong while authenticating or talking to the
/// spreadsheet service. All causes share one response shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {details}", .operation.failure_message())]
pub struct UpstreamError {
    pub operation: ProxyOperation,
    pub details: String,
}

impl UpstreamError {
    /// `details` is the service's own error message when the Sheets API
    /// answered with one, otherwise the root cause's message.
    pub fn from_report(operation: ProxyOperation, report: &Report<SheetsGatewayError>) -> Self {
        let details = match report.downcast_ref::<google_sheets4::Error>() {
            Some(error) => api_error_message(error),
            None => report
                .frames()
                .filter_map(|frame| match frame.kind() {
                    FrameKind::Context(context) => Some(context.to_string()),
                    FrameKind::Attachment(_) => None,
                })
                .last()
                .unwrap_or_else(|| report.current_context().to_string()),
        };

        UpstreamError {
            operation,
            details: details.trim_end().to_string(),
        }
    }
}

fn api_error_message(error: &google_sheets4::Error) -> String {
    match error {
        google_sheets4::Error::BadRequest(body) => body["error"]["message"]
            .as_str()
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string()),
        _ => error.to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ProxyError::Config(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: error.to_string(),
                    details: None,
                },
            ),
            ProxyError::Validation(error) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: error.to_string(),
                    details: None,
                },
            ),
            ProxyError::Upstream(error) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: error.operation.failure_message().to_string(),
                    details: Some(error.details),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
