use serde_json::Value;
use thiserror::Error;

use crate::domain::sheets::value_matrix::ValueMatrix;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsGatewayError {
    #[error("Authentication unavailable")]
    AuthenticationUnavailable,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to append to range")]
    FailedToAppendRange,
    #[error("Failed to encode response payload")]
    MalformedResponse,
}

/// Values operations of the spreadsheet service. Every method returns the
/// service's response payload untouched.
#[async_trait::async_trait]
pub trait SheetsGateway: Send + Sync {
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<Value, SheetsGatewayError>;

    /// Replaces the cells of `range`, interpreting input as user-entered.
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: ValueMatrix,
    ) -> error_stack::Result<Value, SheetsGatewayError>;

    /// Inserts `values` as new rows after the data found in `range`.
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: ValueMatrix,
    ) -> error_stack::Result<Value, SheetsGatewayError>;
}
