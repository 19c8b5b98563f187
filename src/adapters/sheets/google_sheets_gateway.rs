use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{
    api::{Scope, ValueRange},
    Sheets,
};
use serde_json::Value;
use tracing::instrument;

use crate::{
    config::sheets_config::CredentialSource,
    domain::sheets::value_matrix::ValueMatrix,
    ports::sheets_gateway::{SheetsGateway, SheetsGatewayError},
};

use super::{
    auth,
    http_client::{self, HttpsConnector},
};

const USER_ENTERED: &str = "USER_ENTERED";
const INSERT_ROWS: &str = "INSERT_ROWS";

type Hub = Sheets<HttpsConnector>;

/// `SheetsGateway` backed by the Sheets v4 API. A fresh authenticated hub is
/// built for every call; nothing is cached between requests.
pub struct GoogleSheetsGateway {
    credentials: Option<CredentialSource>,
}

impl Debug for GoogleSheetsGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GoogleSheetsGateway {{ credentials: {:?} }}", self.credentials)
    }
}

impl GoogleSheetsGateway {
    pub fn new(credentials: Option<CredentialSource>) -> Self {
        GoogleSheetsGateway { credentials }
    }

    #[instrument]
    async fn hub(&self) -> error_stack::Result<Hub, SheetsGatewayError> {
        let key = auth::service_account_key(self.credentials.as_ref())
            .await
            .change_context(SheetsGatewayError::AuthenticationUnavailable)?;

        let client = http_client::http_client()
            .change_context(SheetsGatewayError::AuthenticationUnavailable)
            .attach_printable("Could not load root certificates")?;
        let authenticator = auth::auth(key, client.clone())
            .await
            .change_context(SheetsGatewayError::AuthenticationUnavailable)?;

        Ok(Sheets::new(client, authenticator))
    }
}

fn value_range(values: ValueMatrix) -> ValueRange {
    ValueRange {
        values: Some(values.into_rows()),
        ..Default::default()
    }
}

/// Unset optional fields of the typed responses serialize as `null`; the
/// service omits them, so they are dropped here too. Array elements are kept.
fn strip_null_fields(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            fields.retain(|_, field| !field.is_null());
            fields.values_mut().for_each(strip_null_fields);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_null_fields),
        _ => {}
    }
}

fn payload<T: serde::Serialize>(response: T) -> error_stack::Result<Value, SheetsGatewayError> {
    let mut value =
        serde_json::to_value(response).change_context(SheetsGatewayError::MalformedResponse)?;
    strip_null_fields(&mut value);
    Ok(value)
}

#[instrument(skip(hub))]
async fn read_range(
    hub: &Hub,
    spreadsheet_id: &str,
    range: &str,
) -> error_stack::Result<Value, SheetsGatewayError> {
    let (_, value_range) = hub
        .spreadsheets()
        .values_get(spreadsheet_id, range)
        .add_scope(Scope::Spreadsheet)
        .doit()
        .await
        .change_context(SheetsGatewayError::FailedToFetchRange)
        .attach_printable_lazy(|| format!("Failed to read range {}", range))?;

    payload(value_range)
}

#[instrument(skip(hub, values), fields(rows = values.row_count()))]
async fn write_range(
    hub: &Hub,
    spreadsheet_id: &str,
    range: &str,
    values: ValueMatrix,
) -> error_stack::Result<Value, SheetsGatewayError> {
    let (_, response) = hub
        .spreadsheets()
        .values_update(value_range(values), spreadsheet_id, range)
        .value_input_option(USER_ENTERED)
        .add_scope(Scope::Spreadsheet)
        .doit()
        .await
        .change_context(SheetsGatewayError::FailedToWriteRange)
        .attach_printable_lazy(|| format!("Failed to write to range {}", range))?;

    payload(response)
}

#[instrument(skip(hub, values), fields(rows = values.row_count()))]
async fn append_rows(
    hub: &Hub,
    spreadsheet_id: &str,
    range: &str,
    values: ValueMatrix,
) -> error_stack::Result<Value, SheetsGatewayError> {
    let (_, response) = hub
        .spreadsheets()
        .values_append(value_range(values), spreadsheet_id, range)
        .value_input_option(USER_ENTERED)
        .insert_data_option(INSERT_ROWS)
        .add_scope(Scope::Spreadsheet)
        .doit()
        .await
        .change_context(SheetsGatewayError::FailedToAppendRange)
        .attach_printable_lazy(|| format!("Failed to append to range {}", range))?;

    payload(response)
}

#[async_trait::async_trait]
impl SheetsGateway for GoogleSheetsGateway {
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> error_stack::Result<Value, SheetsGatewayError> {
        read_range(&self.hub().await?, spreadsheet_id, range).await
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: ValueMatrix,
    ) -> error_stack::Result<Value, SheetsGatewayError> {
        write_range(&self.hub().await?, spreadsheet_id, range, values).await
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: ValueMatrix,
    ) -> error_stack::Result<Value, SheetsGatewayError> {
        append_rows(&self.hub().await?, spreadsheet_id, range, values).await
    }
}
