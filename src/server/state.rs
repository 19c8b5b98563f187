use std::sync::Arc;

use crate::{
    adapters::sheets::google_sheets_gateway::GoogleSheetsGateway,
    config::sheets_config::{ConfigError, SpreadsheetConfig},
    ports::sheets_gateway::SheetsGateway,
};

pub struct AppState {
    pub spreadsheet_id: Option<Box<str>>,
    pub gateway: Arc<dyn SheetsGateway>,
}

impl AppState {
    pub fn new(config: SpreadsheetConfig) -> Arc<Self> {
        Arc::new(Self {
            spreadsheet_id: config.spreadsheet_id,
            gateway: Arc::new(GoogleSheetsGateway::new(config.credentials)),
        })
    }

    pub fn with_gateway(
        spreadsheet_id: Option<&str>,
        gateway: Arc<dyn SheetsGateway>,
    ) -> Arc<Self> {
        Arc::new(Self {
            spreadsheet_id: spreadsheet_id.map(Into::into),
            gateway,
        })
    }

    pub fn spreadsheet_id(&self) -> Result<&str, ConfigError> {
        self.spreadsheet_id
            .as_deref()
            .ok_or(ConfigError::MissingSpreadsheetId)
    }
}
