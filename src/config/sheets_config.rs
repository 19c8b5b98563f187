use std::{fmt::Debug, path::PathBuf};

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Spreadsheet ID missing")]
    MissingSpreadsheetId,
}

/// Where the service account key comes from. Inline JSON wins over a key file
/// when both are configured.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    Inline(String),
    KeyFile(PathBuf),
}

impl CredentialSource {
    pub fn select(inline: Option<&str>, key_file: Option<PathBuf>) -> Option<Self> {
        match (inline, key_file) {
            (Some(json), _) => Some(CredentialSource::Inline(json.to_owned())),
            (None, Some(path)) => Some(CredentialSource::KeyFile(path)),
            (None, None) => None,
        }
    }
}

impl Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Inline(_) => write!(f, "Inline(<redacted>)"),
            CredentialSource::KeyFile(path) => write!(f, "KeyFile({})", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpreadsheetConfig {
    pub spreadsheet_id: Option<Box<str>>,
    pub credentials: Option<CredentialSource>,
}
