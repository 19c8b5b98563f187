use std::path::PathBuf;

use config::Config;

use super::sheets_config::{CredentialSource, SpreadsheetConfig};

pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] =
    ["https://aryanxpatel.github.io", "http://localhost:19006"];

/// Process configuration, read once at startup from an optional config file
/// (`CONFIG_PATH`, default `Config`) and then from the environment.
#[derive(serde::Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub google_service_account: Option<String>,
    #[serde(default)]
    pub service_account_key_path: Option<PathBuf>,
    #[serde(default)]
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma separated list of origins allowed by CORS.
    #[serde(default)]
    pub allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "Config".to_string());
        let config = Config::builder()
            .add_source(config::File::with_name(&config_path).required(false))
            .add_source(config::Environment::default())
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, config::ConfigError> {
        config.try_deserialize()
    }

    /// Spreadsheet settings with empty values treated as unset and the
    /// credential precedence applied.
    pub fn sheets(&self) -> SpreadsheetConfig {
        let key_file = self
            .service_account_key_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty());

        SpreadsheetConfig {
            spreadsheet_id: non_empty(self.spreadsheet_id.as_deref()).map(Into::into),
            credentials: CredentialSource::select(
                non_empty(self.google_service_account.as_deref()),
                key_file,
            ),
        }
    }

    pub fn allowed_origins(&self) -> Vec<String> {
        match non_empty(self.allowed_origins.as_deref()) {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|origin| origin.to_string())
                .collect(),
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("credentials", &self.sheets().credentials)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(overrides: &[(&str, &str)]) -> AppConfig {
        let mut builder = Config::builder();
        for (key, value) in overrides {
            builder = builder.set_override(*key, *value).unwrap();
        }
        AppConfig::from_config(builder.build().unwrap()).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.sheets().spreadsheet_id.is_none());
        assert!(config.sheets().credentials.is_none());
        assert_eq!(config.allowed_origins(), DEFAULT_ALLOWED_ORIGINS.to_vec());
    }

    #[test]
    fn test_port_from_string() {
        let config = config_with(&[("port", "8080")]);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_empty_spreadsheet_id_is_missing() {
        let config = config_with(&[("spreadsheet_id", "  ")]);
        assert!(config.sheets().spreadsheet_id.is_none());
    }

    #[test]
    fn test_inline_credentials_take_precedence() {
        let config = config_with(&[
            ("google_service_account", "{\"type\":\"service_account\"}"),
            ("service_account_key_path", "/etc/key.json"),
            ("spreadsheet_id", "abc123"),
        ]);
        let sheets = config.sheets();
        assert_eq!(sheets.spreadsheet_id.as_deref(), Some("abc123"));
        assert!(matches!(
            sheets.credentials,
            Some(CredentialSource::Inline(_))
        ));
    }

    #[test]
    fn test_empty_inline_falls_back_to_key_file() {
        let config = config_with(&[
            ("google_service_account", ""),
            ("service_account_key_path", "/etc/key.json"),
        ]);
        assert_eq!(
            config.sheets().credentials,
            Some(CredentialSource::KeyFile(PathBuf::from("/etc/key.json")))
        );
    }

    #[test]
    fn test_allowed_origins_from_list() {
        let config = config_with(&[(
            "allowed_origins",
            "https://a.example, https://b.example,",
        )]);
        assert_eq!(
            config.allowed_origins(),
            vec!["https://a.example".to_string(), "https://b.example".to_string()]
        );
    }

    #[test]
    fn test_debug_hides_inline_key() {
        let config = config_with(&[("google_service_account", "{\"private_key\":\"secret\"}")]);
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
