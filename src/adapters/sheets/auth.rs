use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use thiserror::Error;
use tracing::instrument;

use crate::config::sheets_config::CredentialSource;

use super::http_client::{HttpClient, HttpsConnector};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("No credentials provided")]
    NoCredentials,
    #[error("Inline service account key is not valid")]
    InvalidInlineKey,
    #[error("Could not read service account key file")]
    UnreadableKeyFile,
    #[error("Could not create an authenticator")]
    AuthenticatorBuild,
}

/// Loads the service account key from the configured source. Touches the
/// filesystem at most, never the network.
#[instrument]
pub async fn service_account_key(
    source: Option<&CredentialSource>,
) -> error_stack::Result<oauth2::ServiceAccountKey, CredentialError> {
    match source {
        Some(CredentialSource::Inline(json)) => oauth2::parse_service_account_key(json.as_bytes())
            .change_context(CredentialError::InvalidInlineKey),
        Some(CredentialSource::KeyFile(path)) => oauth2::read_service_account_key(path)
            .await
            .change_context(CredentialError::UnreadableKeyFile)
            .attach_printable_lazy(|| format!("Key file: {}", path.display())),
        None => Err(report!(CredentialError::NoCredentials)),
    }
}

/// Builds the authenticator. Tokens are fetched lazily on the first API call.
pub async fn auth(
    key: oauth2::ServiceAccountKey,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, CredentialError> {
    let client_email = key.client_email.clone();
    oauth2::ServiceAccountAuthenticator::with_client(key, client)
        .build()
        .await
        .change_context(CredentialError::AuthenticatorBuild)
        .attach_printable_lazy(|| format!("Service account: {}", client_email))
}
