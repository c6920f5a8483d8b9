//! Google account access for calendar sync.
//!
//! Client credentials and OAuth tokens live in the OS keyring. The only
//! scope requested is `calendar.events`.

use super::keyring_store;
use super::oauth::{self, OAuthConfig, OAuthTokens};
use crate::error::OAuthError;

const SERVICE: &str = "google";
const CLIENT_ID_KEY: &str = "google_client_id";
const CLIENT_SECRET_KEY: &str = "google_client_secret";

pub const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Google OAuth credentials and token handling.
#[derive(Debug, Clone, Default)]
pub struct GoogleAuth {
    client_id: String,
    client_secret: String,
}

impl GoogleAuth {
    /// Load credentials from keyring. Empty strings if not stored yet.
    pub fn new() -> Self {
        let read = |key: &str| keyring_store::get(key).ok().flatten().unwrap_or_default();
        Self {
            client_id: read(CLIENT_ID_KEY),
            client_secret: read(CLIENT_SECRET_KEY),
        }
    }

    pub fn with_credentials(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Persist Google OAuth client credentials to the OS keyring.
    pub fn store_credentials(&self) -> Result<(), OAuthError> {
        keyring_store::set(CLIENT_ID_KEY, &self.client_id)?;
        keyring_store::set(CLIENT_SECRET_KEY, &self.client_secret)?;
        Ok(())
    }

    pub fn oauth_config(&self) -> OAuthConfig {
        OAuthConfig {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            scopes: vec![CALENDAR_EVENTS_SCOPE.to_string()],
            redirect_port: 19821,
        }
    }

    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    pub fn is_authenticated(&self) -> bool {
        load_tokens().is_some()
    }

    /// Run the browser flow and store the resulting tokens.
    pub async fn authenticate(&self) -> Result<(), OAuthError> {
        if !self.has_credentials() {
            return Err(OAuthError::CredentialsNotConfigured {
                service: SERVICE.to_string(),
            });
        }

        let tokens = oauth::authorize(&self.oauth_config()).await?;
        save_tokens(&tokens)?;
        tracing::info!("Google authentication stored in keyring");
        Ok(())
    }

    /// Remove stored tokens (client credentials are kept).
    pub fn disconnect(&self) -> Result<(), OAuthError> {
        keyring_store::delete(SERVICE)?;
        Ok(())
    }

    /// Return a valid access token, refreshing if expired.
    pub async fn access_token(&self) -> Result<String, OAuthError> {
        let tokens = load_tokens().ok_or_else(|| OAuthError::NotAuthenticated {
            service: SERVICE.to_string(),
        })?;

        if !oauth::is_expired(&tokens) {
            return Ok(tokens.access_token);
        }

        let refresh = tokens.refresh_token.as_deref().ok_or(OAuthError::TokenExpired)?;
        tracing::debug!("refreshing expired Google access token");
        let refreshed = oauth::refresh_token(&self.oauth_config(), refresh).await?;
        save_tokens(&refreshed)?;
        Ok(refreshed.access_token)
    }
}

fn load_tokens() -> Option<OAuthTokens> {
    keyring_store::get(SERVICE)
        .ok()
        .flatten()
        .and_then(|json| serde_json::from_str(&json).ok())
}

fn save_tokens(tokens: &OAuthTokens) -> Result<(), OAuthError> {
    keyring_store::set(SERVICE, &serde_json::to_string(tokens)?)?;
    Ok(())
}
