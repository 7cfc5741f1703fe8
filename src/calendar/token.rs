use crate::config::Config;
use crate::error::{calendar_api_error, Error, TriageResult};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// OAuth token as persisted on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: i64,
}

/// Manages the OAuth access token backing all calendar calls.
///
/// The token file is provisioned out of band; this only refreshes an
/// existing credential and rewrites the file. A rejected refresh grant
/// means the user has to re-authorize, surfaced as `Error::AuthExpired`.
#[derive(Clone)]
pub struct TokenManager {
    client: Client,
    client_id: String,
    client_secret: String,
    token_file: PathBuf,
}

impl TokenManager {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            client_id: config.google_client_id.clone(),
            client_secret: config.google_client_secret.clone(),
            token_file: config.token_file.clone(),
        }
    }

    /// Get a usable access token, refreshing the stored one if expired
    pub async fn access_token(&self) -> TriageResult<String> {
        let token = self.read_token()?;

        // Leave a minute of slack so a token does not expire mid-request
        if token.expires_at > Utc::now().timestamp() + 60 {
            return Ok(token.access_token);
        }

        debug!("stored access token expired, refreshing");
        let refreshed = self.refresh(&token).await?;
        Ok(refreshed.access_token)
    }

    fn read_token(&self) -> TriageResult<StoredToken> {
        let content = fs::read_to_string(&self.token_file).map_err(|_| Error::AuthExpired)?;
        serde_json::from_str(&content).map_err(|_| Error::AuthExpired)
    }

    async fn refresh(&self, token: &StoredToken) -> TriageResult<StoredToken> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("refresh_token", token.refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post("https://oauth2.googleapis.com/token")
            .form(&params)
            .send()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to refresh token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            if body.contains("invalid_grant") {
                return Err(Error::AuthExpired);
            }
            return Err(calendar_api_error(&format!(
                "Failed to refresh token: HTTP {} - {}",
                status, body
            )));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| calendar_api_error(&format!("Failed to parse token response: {}", e)))?;

        let access_token = reply
            .get("access_token")
            .and_then(|v| v.as_str())
            .ok_or_else(|| calendar_api_error("Token response missing 'access_token' field"))?;
        let expires_in = reply
            .get("expires_in")
            .and_then(|v| v.as_i64())
            .unwrap_or(3600);

        let refreshed = StoredToken {
            access_token: access_token.to_string(),
            refresh_token: token.refresh_token.clone(),
            expires_at: Utc::now().timestamp() + expires_in,
        };
        self.write_token(&refreshed)?;

        Ok(refreshed)
    }

    fn write_token(&self, token: &StoredToken) -> TriageResult<()> {
        let content = serde_json::to_string_pretty(token)
            .map_err(|e| calendar_api_error(&format!("Failed to serialize token: {}", e)))?;
        fs::write(&self.token_file, content)?;
        Ok(())
    }
}
