// AWS Console federation and URL generation
use crate::config::Config;
use crate::error::{ConsoleError, Result};
use crate::models::Credentials;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Turns a credential bundle into a single-use console sign-in URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConsoleUrlBuilder: Send + Sync {
    async fn build_console_url(&self, creds: &Credentials, duration_seconds: i32)
        -> Result<String>;
}

#[derive(Debug, Deserialize)]
struct SigninTokenResponse {
    #[serde(rename = "SigninToken", default)]
    signin_token: String,
}

/// Client for the AWS federation endpoint
pub struct FederationClient {
    http: reqwest::Client,
    federation_url: String,
    destination: String,
    issuer: String,
}

impl FederationClient {
    pub fn new(
        federation_url: impl Into<String>,
        destination: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                ConsoleError::Federation(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            federation_url: federation_url.into(),
            destination: destination.into(),
            issuer: issuer.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.console.federation_url.clone(),
            config.destination(),
            config.console.issuer.clone(),
        )
    }

    /// Step 1: exchange the credentials for a sign-in token
    async fn request_signin_token(
        &self,
        creds: &Credentials,
        duration_seconds: i32,
    ) -> Result<String> {
        let session_json = json!({
            "sessionId": creds.access_key_id,
            "sessionKey": creds.secret_access_key,
            "sessionToken": creds.session_token.as_deref().unwrap_or_default(),
        });

        let session_string = session_json.to_string();
        let token_url = format!(
            "{}?Action=getSigninToken&SessionDuration={}&Session={}",
            self.federation_url,
            duration_seconds,
            urlencoding::encode(&session_string)
        );

        tracing::debug!("Requesting sign-in token from AWS federation endpoint");
        let response = self.http.get(&token_url).send().await?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ConsoleError::Federation(format!("failed to read federation response: {}", e))
        })?;

        if status != reqwest::StatusCode::OK {
            return Err(ConsoleError::Federation(format!(
                "federation endpoint returned HTTP {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let token_response: SigninTokenResponse = serde_json::from_str(&body).map_err(|e| {
            ConsoleError::Federation(format!("failed to parse signin token response: {}", e))
        })?;

        if token_response.signin_token.is_empty() {
            return Err(ConsoleError::Federation(
                "received empty signin token from federation endpoint".to_string(),
            ));
        }

        Ok(token_response.signin_token)
    }

    /// Step 2: build the login URL around the token
    fn login_url(&self, signin_token: &str) -> String {
        format!(
            "{}?Action=login&Issuer={}&Destination={}&SigninToken={}",
            self.federation_url,
            urlencoding::encode(&self.issuer),
            urlencoding::encode(&self.destination),
            urlencoding::encode(signin_token)
        )
    }
}

#[async_trait]
impl ConsoleUrlBuilder for FederationClient {
    async fn build_console_url(
        &self,
        creds: &Credentials,
        duration_seconds: i32,
    ) -> Result<String> {
        let signin_token = self.request_signin_token(creds, duration_seconds).await?;
        Ok(self.login_url(&signin_token))
    }
}
