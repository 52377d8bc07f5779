// Credential resolution and console sign-in
use crate::auth::Authenticator;
use crate::browser::{BrowserLauncher, Delivery};
use crate::console::ConsoleUrlBuilder;
use crate::error::{ConsoleError, Result};
use crate::identity::IdentityService;
use crate::models::{Credentials, Identity};
use std::io::Write;
use std::sync::Arc;

/// The collaborators the sign-in flow talks to
pub struct Workflow {
    identity: Arc<dyn IdentityService>,
    federation: Arc<dyn ConsoleUrlBuilder>,
    authenticator: Option<Arc<dyn Authenticator>>,
    launcher: Arc<dyn BrowserLauncher>,
    session_duration: i32,
}

impl Workflow {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        federation: Arc<dyn ConsoleUrlBuilder>,
        launcher: Arc<dyn BrowserLauncher>,
        session_duration: i32,
    ) -> Self {
        Self {
            identity,
            federation,
            authenticator: None,
            launcher,
            session_duration,
        }
    }

    /// Enable the interactive login fallback
    pub fn with_authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Validate identity, resolve credentials, and open the console
    ///
    /// Status lines go to `out`; the login notice goes to `err`.
    pub async fn run(
        &self,
        profile: Option<&str>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        let identity = self.validate_identity(profile, err).await?;
        writeln!(out, "Authenticated as: {}", identity.arn)?;

        let creds = self.resolve_credentials(profile, out).await?;

        let login_url = self
            .federation
            .build_console_url(&creds, self.session_duration)
            .await
            .map_err(|e| ConsoleError::ConsoleUrl(Box::new(e)))?;

        writeln!(out, "{}", self.launcher.announce())?;
        out.flush()?;

        if self.launcher.open(&login_url)? == Delivery::Print {
            writeln!(out, "{}", login_url)?;
            out.flush()?;
        }

        Ok(())
    }

    async fn validate_identity(&self, profile: Option<&str>, err: &mut dyn Write) -> Result<Identity> {
        let first_error = match self.identity.get_caller_identity(profile).await {
            Ok(identity) => return Ok(identity),
            Err(e) => e,
        };

        tracing::debug!("GetCallerIdentity failed: {}", first_error);

        let Some(authenticator) = &self.authenticator else {
            return Err(ConsoleError::InvalidCredentials(Box::new(first_error)));
        };

        writeln!(err, "Credentials are not valid, attempting SSO login...")?;
        err.flush()?;

        // The login child holds the terminal until the user finishes
        let authenticator = Arc::clone(authenticator);
        let login_profile = profile.map(str::to_string);
        tokio::task::spawn_blocking(move || authenticator.login(login_profile.as_deref()))
            .await?
            .map_err(|e| ConsoleError::LoginFailed(Box::new(e)))?;

        self.identity
            .get_caller_identity(profile)
            .await
            .map_err(|e| ConsoleError::StillUnauthenticated(Box::new(e)))
    }

    async fn resolve_credentials(&self, profile: Option<&str>, out: &mut dyn Write) -> Result<Credentials> {
        let creds = self
            .identity
            .retrieve_credentials(profile)
            .await
            .map_err(|e| ConsoleError::CredentialRetrieval(Box::new(e)))?;

        if creds.has_session_token() {
            if creds.is_expired() {
                tracing::warn!("Resolved session credentials are already expired");
            }
            tracing::debug!("Using existing session credentials ({})", creds.expiration_display());
            return Ok(creds);
        }

        // Long-lived IAM user keys can't be federated directly
        writeln!(out, "No session token found, requesting temporary credentials...")?;

        let creds = self
            .identity
            .get_session_token(profile, self.session_duration)
            .await
            .map_err(|e| ConsoleError::TemporaryCredentials(Box::new(e)))?;

        tracing::debug!("Temporary credentials expire in {}", creds.expiration_display());
        Ok(creds)
    }
}
