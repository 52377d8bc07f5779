use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The principal STS reports for the resolved credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub arn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Identity {
    pub fn from_arn(arn: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            account: None,
            user_id: None,
        }
    }
}

/// AWS credentials, either long-lived IAM user keys or temporary STS credentials
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Long-lived credentials with no session token
    pub fn long_lived(access_key_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret.into(),
            session_token: None,
            expiration: None,
        }
    }

    /// Temporary credentials carrying a session token
    pub fn temporary(
        access_key_id: impl Into<String>,
        secret: impl Into<String>,
        session_token: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret.into(),
            session_token: Some(session_token.into()),
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: Option<DateTime<Utc>>) -> Self {
        self.expiration = expiration;
        self
    }

    /// An empty session token counts as missing
    pub fn has_session_token(&self) -> bool {
        self.session_token
            .as_deref()
            .map(|t| !t.is_empty())
            .unwrap_or(false)
    }

    pub fn is_expired(&self) -> bool {
        self.expiration
            .map(|exp| Utc::now() >= exp)
            .unwrap_or(false)
    }

    pub fn expires_in_seconds(&self) -> Option<i64> {
        self.expiration
            .map(|exp| (exp - Utc::now()).num_seconds().max(0))
    }

    /// Format expiration time as human-readable string
    pub fn expiration_display(&self) -> String {
        let Some(total) = self.expires_in_seconds() else {
            return "unknown".to_string();
        };

        let mins = total / 60;
        let secs = total % 60;

        if mins >= 60 {
            format!("{}h {}m", mins / 60, mins % 60)
        } else if mins > 0 {
            format!("{}m {}s", mins, secs)
        } else if secs > 0 {
            format!("{}s", secs)
        } else {
            "EXPIRED".to_string()
        }
    }
}

// Secrets stay out of logs and panic messages
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "<redacted>"),
            )
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_has_session_token() {
        assert!(Credentials::temporary("AKIA", "secret", "token").has_session_token());
        assert!(!Credentials::long_lived("AKIA", "secret").has_session_token());
        assert!(!Credentials::temporary("AKIA", "secret", "").has_session_token());
    }

    #[test]
    fn test_credentials_expiration() {
        let creds = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() + Duration::minutes(30)));
        assert!(!creds.is_expired());
        assert!(creds.expires_in_seconds().unwrap_or(0) > 0);

        let expired = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() - Duration::minutes(1)));
        assert!(expired.is_expired());
        assert_eq!(expired.expiration_display(), "EXPIRED");
    }

    #[test]
    fn test_expiration_display() {
        let creds = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() + Duration::minutes(90) + Duration::seconds(30)));
        assert!(creds.expiration_display().starts_with("1h"));

        let no_expiry = Credentials::long_lived("AKIA", "secret");
        assert!(!no_expiry.is_expired());
        assert_eq!(no_expiry.expiration_display(), "unknown");
    }

    #[test]
    fn test_expiration_display_formats() {
        // A few seconds of slack so the clock moving mid-test can't change the unit
        let hours = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() + Duration::hours(12) + Duration::seconds(30)));
        assert_eq!(hours.expiration_display(), "12h 0m");

        let minutes = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() + Duration::seconds(250 + 5)));
        let display = minutes.expiration_display();
        assert!(display.starts_with("4m "), "got {}", display);
        assert!(display.ends_with('s'), "got {}", display);

        let seconds = Credentials::temporary("AKIA", "secret", "token")
            .with_expiration(Some(Utc::now() + Duration::seconds(30)));
        let display = seconds.expiration_display();
        assert!(display == "30s" || display == "29s", "got {}", display);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::temporary("AKIA_TEST", "super-secret", "session-token");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("AKIA_TEST"));
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("session-token"));
    }

    #[test]
    fn test_identity_from_arn() {
        let identity = Identity::from_arn("arn:aws:iam::123456789012:user/test");
        assert_eq!(identity.arn, "arn:aws:iam::123456789012:user/test");
        assert!(identity.account.is_none());
    }
}
