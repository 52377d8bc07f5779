use super::IdentityService;
use crate::error::{ConsoleError, Result};
use crate::models::{Credentials, Identity};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_sts::Client as StsClient;
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_types::SdkConfig;
use chrono::{DateTime, Utc};

/// STS is global; any region works when the profile names none
const FALLBACK_REGION: &str = "us-east-1";

/// Identity service backed by the AWS SDK default provider chain and STS
pub struct StsIdentityService {
    region: Option<String>,
}

impl StsIdentityService {
    pub fn new(region: Option<String>) -> Self {
        Self { region }
    }

    async fn load_config(&self, profile: Option<&str>) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = profile.filter(|p| !p.is_empty()) {
            tracing::debug!("Loading AWS config for profile '{}'", profile);
            loader = loader.profile_name(profile);
        }

        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }

        loader.load().await
    }

    async fn sts_client(&self, profile: Option<&str>) -> StsClient {
        sts_client_for(&self.load_config(profile).await)
    }
}

fn sts_client_for(config: &SdkConfig) -> StsClient {
    let mut builder = aws_sdk_sts::config::Builder::from(config);

    if config.region().is_none() {
        tracing::debug!("No region configured, using {} for STS", FALLBACK_REGION);
        builder = builder.region(Region::from_static(FALLBACK_REGION));
    }

    StsClient::from_conf(builder.build())
}

fn smithy_to_chrono(dt: &aws_smithy_types::DateTime) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(dt.secs(), dt.subsec_nanos())
}

fn from_provided(creds: &aws_credential_types::Credentials) -> Credentials {
    let base = match creds.session_token() {
        Some(token) => {
            Credentials::temporary(creds.access_key_id(), creds.secret_access_key(), token)
        }
        None => Credentials::long_lived(creds.access_key_id(), creds.secret_access_key()),
    };
    base.with_expiration(creds.expiry().map(DateTime::<Utc>::from))
}

fn from_sts(creds: &aws_sdk_sts::types::Credentials) -> Credentials {
    Credentials::temporary(
        creds.access_key_id(),
        creds.secret_access_key(),
        creds.session_token(),
    )
    .with_expiration(smithy_to_chrono(creds.expiration()))
}

#[async_trait]
impl IdentityService for StsIdentityService {
    async fn get_caller_identity<'a>(&self, profile: Option<&'a str>) -> Result<Identity> {
        let client = self.sts_client(profile).await;

        let response = client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| ConsoleError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

        let arn = response
            .arn()
            .ok_or_else(|| ConsoleError::AwsSdk("No Arn in GetCallerIdentity response".to_string()))?
            .to_string();

        tracing::debug!("Caller identity: {}", arn);

        Ok(Identity {
            account: response.account().map(|s| s.to_string()),
            user_id: response.user_id().map(|s| s.to_string()),
            ..Identity::from_arn(arn)
        })
    }

    async fn retrieve_credentials<'a>(&self, profile: Option<&'a str>) -> Result<Credentials> {
        let config = self.load_config(profile).await;

        let provider = config.credentials_provider().ok_or_else(|| {
            ConsoleError::AwsConfig("no credentials provider configured".to_string())
        })?;

        let creds = provider
            .provide_credentials()
            .await
            .map_err(|e| ConsoleError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

        Ok(from_provided(&creds))
    }

    async fn get_session_token<'a>(
        &self,
        profile: Option<&'a str>,
        duration_seconds: i32,
    ) -> Result<Credentials> {
        let client = self.sts_client(profile).await;

        tracing::debug!("Requesting session token for {}s", duration_seconds);
        let response = client
            .get_session_token()
            .duration_seconds(duration_seconds)
            .send()
            .await
            .map_err(|e| ConsoleError::AwsSdk(DisplayErrorContext(&e).to_string()))?;

        let creds = response.credentials().ok_or_else(|| {
            ConsoleError::AwsSdk("STS GetSessionToken returned empty credentials".to_string())
        })?;

        Ok(from_sts(creds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_from_provided_keeps_session_token() {
        let expiry = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let provided = aws_credential_types::Credentials::new(
            "AKIA_TEST",
            "secret",
            Some("token".to_string()),
            Some(expiry),
            "test",
        );

        let creds = from_provided(&provided);
        assert_eq!(creds.access_key_id, "AKIA_TEST");
        assert_eq!(creds.secret_access_key, "secret");
        assert!(creds.has_session_token());
        assert_eq!(
            creds.expiration.map(|e| e.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn test_from_provided_long_lived_keys() {
        let provided =
            aws_credential_types::Credentials::new("AKIA_TEST", "secret", None, None, "test");

        let creds = from_provided(&provided);
        assert!(!creds.has_session_token());
        assert!(creds.expiration.is_none());
    }

    #[test]
    fn test_smithy_to_chrono() {
        let dt = aws_smithy_types::DateTime::from_secs(1_700_000_000);
        let converted = smithy_to_chrono(&dt).map(|d| d.timestamp());
        assert_eq!(converted, Some(1_700_000_000));
    }

    #[test]
    fn test_sts_client_region_fallback() {
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        let client = sts_client_for(&config);
        assert_eq!(
            client.config().region().map(|r| r.as_ref()),
            Some(FALLBACK_REGION)
        );
    }

    #[test]
    fn test_sts_client_keeps_configured_region() {
        let config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("eu-west-1"))
            .build();
        let client = sts_client_for(&config);
        assert_eq!(
            client.config().region().map(|r| r.as_ref()),
            Some("eu-west-1")
        );
    }
}
