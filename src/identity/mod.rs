// Identity validation and credential resolution
mod sts;

pub use sts::StsIdentityService;

use crate::error::Result;
use crate::models::{Credentials, Identity};
use async_trait::async_trait;

/// Access to the caller's identity and credentials
///
/// `profile` selects a shared-config profile; `None` uses the default
/// provider chain.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verify the resolved credentials against STS
    async fn get_caller_identity<'a>(&self, profile: Option<&'a str>) -> Result<Identity>;

    /// Return whatever credentials the provider chain resolves
    async fn retrieve_credentials<'a>(&self, profile: Option<&'a str>) -> Result<Credentials>;

    /// Exchange long-lived credentials for temporary ones
    async fn get_session_token<'a>(
        &self,
        profile: Option<&'a str>,
        duration_seconds: i32,
    ) -> Result<Credentials>;
}
