//! Invocation parameters supplied by the calling workflow step.

use crate::secrets::Secret;
use crate::{Error, Result};

/// Parameters for issuing a GitHub App installation token.
#[derive(Debug, Clone)]
pub struct GitHubAppParams {
    pub provider_endpoint: String,
    pub audience: String,
    /// Pre-existing workflow token, used only when OIDC is unavailable.
    pub github_token: Option<Secret>,
    /// Repository identifiers the token should be scoped to.
    pub repositories: Vec<String>,
}

/// Parameters for assuming an AWS IAM role through the broker.
#[derive(Debug, Clone)]
pub struct AwsParams {
    pub provider_endpoint: String,
    pub audience: String,
    pub github_token: Option<Secret>,
    pub role_to_assume: String,
    pub role_session_name: String,
    pub duration_seconds: u32,
    pub region: String,
    pub role_session_tagging: bool,
    pub use_node_id: bool,
    /// Salt used by the broker to obfuscate the repository name; empty disables it.
    pub obfuscate_repository: String,
}

/// Smallest session duration STS accepts.
pub const MIN_ROLE_DURATION_SECONDS: u32 = 900;
/// Largest session duration STS accepts.
pub const MAX_ROLE_DURATION_SECONDS: u32 = 43200;

impl AwsParams {
    pub fn validate(&self) -> Result<()> {
        if self.role_to_assume.is_empty() {
            return Err(Error::InvalidInput("`role-to-assume` is required".to_string()));
        }
        if self.region.is_empty() {
            return Err(Error::InvalidInput("`aws-region` is required".to_string()));
        }
        if !(MIN_ROLE_DURATION_SECONDS..=MAX_ROLE_DURATION_SECONDS).contains(&self.duration_seconds) {
            return Err(Error::InvalidInput(format!(
                "`role-duration-seconds` must be between {} and {}, got {}",
                MIN_ROLE_DURATION_SECONDS, MAX_ROLE_DURATION_SECONDS, self.duration_seconds
            )));
        }
        Ok(())
    }
}
