//! Broker request bodies.

use credex_core::{AwsParams, GitHubAppParams, PipelineFacts, Result, Secret};
use serde::Serialize;

/// Request for a GitHub App installation token, authenticated by OIDC.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GitHubAppPayload {
    pub api_url: String,
    pub repository: String,
    pub sha: String,
    pub repositories: Vec<String>,
}

/// Request for a GitHub App installation token, authenticated by the
/// workflow token embedded in the body.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LegacyGitHubAppPayload {
    pub github_token: Secret,
    pub api_url: String,
    pub repository: String,
    pub sha: String,
}

/// Request for temporary AWS credentials.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AwsPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_token: Option<Secret>,
    pub role_to_assume: String,
    pub role_session_name: String,
    pub duration_seconds: u32,
    pub api_url: String,
    pub repository: String,
    pub use_node_id: bool,
    pub obfuscate_repository: String,
    pub sha: String,
    pub role_session_tagging: bool,
    pub run_id: String,
    pub workflow: String,
    pub actor: String,
    pub branch: String,
}

impl GitHubAppPayload {
    pub fn build(params: &GitHubAppParams, facts: &PipelineFacts) -> Result<Self> {
        Ok(Self {
            api_url: facts.api_url().to_string(),
            repository: facts.repository()?.to_string(),
            sha: facts.sha()?.to_string(),
            repositories: params.repositories.clone(),
        })
    }

    /// Convert into the body understood by brokers that authenticate with
    /// the workflow token. Those brokers scope the token to the calling
    /// repository only.
    pub fn with_github_token(self, github_token: Secret) -> LegacyGitHubAppPayload {
        LegacyGitHubAppPayload {
            github_token,
            api_url: self.api_url,
            repository: self.repository,
            sha: self.sha,
        }
    }
}

impl AwsPayload {
    pub fn build(params: &AwsParams, facts: &PipelineFacts) -> Result<Self> {
        Ok(Self {
            github_token: None,
            role_to_assume: params.role_to_assume.clone(),
            role_session_name: params.role_session_name.clone(),
            duration_seconds: params.duration_seconds,
            api_url: facts.api_url().to_string(),
            repository: facts.repository()?.to_string(),
            use_node_id: params.use_node_id,
            obfuscate_repository: params.obfuscate_repository.clone(),
            sha: facts.sha()?.to_string(),
            role_session_tagging: params.role_session_tagging,
            run_id: facts.run_id()?.to_string(),
            workflow: facts.workflow()?.to_string(),
            actor: facts.actor()?.to_string(),
            branch: facts.branch().to_string(),
        })
    }
}

/// Split a whitespace separated repository list. Empty or absent input
/// yields no repositories.
pub fn parse_repositories(input: Option<&str>) -> Vec<String> {
    input
        .map(|s| s.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}
