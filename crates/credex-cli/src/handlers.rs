//! Command handlers.

use crate::commands::{AwsArgs, GitHubAppArgs};
use credex_core::{PipelineFacts, PipelineHost, Result};
use tracing::debug;

/// Issue a GitHub App installation token.
pub async fn github_app_token(args: GitHubAppArgs, host: &dyn PipelineHost) -> Result<()> {
    let params = args.into_params();
    let facts = PipelineFacts::from_env();
    debug!(endpoint = %params.provider_endpoint, audience = %params.audience, "issuing installation token");

    let client = reqwest::Client::new();
    credex_auth::issue_github_app_token(&client, &params, &facts, host).await
}

/// Assume an AWS role.
pub async fn aws_assume_role(args: AwsArgs, host: &dyn PipelineHost) -> Result<()> {
    let params = args.into_params();
    let facts = PipelineFacts::from_env();
    debug!(endpoint = %params.provider_endpoint, role_arn = %params.role_to_assume, "assuming role");

    let client = reqwest::Client::new();
    credex_auth::assume_aws_role(&client, &params, &facts, host).await
}

/// Revoke the token saved by an earlier `github-app-token` step.
///
/// Never fails the job; problems are reported as warnings.
pub async fn cleanup(host: &dyn PipelineHost) {
    let facts = PipelineFacts::from_env();
    let client = reqwest::Client::new();
    credex_auth::cleanup(&client, facts.api_url(), host).await;
}
