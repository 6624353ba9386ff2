//! Issuance flows: resolve identity, call the broker once, publish.

use crate::identity::{self, Bearer};
use crate::payload::{AwsPayload, GitHubAppPayload};
use crate::providers::aws::AwsProvider;
use crate::providers::github_app::{GitHubAppProvider, GitHubAppRequest};
use crate::providers::{BrokerClient, TokenExchangeProvider};
use crate::publish;
use credex_core::{AwsParams, GitHubAppParams, PipelineFacts, PipelineHost, Result};
use tracing::info;

/// Obtain a GitHub App installation token and expose it as the `token` output.
pub async fn issue_github_app_token(
    client: &reqwest::Client,
    params: &GitHubAppParams,
    facts: &PipelineFacts,
    host: &dyn PipelineHost,
) -> Result<()> {
    // Payload first: missing ambient facts abort before any network call.
    let payload = GitHubAppPayload::build(params, facts)?;

    let bearer = identity::resolve_bearer(
        client,
        facts,
        &params.audience,
        params.github_token.as_ref(),
        host,
    )
    .await?;

    let request = match &bearer {
        Bearer::IdToken(_) => GitHubAppRequest::IdToken(payload),
        Bearer::WorkflowToken(token) => {
            GitHubAppRequest::WorkflowToken(payload.with_github_token(token.clone()))
        }
    };

    let provider = GitHubAppProvider::new(
        BrokerClient::new(client.clone()),
        &params.provider_endpoint,
        request,
    );
    let credentials = provider.exchange(bearer.secret()).await?.into_result()?;

    publish::report_notices(host, &credentials);
    publish::publish_github_token(host, &credentials)?;

    info!("GitHub App installation token issued");
    Ok(())
}

/// Obtain temporary AWS credentials and export them to the job.
pub async fn assume_aws_role(
    client: &reqwest::Client,
    params: &AwsParams,
    facts: &PipelineFacts,
    host: &dyn PipelineHost,
) -> Result<()> {
    params.validate()?;
    let mut payload = AwsPayload::build(params, facts)?;

    let bearer = identity::resolve_bearer(
        client,
        facts,
        &params.audience,
        params.github_token.as_ref(),
        host,
    )
    .await?;

    if let Bearer::WorkflowToken(token) = &bearer {
        payload.github_token = Some(token.clone());
    }

    let provider = AwsProvider::new(
        BrokerClient::new(client.clone()),
        &params.provider_endpoint,
        payload,
    );
    let credentials = provider.exchange(bearer.secret()).await?.into_result()?;

    publish::report_notices(host, &credentials);
    publish::publish_aws_credentials(host, &credentials, &params.region)?;

    info!(role_arn = %params.role_to_assume, "AWS role assumed");
    Ok(())
}
