//! GitHub App installation token exchange.

use super::{BrokerClient, BrokerNotice, BrokerResponse, ProviderError, TokenExchangeProvider};
use crate::payload::{GitHubAppPayload, LegacyGitHubAppPayload};
use async_trait::async_trait;
use credex_core::Secret;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Installation token issued by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubAppCredentials {
    pub github_token: Secret,
    pub message: Option<String>,
    pub warning: Option<String>,
}

impl BrokerNotice for GitHubAppCredentials {
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

/// Body sent to the broker, depending on how the caller authenticated.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GitHubAppRequest {
    IdToken(GitHubAppPayload),
    WorkflowToken(LegacyGitHubAppPayload),
}

/// GitHub App token broker.
pub struct GitHubAppProvider {
    endpoint: String,
    request: GitHubAppRequest,
    broker: BrokerClient,
}

impl GitHubAppProvider {
    pub fn new(broker: BrokerClient, endpoint: impl Into<String>, request: GitHubAppRequest) -> Self {
        Self {
            endpoint: endpoint.into(),
            request,
            broker,
        }
    }
}

#[async_trait]
impl TokenExchangeProvider for GitHubAppProvider {
    type Credentials = GitHubAppCredentials;

    async fn exchange(
        &self,
        bearer: &Secret,
    ) -> Result<BrokerResponse<GitHubAppCredentials>, ProviderError> {
        debug!(endpoint = %self.endpoint, "Exchanging bearer token for GitHub App installation token");
        self.broker.post(&self.endpoint, &self.request, bearer).await
    }
}
