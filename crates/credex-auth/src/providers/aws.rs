//! AWS role assumption through the broker.

use super::{BrokerClient, BrokerNotice, BrokerResponse, ProviderError, TokenExchangeProvider};
use crate::payload::AwsPayload;
use async_trait::async_trait;
use credex_core::Secret;
use serde::Deserialize;
use tracing::debug;

/// Temporary AWS credentials issued by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AwsCredentials {
    pub access_key_id: Secret,
    pub secret_access_key: Secret,
    pub session_token: Secret,
    pub message: Option<String>,
    pub warning: Option<String>,
}

impl BrokerNotice for AwsCredentials {
    fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }
}

/// AWS assume-role broker.
pub struct AwsProvider {
    endpoint: String,
    payload: AwsPayload,
    broker: BrokerClient,
}

impl AwsProvider {
    pub fn new(broker: BrokerClient, endpoint: impl Into<String>, payload: AwsPayload) -> Self {
        Self {
            endpoint: endpoint.into(),
            payload,
            broker,
        }
    }
}

#[async_trait]
impl TokenExchangeProvider for AwsProvider {
    type Credentials = AwsCredentials;

    async fn exchange(
        &self,
        bearer: &Secret,
    ) -> Result<BrokerResponse<AwsCredentials>, ProviderError> {
        debug!(role_arn = %self.payload.role_to_assume, "Exchanging bearer token for AWS credentials");
        self.broker.post(&self.endpoint, &self.payload, bearer).await
    }
}
