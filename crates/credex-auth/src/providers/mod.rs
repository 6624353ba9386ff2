//! Broker token exchange implementations.

pub mod aws;
pub mod github_app;

use async_trait::async_trait;
use credex_core::Secret;
use reqwest::StatusCode;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Message reported when a rejection carries no usable explanation.
pub const UNKNOWN_ERROR: &str = "unknown error";

pub(crate) const CLIENT_USER_AGENT: &str = concat!("credex/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse broker response: {0}")]
    Decode(String),
}

impl From<ProviderError> for credex_core::Error {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Http(e) => credex_core::Error::Network(e.to_string()),
            ProviderError::Decode(msg) => credex_core::Error::Serialization(msg),
        }
    }
}

/// Body of a non-OK broker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Broker reply, discriminated by HTTP status before the body is decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerResponse<T> {
    Success(T),
    Rejected(ErrorRecord),
}

impl<T> BrokerResponse<T> {
    /// Turn a rejection into the user-facing failure.
    pub fn into_result(self) -> credex_core::Result<T> {
        match self {
            BrokerResponse::Success(credentials) => Ok(credentials),
            BrokerResponse::Rejected(record) => {
                Err(credex_core::Error::BrokerRejected(record.message))
            }
        }
    }
}

/// Informational fields a success record may carry alongside credentials.
pub trait BrokerNotice {
    fn message(&self) -> Option<&str>;
    fn warning(&self) -> Option<&str>;
}

/// Exchange a bearer credential for a broker-issued credential.
#[async_trait]
pub trait TokenExchangeProvider: Send + Sync {
    type Credentials: Send;

    /// Perform the single broker round trip.
    async fn exchange(
        &self,
        bearer: &Secret,
    ) -> Result<BrokerResponse<Self::Credentials>, ProviderError>;
}

/// Thin JSON-over-HTTPS client shared by the providers.
#[derive(Clone)]
pub struct BrokerClient {
    client: reqwest::Client,
}

impl BrokerClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// POST `payload` to `endpoint` with `bearer` in the Authorization header.
    pub async fn post<P, T>(
        &self,
        endpoint: &str,
        payload: &P,
        bearer: &Secret,
    ) -> Result<BrokerResponse<T>, ProviderError>
    where
        P: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        debug!(endpoint, "Sending credential request to broker");

        let response = self
            .client
            .post(endpoint)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .bearer_auth(bearer.expose())
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), "Broker responded");
        decode_response(status, &body)
    }
}

/// Decode a broker body according to its status code. Only `200 OK` is a
/// success; everything else is a rejection.
pub fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<BrokerResponse<T>, ProviderError> {
    if status != StatusCode::OK {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| UNKNOWN_ERROR.to_string());
        return Ok(BrokerResponse::Rejected(ErrorRecord { message }));
    }

    serde_json::from_slice(body)
        .map(BrokerResponse::Success)
        .map_err(|e| ProviderError::Decode(e.to_string()))
}
