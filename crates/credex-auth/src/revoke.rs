//! Post-job revocation of the issued installation token.
//!
//! Revocation is best effort: an unrevoked token simply expires on its own,
//! so nothing here is allowed to fail the job.

use crate::providers::{CLIENT_USER_AGENT, ProviderError};
use crate::publish::TOKEN_KEY;
use credex_core::{PipelineHost, Secret};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use tracing::{debug, info};

const GITHUB_V3_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Result of a revocation request that reached the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevokeOutcome {
    Revoked,
    Unexpected { status: StatusCode, body: String },
}

/// Send `DELETE {api_url}/installation/token` for `token`.
pub async fn revoke_token(
    client: &reqwest::Client,
    api_url: &str,
    token: &Secret,
) -> Result<RevokeOutcome, ProviderError> {
    let url = format!("{}/installation/token", api_url.trim_end_matches('/'));
    debug!(url = %url, "Revoking installation token");

    let response = client
        .delete(&url)
        .header(AUTHORIZATION, format!("token {}", token.expose()))
        .header(ACCEPT, GITHUB_V3_MEDIA_TYPE)
        .header(USER_AGENT, CLIENT_USER_AGENT)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::NO_CONTENT {
        return Ok(RevokeOutcome::Revoked);
    }

    let body = response.text().await?;
    Ok(RevokeOutcome::Unexpected { status, body })
}

/// Revoke the token persisted by the issuing step, if there is one.
///
/// Every failure is reported as a warning on `host`.
pub async fn cleanup(client: &reqwest::Client, api_url: &str, host: &dyn PipelineHost) {
    let Some(token) = host.get_state(TOKEN_KEY).filter(|t| !t.is_empty()) else {
        debug!("No persisted token, nothing to revoke");
        return;
    };
    let token = Secret::new(token);

    match revoke_token(client, api_url, &token).await {
        Ok(RevokeOutcome::Revoked) => info!("Installation token revoked"),
        Ok(RevokeOutcome::Unexpected { status, body }) => {
            host.warning(&format!("unexpected {}, {}", status.as_u16(), body));
        }
        Err(e) => host.warning(&e.to_string()),
    }
}
