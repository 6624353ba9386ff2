//! OIDC identity token minting through the runner.

use credex_core::facts::ACTIONS_ID_TOKEN_REQUEST_URL;
use credex_core::{Error, IdTokenRequest, Result, Secret};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;
use url::Url;

#[derive(Debug, Deserialize)]
struct IdTokenResponse {
    value: Option<String>,
}

/// Build the token request URL for `audience`.
pub fn id_token_url(base: &str, audience: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        Error::InvalidInput(format!("{} is not a valid URL: {}", ACTIONS_ID_TOKEN_REQUEST_URL, e))
    })?;
    if !audience.is_empty() {
        url.query_pairs_mut().append_pair("audience", audience);
    }
    Ok(url)
}

/// Ask the runner for an identity token scoped to `audience`.
///
/// One request, no retries. Fails with a configuration error when the job
/// was not granted `id-token: write`.
pub async fn mint_id_token(
    client: &reqwest::Client,
    request: Option<&IdTokenRequest>,
    audience: &str,
) -> Result<Secret> {
    let request = request
        .ok_or_else(|| Error::MissingEnvironment(ACTIONS_ID_TOKEN_REQUEST_URL.to_string()))?;
    let url = id_token_url(&request.url, audience)?;

    debug!(url = %url, "Requesting identity token from runner");

    let response = client
        .get(url)
        .bearer_auth(request.token.expose())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| Error::IdentityToken(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::IdentityToken(format!(
            "runner returned {}: {}",
            status.as_u16(),
            body
        )));
    }

    let body: IdTokenResponse = response
        .json()
        .await
        .map_err(|e| Error::IdentityToken(format!("failed to parse response: {}", e)))?;

    body.value
        .filter(|v| !v.is_empty())
        .map(Secret::new)
        .ok_or_else(|| Error::IdentityToken("response did not contain a token".to_string()))
}
