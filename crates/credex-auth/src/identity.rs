//! Bearer credential resolution.
//!
//! The broker accepts either a freshly minted OIDC identity token or, for
//! older deployments, the job's own `GITHUB_TOKEN`. Only server-to-server
//! app tokens are acceptable in the latter case.

use crate::oidc;
use credex_core::{Error, PipelineFacts, PipelineHost, Result, Secret};
use tracing::debug;

const REMEDIATION: &str =
    "`github-token` must be `${{ github.token }}` or `${{ secrets.GITHUB_TOKEN }}`.";

/// Token families distinguishable by their four-character prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// `ghp_`
    PersonalAccess,
    /// `gho_`
    OAuthAccess,
    /// `ghu_`
    UserToServer,
    /// `ghs_`
    ServerToServer,
    /// `ghr_`
    Refresh,
    /// No recognised prefix; most likely an old-format personal access token.
    Unknown,
}

impl TokenClass {
    /// Classify a token by prefix. Returns `None` when the token is too short
    /// to carry a prefix.
    pub fn detect(token: &str) -> Option<Self> {
        if token.chars().count() < 4 {
            return None;
        }
        let class = match token.get(..4) {
            Some("ghp_") => TokenClass::PersonalAccess,
            Some("gho_") => TokenClass::OAuthAccess,
            Some("ghu_") => TokenClass::UserToServer,
            Some("ghs_") => TokenClass::ServerToServer,
            Some("ghr_") => TokenClass::Refresh,
            _ => TokenClass::Unknown,
        };
        Some(class)
    }

    fn description(self) -> &'static str {
        match self {
            TokenClass::PersonalAccess | TokenClass::Unknown => "Personal Access Token",
            TokenClass::OAuthAccess => "OAuth Access token",
            TokenClass::UserToServer => "GitHub App user-to-server token",
            TokenClass::ServerToServer => "GitHub App server-to-server token",
            TokenClass::Refresh => "GitHub App refresh token",
        }
    }
}

/// Check that a caller-supplied token is the job's own `GITHUB_TOKEN`.
pub fn validate_github_token(token: &str) -> Result<()> {
    match TokenClass::detect(token) {
        None => Err(Error::InvalidToken(
            "GITHUB_TOKEN has invalid format".to_string(),
        )),
        Some(TokenClass::ServerToServer) => Ok(()),
        Some(class) => Err(Error::InvalidToken(format!(
            "GITHUB_TOKEN looks like {}. {}",
            class.description(),
            REMEDIATION
        ))),
    }
}

/// The credential placed in the broker request's `Authorization` header.
#[derive(Debug, Clone)]
pub enum Bearer {
    /// OIDC token minted by the runner for the requested audience.
    IdToken(Secret),
    /// Validated workflow token (legacy brokers).
    WorkflowToken(Secret),
}

impl Bearer {
    pub fn secret(&self) -> &Secret {
        match self {
            Bearer::IdToken(token) | Bearer::WorkflowToken(token) => token,
        }
    }
}

/// Decide which credential to present to the broker.
///
/// Prefers an OIDC token whenever the runner can mint one. Falls back to the
/// supplied workflow token otherwise. With neither available a warning is
/// emitted and minting is attempted anyway, surfacing the runner's error.
pub async fn resolve_bearer(
    client: &reqwest::Client,
    facts: &PipelineFacts,
    audience: &str,
    github_token: Option<&Secret>,
    host: &dyn PipelineHost,
) -> Result<Bearer> {
    let workflow_token = github_token.filter(|t| !t.is_empty());

    if !facts.is_id_token_available() {
        if let Some(token) = workflow_token {
            validate_github_token(token.expose())?;
            host.info("GitHub Token is available.");
            return Ok(Bearer::WorkflowToken(token.clone()));
        }
        host.warning(
            "OIDC identity token is not available. Add `permissions: id-token: write` to the job.",
        );
    }

    debug!(audience, "Minting identity token");
    let token = oidc::mint_id_token(client, facts.id_token_request.as_ref(), audience).await?;
    host.mask_secret(token.expose());
    host.info(&format!("JWT issued by {} is available.", audience));
    Ok(Bearer::IdToken(token))
}
