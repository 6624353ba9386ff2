//! Ambient pipeline facts.
//!
//! Everything the runner tells us about the current job is read once, at the
//! process boundary, into an immutable [`PipelineFacts`]. Core logic never
//! touches the process environment directly.

use crate::secrets::Secret;
use crate::{Error, Result};

/// Default GitHub REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

pub const GITHUB_REPOSITORY: &str = "GITHUB_REPOSITORY";
pub const GITHUB_SHA: &str = "GITHUB_SHA";
pub const GITHUB_WORKFLOW: &str = "GITHUB_WORKFLOW";
pub const GITHUB_RUN_ID: &str = "GITHUB_RUN_ID";
pub const GITHUB_ACTOR: &str = "GITHUB_ACTOR";
pub const GITHUB_REF: &str = "GITHUB_REF";
pub const GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const ACTIONS_ID_TOKEN_REQUEST_TOKEN: &str = "ACTIONS_ID_TOKEN_REQUEST_TOKEN";
pub const ACTIONS_ID_TOKEN_REQUEST_URL: &str = "ACTIONS_ID_TOKEN_REQUEST_URL";

/// Runner-provided endpoint for minting OIDC identity tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdTokenRequest {
    pub url: String,
    pub token: Secret,
}

/// Facts about the running job, as exposed by the runner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineFacts {
    pub repository: Option<String>,
    pub sha: Option<String>,
    pub workflow: Option<String>,
    pub run_id: Option<String>,
    pub actor: Option<String>,
    pub git_ref: Option<String>,
    pub api_url: Option<String>,
    pub id_token_request: Option<IdTokenRequest>,
}

impl PipelineFacts {
    /// Read facts from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read facts through an arbitrary lookup. Empty values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let id_token_request = match (
            get(ACTIONS_ID_TOKEN_REQUEST_URL),
            get(ACTIONS_ID_TOKEN_REQUEST_TOKEN),
        ) {
            (Some(url), Some(token)) => Some(IdTokenRequest {
                url,
                token: Secret::new(token),
            }),
            _ => None,
        };

        Self {
            repository: get(GITHUB_REPOSITORY),
            sha: get(GITHUB_SHA),
            workflow: get(GITHUB_WORKFLOW),
            run_id: get(GITHUB_RUN_ID),
            actor: get(GITHUB_ACTOR),
            git_ref: get(GITHUB_REF),
            api_url: get(GITHUB_API_URL),
            id_token_request,
        }
    }

    pub fn repository(&self) -> Result<&str> {
        require(&self.repository, GITHUB_REPOSITORY)
    }

    pub fn sha(&self) -> Result<&str> {
        require(&self.sha, GITHUB_SHA)
    }

    pub fn workflow(&self) -> Result<&str> {
        require(&self.workflow, GITHUB_WORKFLOW)
    }

    pub fn run_id(&self) -> Result<&str> {
        require(&self.run_id, GITHUB_RUN_ID)
    }

    pub fn actor(&self) -> Result<&str> {
        require(&self.actor, GITHUB_ACTOR)
    }

    /// API base URL, without a trailing slash.
    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
    }

    /// Branch name derived from `GITHUB_REF`; tags and pull request refs are
    /// passed through unchanged.
    pub fn branch(&self) -> &str {
        match self.git_ref.as_deref() {
            Some(r) => r.strip_prefix("refs/heads/").unwrap_or(r),
            None => "",
        }
    }

    pub fn is_id_token_available(&self) -> bool {
        self.id_token_request.is_some()
    }
}

fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| Error::MissingEnvironment(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn facts(vars: &[(&str, &str)]) -> PipelineFacts {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PipelineFacts::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_required_facts() {
        let f = facts(&[(GITHUB_REPOSITORY, "acme/app"), (GITHUB_SHA, "abc123")]);
        assert_eq!(f.repository().unwrap(), "acme/app");
        assert_eq!(f.sha().unwrap(), "abc123");

        let err = f.run_id().unwrap_err();
        assert!(matches!(err, Error::MissingEnvironment(ref name) if name == GITHUB_RUN_ID));
    }

    #[test]
    fn test_empty_value_is_absent() {
        let f = facts(&[(GITHUB_REPOSITORY, "")]);
        assert!(f.repository().is_err());
    }

    #[test]
    fn test_api_url_default_and_override() {
        assert_eq!(facts(&[]).api_url(), "https://api.github.com");
        let f = facts(&[(GITHUB_API_URL, "https://ghe.example.com/api/v3/")]);
        assert_eq!(f.api_url(), "https://ghe.example.com/api/v3");
    }

    #[test]
    fn test_branch_from_ref() {
        assert_eq!(facts(&[(GITHUB_REF, "refs/heads/main")]).branch(), "main");
        assert_eq!(facts(&[(GITHUB_REF, "refs/tags/v1")]).branch(), "refs/tags/v1");
        assert_eq!(facts(&[]).branch(), "");
    }

    #[test]
    fn test_id_token_request_needs_both_values() {
        let only_url = facts(&[(ACTIONS_ID_TOKEN_REQUEST_URL, "https://runner/token")]);
        assert!(!only_url.is_id_token_available());

        let both = facts(&[
            (ACTIONS_ID_TOKEN_REQUEST_URL, "https://runner/token"),
            (ACTIONS_ID_TOKEN_REQUEST_TOKEN, "req"),
        ]);
        assert!(both.is_id_token_available());
        assert_eq!(both.id_token_request.unwrap().token.expose(), "req");
    }
}
