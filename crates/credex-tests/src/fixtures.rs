//! Test fixtures for creating sample data.

use credex_core::{AwsParams, GitHubAppParams, IdTokenRequest, PipelineFacts, Secret};

pub const REPOSITORY: &str = "octo-org/octo-repo";
pub const SHA: &str = "e83c5163316f89bfbde7d9ab23ca2e25604af290";
pub const REQUEST_TOKEN: &str = "runner-request-token";
pub const ID_TOKEN: &str = "eyJhbGciOiJSUzI1NiJ9.payload.signature";
pub const ROLE_ARN: &str = "arn:aws:iam::123456789012:role/deploy";

/// Factory for pipeline facts.
pub struct FactsFixture;

impl FactsFixture {
    /// Facts for a push build on `main`, without OIDC.
    pub fn push(api_url: &str) -> PipelineFacts {
        PipelineFacts {
            repository: Some(REPOSITORY.to_string()),
            sha: Some(SHA.to_string()),
            workflow: Some("deploy".to_string()),
            run_id: Some("1658821493".to_string()),
            actor: Some("octocat".to_string()),
            git_ref: Some("refs/heads/main".to_string()),
            api_url: Some(api_url.to_string()),
            id_token_request: None,
        }
    }

    /// Push facts with the runner's OIDC endpoint at `id_token_url`.
    pub fn push_with_oidc(api_url: &str, id_token_url: &str) -> PipelineFacts {
        PipelineFacts {
            id_token_request: Some(IdTokenRequest {
                url: id_token_url.to_string(),
                token: Secret::new(REQUEST_TOKEN),
            }),
            ..Self::push(api_url)
        }
    }
}

/// Factory for invocation parameters.
pub struct ParamsFixture;

impl ParamsFixture {
    pub fn github_app(endpoint: &str) -> GitHubAppParams {
        GitHubAppParams {
            provider_endpoint: endpoint.to_string(),
            audience: "https://github-app.shogo82148.com/42".to_string(),
            github_token: None,
            repositories: vec![],
        }
    }

    pub fn aws(endpoint: &str) -> AwsParams {
        AwsParams {
            provider_endpoint: endpoint.to_string(),
            audience: "sts.amazonaws.com".to_string(),
            github_token: None,
            role_to_assume: ROLE_ARN.to_string(),
            role_session_name: "GitHubActions".to_string(),
            duration_seconds: 3600,
            region: "us-east-1".to_string(),
            role_session_tagging: true,
            use_node_id: false,
            obfuscate_repository: String::new(),
        }
    }
}
