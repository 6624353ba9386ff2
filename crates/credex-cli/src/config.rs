//! Input defaults and conversion into invocation parameters.

use crate::commands::{AwsArgs, GitHubAppArgs};
use credex_auth::parse_repositories;
use credex_core::{AwsParams, GitHubAppParams, Secret};

/// Public GitHub App token broker.
pub const GITHUB_APP_DEFAULT_ENDPOINT: &str =
    "https://aznfkxv2k8.execute-api.us-east-1.amazonaws.com/";
/// Audience used when neither an audience nor an app ID is given.
pub const GITHUB_APP_DEFAULT_AUDIENCE: &str =
    "https://aznfkxv2k8.execute-api.us-east-1.amazonaws.com";
/// Audience prefix for per-app brokers; the app ID is appended.
pub const GITHUB_APP_AUDIENCE_PREFIX: &str = "https://github-app.shogo82148.com/";

/// Public AWS assume-role broker.
pub const AWS_DEFAULT_ENDPOINT: &str =
    "https://uw4qs7ndjj.execute-api.us-east-1.amazonaws.com/assume-role";
pub const AWS_DEFAULT_AUDIENCE: &str = "sts.amazonaws.com";
pub const DEFAULT_ROLE_SESSION_NAME: &str = "GitHubActions";
pub const DEFAULT_ROLE_DURATION_SECONDS: u32 = 3600;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl GitHubAppArgs {
    pub fn into_params(self) -> GitHubAppParams {
        let audience = match (non_empty(self.audience), non_empty(self.app_id)) {
            (Some(audience), _) => audience,
            (None, Some(app_id)) => format!("{}{}", GITHUB_APP_AUDIENCE_PREFIX, app_id.trim()),
            (None, None) => GITHUB_APP_DEFAULT_AUDIENCE.to_string(),
        };

        GitHubAppParams {
            provider_endpoint: non_empty(self.provider_endpoint)
                .unwrap_or_else(|| GITHUB_APP_DEFAULT_ENDPOINT.to_string()),
            audience,
            github_token: non_empty(self.github_token).map(Secret::new),
            repositories: parse_repositories(self.repositories.as_deref()),
        }
    }
}

impl AwsArgs {
    pub fn into_params(self) -> AwsParams {
        AwsParams {
            provider_endpoint: self.provider_endpoint,
            audience: self.audience,
            github_token: non_empty(self.github_token).map(Secret::new),
            role_to_assume: self.role_to_assume.trim().to_string(),
            role_session_name: self.role_session_name,
            duration_seconds: self.role_duration_seconds,
            region: self.aws_region.trim().to_string(),
            role_session_tagging: self.role_session_tagging,
            use_node_id: self.use_node_id,
            obfuscate_repository: self.obfuscate_repository,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Commands;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: Commands,
    }

    fn github_app(args: &[&str]) -> GitHubAppParams {
        let argv = ["credex", "github-app-token"].iter().chain(args);
        match TestCli::try_parse_from(argv).unwrap().command {
            Commands::GithubAppToken(args) => args.into_params(),
            _ => unreachable!(),
        }
    }

    fn aws(args: &[&str]) -> AwsParams {
        let argv = ["credex", "aws-assume-role"].iter().chain(args);
        match TestCli::try_parse_from(argv).unwrap().command {
            Commands::AwsAssumeRole(args) => args.into_params(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_github_app_audience_from_app_id() {
        let params = github_app(&["--app-id", "1234567890", "--repositories", "R_1 R_2"]);
        assert_eq!(params.audience, "https://github-app.shogo82148.com/1234567890");
        assert_eq!(params.provider_endpoint, GITHUB_APP_DEFAULT_ENDPOINT);
        assert_eq!(params.repositories, vec!["R_1", "R_2"]);
        assert!(params.github_token.is_none());
    }

    #[test]
    fn test_github_app_explicit_audience_wins() {
        let params = github_app(&["--app-id", "1", "--audience", "custom"]);
        assert_eq!(params.audience, "custom");
    }

    #[test]
    fn test_github_app_defaults() {
        let params = github_app(&["--github-token", "ghs_abc"]);
        assert_eq!(params.audience, GITHUB_APP_DEFAULT_AUDIENCE);
        assert!(params.repositories.is_empty());
        assert_eq!(params.github_token.unwrap().expose(), "ghs_abc");
    }

    #[test]
    fn test_aws_defaults_and_flags() {
        let params = aws(&[
            "--role-to-assume",
            "arn:aws:iam::123456789012:role/deploy",
            "--aws-region",
            "eu-west-1",
            "--use-node-id",
            "--role-session-tagging",
            "false",
        ]);
        assert_eq!(params.audience, AWS_DEFAULT_AUDIENCE);
        assert_eq!(params.provider_endpoint, AWS_DEFAULT_ENDPOINT);
        assert_eq!(params.role_session_name, "GitHubActions");
        assert_eq!(params.duration_seconds, 3600);
        assert!(params.use_node_id);
        assert!(!params.role_session_tagging);
        assert!(params.obfuscate_repository.is_empty());
    }
}
