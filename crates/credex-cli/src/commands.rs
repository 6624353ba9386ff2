//! CLI command definitions.
//!
//! Every argument also binds to the `INPUT_*` variable the Actions runner
//! sets for the corresponding action input.

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args, Subcommand};

use crate::config::{
    AWS_DEFAULT_AUDIENCE, AWS_DEFAULT_ENDPOINT, DEFAULT_ROLE_DURATION_SECONDS,
    DEFAULT_ROLE_SESSION_NAME,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Exchange the job identity for a GitHub App installation token
    GithubAppToken(GitHubAppArgs),

    /// Exchange the job identity for temporary AWS credentials
    AwsAssumeRole(AwsArgs),

    /// Revoke the installation token issued earlier in this job
    Cleanup,
}

#[derive(Args, Debug)]
pub struct GitHubAppArgs {
    /// Workflow token, used when OIDC is unavailable
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub App ID, used to derive the default audience
    #[arg(long, env = "INPUT_APP-ID")]
    pub app_id: Option<String>,

    /// Audience of the OIDC token
    #[arg(long, env = "INPUT_AUDIENCE")]
    pub audience: Option<String>,

    /// Broker endpoint
    #[arg(long, env = "INPUT_PROVIDER-ENDPOINT")]
    pub provider_endpoint: Option<String>,

    /// Whitespace separated repository IDs the token is scoped to
    #[arg(long, env = "INPUT_REPOSITORIES")]
    pub repositories: Option<String>,
}

#[derive(Args, Debug)]
pub struct AwsArgs {
    /// Workflow token, used when OIDC is unavailable
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Audience of the OIDC token
    #[arg(long, env = "INPUT_AUDIENCE", default_value = AWS_DEFAULT_AUDIENCE)]
    pub audience: String,

    /// Broker endpoint
    #[arg(long, env = "INPUT_PROVIDER-ENDPOINT", default_value = AWS_DEFAULT_ENDPOINT)]
    pub provider_endpoint: String,

    /// ARN of the IAM role to assume
    #[arg(long, env = "INPUT_ROLE-TO-ASSUME")]
    pub role_to_assume: String,

    /// Role session name
    #[arg(long, env = "INPUT_ROLE-SESSION-NAME", default_value = DEFAULT_ROLE_SESSION_NAME)]
    pub role_session_name: String,

    /// Session duration in seconds
    #[arg(long, env = "INPUT_ROLE-DURATION-SECONDS", default_value_t = DEFAULT_ROLE_DURATION_SECONDS)]
    pub role_duration_seconds: u32,

    /// AWS region exported as AWS_REGION and AWS_DEFAULT_REGION
    #[arg(long, env = "INPUT_AWS-REGION")]
    pub aws_region: String,

    /// Tag the role session with run metadata
    #[arg(
        long,
        env = "INPUT_ROLE-SESSION-TAGGING",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub role_session_tagging: bool,

    /// Identify the repository by node ID instead of name
    #[arg(
        long,
        env = "INPUT_USE-NODE-ID",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub use_node_id: bool,

    /// Salt for obfuscating the repository name in session tags
    #[arg(long, env = "INPUT_OBFUSCATE-REPOSITORY", default_value = "")]
    pub obfuscate_repository: String,
}
