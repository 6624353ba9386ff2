//! Ambient identity exchange for credex.
//!
//! This crate turns the identity a CI job already has (an OIDC token minted
//! by the runner, or the job's own `GITHUB_TOKEN`) into short-lived
//! credentials issued by a remote broker: GitHub App installation tokens or
//! temporary AWS credentials.

pub mod identity;
pub mod issue;
pub mod oidc;
pub mod payload;
pub mod providers;
pub mod publish;
pub mod revoke;

pub use identity::{Bearer, TokenClass, resolve_bearer, validate_github_token};
pub use issue::{assume_aws_role, issue_github_app_token};
pub use payload::{AwsPayload, GitHubAppPayload, LegacyGitHubAppPayload, parse_repositories};
pub use providers::{
    BrokerClient, BrokerNotice, BrokerResponse, ErrorRecord, ProviderError, TokenExchangeProvider,
    aws::{AwsCredentials, AwsProvider},
    github_app::{GitHubAppCredentials, GitHubAppProvider, GitHubAppRequest},
};
pub use revoke::{RevokeOutcome, cleanup, revoke_token};
