//! Handing issued credentials to the rest of the job.
//!
//! Every secret is registered with the runner's masker before it is written
//! anywhere else, so no later log line can carry it in clear text.

use crate::providers::BrokerNotice;
use crate::providers::aws::AwsCredentials;
use crate::providers::github_app::GitHubAppCredentials;
use credex_core::{PipelineHost, Result};

/// Output and state key holding the installation token.
pub const TOKEN_KEY: &str = "token";

pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const AWS_REGION: &str = "AWS_REGION";
pub const AWS_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";

/// Relay the broker's informational message and warning, if any.
pub fn report_notices(host: &dyn PipelineHost, notice: &dyn BrokerNotice) {
    if let Some(message) = notice.message() {
        host.info(message);
    }
    if let Some(warning) = notice.warning() {
        host.warning(warning);
    }
}

/// Publish an installation token as the `token` output and persist it for cleanup.
pub fn publish_github_token(host: &dyn PipelineHost, credentials: &GitHubAppCredentials) -> Result<()> {
    let token = credentials.github_token.expose();
    host.mask_secret(token);
    host.set_output(TOKEN_KEY, token)?;
    host.save_state(TOKEN_KEY, token)?;
    Ok(())
}

/// Export AWS credentials and region to subsequent steps.
pub fn publish_aws_credentials(
    host: &dyn PipelineHost,
    credentials: &AwsCredentials,
    region: &str,
) -> Result<()> {
    let secrets = [
        (AWS_ACCESS_KEY_ID, &credentials.access_key_id),
        (AWS_SECRET_ACCESS_KEY, &credentials.secret_access_key),
        (AWS_SESSION_TOKEN, &credentials.session_token),
    ];

    for (_, value) in &secrets {
        host.mask_secret(value.expose());
    }
    for (name, value) in &secrets {
        host.export_variable(name, value.expose())?;
    }

    host.export_variable(AWS_REGION, region)?;
    host.export_variable(AWS_DEFAULT_REGION, region)?;
    Ok(())
}
