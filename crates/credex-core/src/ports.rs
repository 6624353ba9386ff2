//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the core domain and the CI
//! runner the process is executing under.

use crate::Result;

/// Side channels offered by the CI runner to a workflow step.
pub trait PipelineHost {
    /// Register a value that the runner must redact from every later log line.
    fn mask_secret(&self, value: &str);

    /// Export an environment variable to subsequent steps of the job.
    fn export_variable(&self, name: &str, value: &str) -> Result<()>;

    /// Set a named output of the current step.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Persist a value for the post-job phase of this step.
    fn save_state(&self, name: &str, value: &str) -> Result<()>;

    /// Read a value persisted by [`PipelineHost::save_state`] in the main phase.
    fn get_state(&self, name: &str) -> Option<String>;

    /// Informational line in the step log.
    fn info(&self, message: &str);

    /// Non-fatal warning annotation.
    fn warning(&self, message: &str);
}
