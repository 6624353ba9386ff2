//! credex Core
//!
//! Core domain types, traits, and error handling for credex.
//! This crate has minimal dependencies and defines the shared vocabulary
//! used by the exchange logic and the command-line front end.

pub mod error;
pub mod facts;
pub mod params;
pub mod ports;
pub mod secrets;

pub use error::{Error, Result};
pub use facts::{IdTokenRequest, PipelineFacts};
pub use params::{AwsParams, GitHubAppParams};
pub use ports::PipelineHost;
pub use secrets::Secret;
