//! Integration test infrastructure for credex.
//!
//! Tests run the full issuance and cleanup flows against a wiremock server
//! standing in for both the runner's OIDC endpoint and the credential broker.
//!
//! # Usage
//!
//! ```ignore
//! use credex_tests::TestContext;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let ctx = TestContext::new().await;
//!     // Use ctx.server, ctx.host, ctx.facts(), etc.
//! }
//! ```

pub mod context;
pub mod fixtures;
pub mod helpers;

pub use context::TestContext;
pub use fixtures::*;
pub use helpers::*;

/// Initialize test logging (call once per test binary).
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,credex_auth=debug")),
        )
        .with_test_writer()
        .try_init();
}
