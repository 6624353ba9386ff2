//! Test context providing access to all test infrastructure.

use crate::fixtures::{FactsFixture, ID_TOKEN, REQUEST_TOKEN};
use crate::helpers::{RecordingHost, test_client};
use credex_core::PipelineFacts;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path of the mocked runner OIDC endpoint.
pub const ID_TOKEN_PATH: &str = "/_apis/oidc/token";
/// Path of the mocked credential broker.
pub const BROKER_PATH: &str = "/broker";

/// Test context with a mock server standing in for the runner, the broker
/// and the GitHub API.
///
/// Drop this to stop the server.
pub struct TestContext {
    pub server: MockServer,
    pub host: RecordingHost,
    pub client: reqwest::Client,
}

impl TestContext {
    pub async fn new() -> Self {
        crate::init_test_logging();

        Self {
            server: MockServer::start().await,
            host: RecordingHost::new(),
            client: test_client(),
        }
    }

    /// Context whose host already saved `name = value` in an earlier step.
    pub async fn with_state(name: &str, value: &str) -> Self {
        Self {
            host: RecordingHost::with_state(name, value),
            ..Self::new().await
        }
    }

    pub fn broker_endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), BROKER_PATH)
    }

    /// Facts of a job that may mint OIDC tokens from the mock server.
    pub fn facts(&self) -> PipelineFacts {
        let id_token_url = format!("{}{}?api-version=2.0", self.server.uri(), ID_TOKEN_PATH);
        FactsFixture::push_with_oidc(&self.server.uri(), &id_token_url)
    }

    /// Facts of a job without `id-token: write`.
    pub fn facts_without_oidc(&self) -> PipelineFacts {
        FactsFixture::push(&self.server.uri())
    }

    /// Serve [`ID_TOKEN`] for `audience`, expecting exactly one request.
    pub async fn mount_id_token(&self, audience: &str) {
        Mock::given(method("GET"))
            .and(path(ID_TOKEN_PATH))
            .and(query_param("api-version", "2.0"))
            .and(query_param("audience", audience))
            .and(header("authorization", format!("Bearer {}", REQUEST_TOKEN).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "value": ID_TOKEN })))
            .expect(1)
            .mount(&self.server)
            .await;
    }
}
