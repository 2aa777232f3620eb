//! Shared fixtures for contract tests
//!
//! Every test talks to a local `wiremock` server standing in for the
//! SparkPost API. Unmatched requests get wiremock's default 404, which is
//! exactly what the API answers for an absent entity.

#![allow(dead_code)]

use domainctl_core::ProviderConfig;
use domainctl_sparkpost::SparkPostProvider;
use serde_json::Value;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Provider session pointed at the mock server
pub fn provider_for(server: &MockServer) -> SparkPostProvider {
    let config = ProviderConfig::new(TEST_API_KEY).with_api_url(server.uri());
    SparkPostProvider::configure(config).expect("provider configures")
}

/// Fail the test if the server sees any request at all
pub async fn forbid_requests(server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .named("no request may be sent")
        .mount(server)
        .await;
}

/// Every request the server received, in order
pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording is enabled")
}

/// Parse a recorded request body as JSON
pub fn json_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}
