//! Contract Test: Validation Before Any Remote Call
//!
//! A sending domain scoped to a subaccount cannot also be shared with
//! subaccounts or be the default bounce domain. The conflict is reported as
//! a configuration error and nothing reaches the network.

mod common;

use common::*;
use domainctl_core::resources::SendingDomainConfig;
use domainctl_core::{Diagnostic, ErrorKind, Operation, Reconciler};
use wiremock::MockServer;

#[tokio::test]
async fn subaccount_with_shared_fails_without_request() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let config = SendingDomainConfig::new("example.com")
        .with_subaccount(5)
        .with_shared_with_subaccounts(true);

    let err = provider_for(&server)
        .sending_domains()
        .create(&config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("shared_with_subaccounts"));
    server.verify().await;
}

#[tokio::test]
async fn subaccount_with_default_bounce_fails_without_request() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let config = SendingDomainConfig::new("example.com")
        .with_subaccount(5)
        .with_default_bounce_domain(true);

    let err = provider_for(&server)
        .sending_domains()
        .create(&config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(err.to_string().contains("default_bounce_domain"));
    server.verify().await;
}

#[tokio::test]
async fn conflict_surfaces_as_create_error_diagnostic() {
    let server = MockServer::start().await;
    forbid_requests(&server).await;

    let config = SendingDomainConfig::new("example.com")
        .with_subaccount(2)
        .with_shared_with_subaccounts(true)
        .with_default_bounce_domain(true);

    let err = provider_for(&server)
        .sending_domains()
        .create(&config)
        .await
        .unwrap_err();

    let diag = Diagnostic::from_error(Operation::Create, &err);
    assert!(diag.is_error());
    assert_eq!(diag.summary, "Create Error");
    assert!(diag.detail.contains("\"subaccount\""));
    assert!(diag.detail.contains("\"shared_with_subaccounts\""));
    assert!(diag.detail.contains("\"default_bounce_domain\""));
}
