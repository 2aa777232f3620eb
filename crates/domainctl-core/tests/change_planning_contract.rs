//! Contract Test: Change Planning and Committed State
//!
//! Constraints verified:
//! - Only `https` on a tracking domain is updatable in place
//! - Every other attribute change on every resource type forces replacement
//! - Subaccount 0 and no subaccount plan as the same scope
//! - Committed state serializes with an explicit lifecycle tag
//! - Validation failures reach the host as error diagnostics
//!
//! If this test fails, someone has widened the update surface or changed
//! the shape of committed state.

use domainctl_core::resources::{
    DomainVerificationConfig, SendingDomainConfig, TrackingDomainAssociationConfig,
    TrackingDomainConfig,
};
use domainctl_core::traits::into_diagnostics;
use domainctl_core::{
    ChangePlan, Declaration, Diagnostic, ErrorKind, Operation, Reconciled, ResourceState,
    Severity, Validate,
};

#[test]
fn tracking_domain_https_is_the_only_in_place_update() {
    let prior = TrackingDomainConfig::new("t.example.com").snapshot();

    let https_only = TrackingDomainConfig::new("t.example.com").with_https(true);
    assert_eq!(https_only.plan(&prior), ChangePlan::UpdateInPlace(vec!["https"]));

    let moved = TrackingDomainConfig::new("t.example.com")
        .with_https(true)
        .with_subaccount(3);
    assert_eq!(
        moved.plan(&prior),
        ChangePlan::Replace(vec!["https", "subaccount"])
    );
}

#[test]
fn replace_only_types_never_update_in_place() {
    let domain = SendingDomainConfig::new("example.com");
    let shared = SendingDomainConfig::new("example.com").with_shared_with_subaccounts(true);
    assert!(shared.plan(&domain.snapshot()).requires_replace());

    let verification = DomainVerificationConfig::new("example.com");
    let rescoped = DomainVerificationConfig::new("example.com").with_subaccount(9);
    assert!(rescoped.plan(&verification.snapshot()).requires_replace());

    let association = TrackingDomainAssociationConfig::new("example.com", "a.example.com");
    let repointed = TrackingDomainAssociationConfig::new("example.com", "b.example.com");
    assert!(repointed.plan(&association.snapshot()).requires_replace());
}

#[test]
fn subaccount_zero_is_account_scope() {
    let prior = SendingDomainConfig::new("example.com").snapshot();
    let zero = SendingDomainConfig::new("example.com").with_subaccount(0);

    assert_eq!(zero.plan(&prior), ChangePlan::NoChange);
    assert!(zero.validate().is_ok());
}

#[test]
fn committed_state_carries_lifecycle_tag() {
    let present = ResourceState::present(TrackingDomainConfig::new("t.example.com").snapshot());
    let json = serde_json::to_value(&present).unwrap();
    assert_eq!(json["status"], "present");
    assert_eq!(json["id"], "t.example.com");

    let verified = ResourceState::verified(DomainVerificationConfig::new("example.com").snapshot());
    let json = serde_json::to_value(&verified).unwrap();
    assert_eq!(json["status"], "verified");
    assert!(json["verified_at"].is_string());

    let restored: ResourceState<_> = serde_json::from_value(json).unwrap();
    assert_eq!(restored, verified);
}

#[test]
fn validation_failure_becomes_error_diagnostic() {
    let config = SendingDomainConfig::new("example.com")
        .with_subaccount(5)
        .with_default_bounce_domain(true);

    let result: domainctl_core::Result<Reconciled<()>> = config.validate().map(|_| {
        Reconciled::new(ResourceState::Absent)
    });
    let err = result.as_ref().map(|_| ()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let (outcome, diagnostics) = into_diagnostics(Operation::Create, result);
    assert!(outcome.is_none());
    assert_eq!(diagnostics.len(), 1);

    let Diagnostic { severity, summary, detail } = &diagnostics[0];
    assert_eq!(*severity, Severity::Error);
    assert_eq!(summary, "Create Error");
    assert!(detail.contains("default_bounce_domain"));
}
