//! Reconcilers, one per declared resource type
//!
//! | Resource type                            | Update        | Delete              |
//! |------------------------------------------|---------------|---------------------|
//! | `sparkpost_domain`                       | never         | remote DELETE       |
//! | `sparkpost_tracking_domain`              | `https` only  | remote DELETE       |
//! | `sparkpost_domain_ownership_verification`| never         | local removal only  |
//! | `sparkpost_domain_bounce_verification`   | never         | local removal only  |
//! | `sparkpost_tracking_domain_verification` | never         | local removal only  |
//! | `sparkpost_tracking_domain_association`  | never         | PUT "" (disassociate)|
//!
//! A remote 404 during read or delete is never a failure: read yields a
//! removed outcome, delete succeeds quietly.

pub mod bounce_verification;
pub mod ownership_verification;
pub mod sending_domain;
pub mod subaccounts;
pub mod tracking_domain;
pub mod tracking_domain_association;
pub mod tracking_domain_verification;

pub use bounce_verification::DomainBounceVerificationReconciler;
pub use ownership_verification::DomainOwnershipVerificationReconciler;
pub use sending_domain::SendingDomainReconciler;
pub use subaccounts::SubaccountsDataSource;
pub use tracking_domain::TrackingDomainReconciler;
pub use tracking_domain_association::{DRIFT_WARNING_SUMMARY, TrackingDomainAssociationReconciler};
pub use tracking_domain_verification::TrackingDomainVerificationReconciler;

use domainctl_core::{Error, Result};

/// Turn a remote not-found into `None`, passing every other outcome through
pub(crate) fn absent_ok<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

/// Context prefix naming the resource instance an error belongs to
pub(crate) fn resource_context(resource_type: &str, id: &str) -> impl FnOnce(Error) -> Error {
    let context = format!("{} \"{}\"", resource_type, id);
    move |err| err.with_context(context)
}
