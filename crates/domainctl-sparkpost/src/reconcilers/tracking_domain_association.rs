//! `sparkpost_tracking_domain_association`: which tracking domain a
//! sending domain rewrites links with
//!
//! Read compares the remote association byte-for-byte with the last
//! committed value. A mismatch means someone changed it outside the
//! declared configuration: the read still succeeds, adopts the remote
//! value and carries a warning.

use async_trait::async_trait;
use domainctl_core::resources::{
    TrackingDomainAssociation, TrackingDomainAssociationConfig, subaccount_scope, type_names,
};
use domainctl_core::{Diagnostic, Reconciled, Reconciler, ResourceState, Result, Validate};
use tracing::{info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::SendingDomainsApi;

/// Summary of the drift warning raised on association mismatch
pub const DRIFT_WARNING_SUMMARY: &str = "Tracking Domain Mismatch";

/// Reconciler for tracking domain associations
#[derive(Debug, Clone)]
pub struct TrackingDomainAssociationReconciler {
    api: SendingDomainsApi,
}

impl TrackingDomainAssociationReconciler {
    pub fn new(api: SendingDomainsApi) -> Self {
        Self { api }
    }
}

fn drift_warning(actual: &str, declared: &str) -> Diagnostic {
    Diagnostic::warning(
        DRIFT_WARNING_SUMMARY,
        format!(
            "The current tracking domain '{}' does not match the configured value '{}'. \
             This may indicate it was edited outside of the declared configuration.",
            actual, declared
        ),
    )
}

#[async_trait]
impl Reconciler for TrackingDomainAssociationReconciler {
    type Config = TrackingDomainAssociationConfig;
    type State = TrackingDomainAssociation;

    fn resource_type(&self) -> &'static str {
        type_names::TRACKING_DOMAIN_ASSOCIATION
    }

    async fn create(
        &self,
        config: &TrackingDomainAssociationConfig,
    ) -> Result<Reconciled<TrackingDomainAssociation>> {
        config.validate()?;

        self.api
            .associate_tracking_domain(
                &config.domain,
                subaccount_scope(config.subaccount),
                &config.tracking_domain,
            )
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(
            domain = %config.domain,
            tracking_domain = %config.tracking_domain,
            "Tracking domain associated"
        );

        Ok(Reconciled::new(ResourceState::present(config.snapshot())))
    }

    async fn read(
        &self,
        state: &TrackingDomainAssociation,
    ) -> Result<Reconciled<TrackingDomainAssociation>> {
        let actual = absent_ok(
            self.api
                .tracking_domain_association(&state.id, state.subaccount)
                .await,
        )
        .map_err(resource_context(self.resource_type(), &state.id))?;

        let Some(actual) = actual else {
            warn!(domain = %state.id, "Sending domain no longer exists; removing association from state");
            return Ok(Reconciled::removed());
        };

        if actual == state.tracking_domain {
            return Ok(Reconciled::new(ResourceState::present(state.clone())));
        }

        warn!(
            domain = %state.id,
            declared = %state.tracking_domain,
            actual = %actual,
            "Tracking domain association drifted; adopting remote value"
        );

        let warning = drift_warning(&actual, &state.tracking_domain);
        let observed = TrackingDomainAssociation {
            tracking_domain: actual,
            ..state.clone()
        };

        Ok(Reconciled::new(ResourceState::present(observed)).with_warning(warning))
    }

    async fn delete(&self, state: &TrackingDomainAssociation) -> Result<()> {
        let cleared = absent_ok(
            self.api
                .associate_tracking_domain(&state.id, state.subaccount, "")
                .await,
        )
        .map_err(resource_context(self.resource_type(), &state.id))?;

        match cleared {
            Some(()) => info!(domain = %state.id, "Tracking domain disassociated"),
            None => info!(domain = %state.id, "Sending domain already absent; nothing to disassociate"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_warning_names_both_values() {
        let warning = drift_warning("other.example.com", "track.example.com");
        assert!(!warning.is_error());
        assert_eq!(warning.summary, DRIFT_WARNING_SUMMARY);
        assert!(warning.detail.contains("'other.example.com'"));
        assert!(warning.detail.contains("'track.example.com'"));
    }
}
