//! `sparkpost_tracking_domain_verification`: CNAME proof for a tracking
//! domain
//!
//! Verification is idempotent, so every read re-runs it. A tracking domain
//! that stops verifying fails the read instead of silently staying verified.

use async_trait::async_trait;
use domainctl_core::resources::{
    DomainVerification, DomainVerificationConfig, subaccount_scope, type_names,
};
use domainctl_core::{Reconciled, Reconciler, ResourceState, Result, Validate};
use tracing::{debug, info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::TrackingDomainsApi;

/// Reconciler for tracking domain verification
#[derive(Debug, Clone)]
pub struct TrackingDomainVerificationReconciler {
    api: TrackingDomainsApi,
}

impl TrackingDomainVerificationReconciler {
    pub fn new(api: TrackingDomainsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reconciler for TrackingDomainVerificationReconciler {
    type Config = DomainVerificationConfig;
    type State = DomainVerification;

    fn resource_type(&self) -> &'static str {
        type_names::TRACKING_DOMAIN_VERIFICATION
    }

    async fn create(
        &self,
        config: &DomainVerificationConfig,
    ) -> Result<Reconciled<DomainVerification>> {
        config.validate()?;

        self.api
            .verify(&config.domain, subaccount_scope(config.subaccount))
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(domain = %config.domain, "Tracking domain verified");

        Ok(Reconciled::new(ResourceState::verified(config.snapshot())))
    }

    async fn read(&self, state: &DomainVerification) -> Result<Reconciled<DomainVerification>> {
        let verified = absent_ok(self.api.verify(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        if verified.is_none() {
            warn!(domain = %state.id, "Tracking domain no longer exists; removing verification from state");
            return Ok(Reconciled::removed());
        }

        Ok(Reconciled::new(ResourceState::verified(state.clone())))
    }

    async fn delete(&self, state: &DomainVerification) -> Result<()> {
        debug!(domain = %state.id, "Dropping tracking domain verification from state");
        Ok(())
    }
}
