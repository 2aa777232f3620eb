//! `sparkpost_domain_ownership_verification`: DKIM ownership proof for a
//! sending domain
//!
//! Verification cannot be undone remotely, so delete only drops the
//! resource from host state.

use async_trait::async_trait;
use domainctl_core::resources::{
    DomainVerification, DomainVerificationConfig, subaccount_scope, type_names,
};
use domainctl_core::{Reconciled, Reconciler, ResourceState, Result, Validate};
use tracing::{debug, info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::SendingDomainsApi;

/// Reconciler for sending domain ownership verification
#[derive(Debug, Clone)]
pub struct DomainOwnershipVerificationReconciler {
    api: SendingDomainsApi,
}

impl DomainOwnershipVerificationReconciler {
    pub fn new(api: SendingDomainsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reconciler for DomainOwnershipVerificationReconciler {
    type Config = DomainVerificationConfig;
    type State = DomainVerification;

    fn resource_type(&self) -> &'static str {
        type_names::DOMAIN_OWNERSHIP_VERIFICATION
    }

    async fn create(
        &self,
        config: &DomainVerificationConfig,
    ) -> Result<Reconciled<DomainVerification>> {
        config.validate()?;

        self.api
            .verify_ownership(&config.domain, subaccount_scope(config.subaccount))
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(domain = %config.domain, "Sending domain ownership verified");

        Ok(Reconciled::new(ResourceState::verified(config.snapshot())))
    }

    async fn read(&self, state: &DomainVerification) -> Result<Reconciled<DomainVerification>> {
        let record = absent_ok(self.api.get(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        if record.is_none() {
            warn!(domain = %state.id, "Verified sending domain no longer exists; removing from state");
            return Ok(Reconciled::removed());
        }

        Ok(Reconciled::new(ResourceState::verified(state.clone())))
    }

    async fn delete(&self, state: &DomainVerification) -> Result<()> {
        debug!(domain = %state.id, "Dropping ownership verification from state");
        Ok(())
    }
}
