//! `sparkpost_domain_bounce_verification`: CNAME proof that a sending
//! domain can be used for bounces

use async_trait::async_trait;
use domainctl_core::resources::{
    DomainVerification, DomainVerificationConfig, subaccount_scope, type_names,
};
use domainctl_core::{Reconciled, Reconciler, ResourceState, Result, Validate};
use tracing::{debug, info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::SendingDomainsApi;

/// Reconciler for sending domain bounce (CNAME) verification
#[derive(Debug, Clone)]
pub struct DomainBounceVerificationReconciler {
    api: SendingDomainsApi,
}

impl DomainBounceVerificationReconciler {
    pub fn new(api: SendingDomainsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reconciler for DomainBounceVerificationReconciler {
    type Config = DomainVerificationConfig;
    type State = DomainVerification;

    fn resource_type(&self) -> &'static str {
        type_names::DOMAIN_BOUNCE_VERIFICATION
    }

    async fn create(
        &self,
        config: &DomainVerificationConfig,
    ) -> Result<Reconciled<DomainVerification>> {
        config.validate()?;

        self.api
            .verify_cname(&config.domain, subaccount_scope(config.subaccount))
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(domain = %config.domain, "Sending domain bounce CNAME verified");

        Ok(Reconciled::new(ResourceState::verified(config.snapshot())))
    }

    async fn read(&self, state: &DomainVerification) -> Result<Reconciled<DomainVerification>> {
        let record = absent_ok(self.api.get(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        if record.is_none() {
            warn!(domain = %state.id, "Bounce-verified sending domain no longer exists; removing from state");
            return Ok(Reconciled::removed());
        }

        Ok(Reconciled::new(ResourceState::verified(state.clone())))
    }

    async fn delete(&self, state: &DomainVerification) -> Result<()> {
        debug!(domain = %state.id, "Dropping bounce verification from state");
        Ok(())
    }
}
