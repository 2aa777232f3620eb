//! `sparkpost_domain`: a sending domain
//!
//! Every attribute forces replacement. Read adopts the remote sharing and
//! default-bounce flags when the API returns them.

use async_trait::async_trait;
use domainctl_core::resources::{SendingDomain, SendingDomainConfig, subaccount_scope, type_names};
use domainctl_core::{Reconciled, Reconciler, ResourceState, Result, Validate};
use tracing::{info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::SendingDomainsApi;

/// Reconciler for sending domains
#[derive(Debug, Clone)]
pub struct SendingDomainReconciler {
    api: SendingDomainsApi,
}

impl SendingDomainReconciler {
    pub fn new(api: SendingDomainsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reconciler for SendingDomainReconciler {
    type Config = SendingDomainConfig;
    type State = SendingDomain;

    fn resource_type(&self) -> &'static str {
        type_names::SENDING_DOMAIN
    }

    async fn create(&self, config: &SendingDomainConfig) -> Result<Reconciled<SendingDomain>> {
        config.validate()?;

        self.api
            .create(
                &config.domain,
                config.shared_with_subaccounts,
                config.default_bounce_domain,
                subaccount_scope(config.subaccount),
            )
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(
            domain = %config.domain,
            subaccount = ?subaccount_scope(config.subaccount),
            "Sending domain created"
        );

        Ok(Reconciled::new(ResourceState::present(config.snapshot())))
    }

    async fn read(&self, state: &SendingDomain) -> Result<Reconciled<SendingDomain>> {
        let record = absent_ok(self.api.get(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        let Some(record) = record else {
            warn!(domain = %state.id, "Sending domain no longer exists remotely; removing from state");
            return Ok(Reconciled::removed());
        };

        let mut observed = state.clone();
        if let Some(shared) = record.shared_with_subaccounts {
            observed.shared_with_subaccounts = shared;
        }
        if let Some(default_bounce) = record.is_default_bounce_domain {
            observed.default_bounce_domain = default_bounce;
        }

        Ok(Reconciled::new(ResourceState::present(observed)))
    }

    async fn delete(&self, state: &SendingDomain) -> Result<()> {
        let deleted = absent_ok(self.api.delete(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        match deleted {
            Some(()) => info!(domain = %state.id, "Sending domain deleted"),
            None => info!(domain = %state.id, "Sending domain already absent"),
        }
        Ok(())
    }
}
