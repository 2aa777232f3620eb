//! `sparkpost_tracking_domain`: a click/open tracking domain
//!
//! `https` is the only attribute that can change in place; `domain` and
//! `subaccount` force replacement.

use async_trait::async_trait;
use domainctl_core::resources::{TrackingDomain, TrackingDomainConfig, subaccount_scope, type_names};
use domainctl_core::{
    ChangePlan, Error, Reconciled, Reconciler, ResourceState, Result, Validate,
};
use tracing::{debug, info, warn};

use super::{absent_ok, resource_context};
use crate::accessors::TrackingDomainsApi;

/// Reconciler for tracking domains
#[derive(Debug, Clone)]
pub struct TrackingDomainReconciler {
    api: TrackingDomainsApi,
}

impl TrackingDomainReconciler {
    pub fn new(api: TrackingDomainsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Reconciler for TrackingDomainReconciler {
    type Config = TrackingDomainConfig;
    type State = TrackingDomain;

    fn resource_type(&self) -> &'static str {
        type_names::TRACKING_DOMAIN
    }

    async fn create(&self, config: &TrackingDomainConfig) -> Result<Reconciled<TrackingDomain>> {
        config.validate()?;

        self.api
            .create(&config.domain, config.https, subaccount_scope(config.subaccount))
            .await
            .map_err(resource_context(self.resource_type(), &config.domain))?;

        info!(domain = %config.domain, https = config.https, "Tracking domain created");

        Ok(Reconciled::new(ResourceState::present(config.snapshot())))
    }

    async fn read(&self, state: &TrackingDomain) -> Result<Reconciled<TrackingDomain>> {
        let record = absent_ok(self.api.get(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        let Some(record) = record else {
            warn!(domain = %state.id, "Tracking domain no longer exists remotely; removing from state");
            return Ok(Reconciled::removed());
        };

        let mut observed = state.clone();
        if let Some(secure) = record.secure {
            observed.https = secure;
        }

        Ok(Reconciled::new(ResourceState::present(observed)))
    }

    async fn update(
        &self,
        prior: &TrackingDomain,
        config: &TrackingDomainConfig,
    ) -> Result<Reconciled<TrackingDomain>> {
        config.validate()?;

        match self.plan(prior, config) {
            ChangePlan::NoChange => {
                debug!(domain = %prior.id, "Tracking domain unchanged");
                Ok(Reconciled::new(ResourceState::present(prior.clone())))
            }
            ChangePlan::Replace(changed) => {
                let err = Error::replacement_required(self.resource_type(), &changed);
                Err(resource_context(self.resource_type(), &prior.id)(err))
            }
            ChangePlan::UpdateInPlace(_) => {
                self.api
                    .update(&prior.id, config.https, prior.subaccount)
                    .await
                    .map_err(resource_context(self.resource_type(), &prior.id))?;

                info!(domain = %prior.id, https = config.https, "Tracking domain updated");

                let updated = TrackingDomain {
                    https: config.https,
                    ..prior.clone()
                };
                Ok(Reconciled::new(ResourceState::present(updated)))
            }
        }
    }

    async fn delete(&self, state: &TrackingDomain) -> Result<()> {
        let deleted = absent_ok(self.api.delete(&state.id, state.subaccount).await)
            .map_err(resource_context(self.resource_type(), &state.id))?;

        match deleted {
            Some(()) => info!(domain = %state.id, "Tracking domain deleted"),
            None => info!(domain = %state.id, "Tracking domain already absent"),
        }
        Ok(())
    }
}
