// # SparkPost Binding
//
// This crate reconciles declared sending domains, tracking domains and
// their verification state against the SparkPost REST API.
//
// ## Layers
//
// - `gateway`: authenticated request/response transport, one per session
// - `accessors`: JSON shape of each remote entity
// - `reconcilers`: one `Reconciler` per resource type plus the subaccount
//   listing
//
// ## Constraints
//
// - ✅ One HTTP round trip per accessor call
// - ✅ Remote 404 on read/delete is a state transition, never a failure
// - ✅ Cross-field validation before any network call
// - ❌ NO retry or backoff logic (owned by the host)
// - ❌ NO background tasks
// - ❌ NO global client: every reconciler receives the session's gateway
//
// ## API Reference
//
// - Sending domains: `sending-domains`, `sending-domains/{domain}[/verify]`
// - Tracking domains: `tracking-domains`, `tracking-domains/{domain}[/verify]`
// - Subaccounts: `subaccounts`

pub mod accessors;
pub mod gateway;
pub mod reconcilers;

use std::sync::Arc;

use domainctl_core::{ProviderConfig, Result};
use tracing::info;

pub use accessors::{SendingDomainsApi, SubaccountsApi, TrackingDomainsApi};
pub use gateway::{ApiGateway, ApiResponse, SUBACCOUNT_HEADER};
pub use reconcilers::{
    DomainBounceVerificationReconciler, DomainOwnershipVerificationReconciler,
    SendingDomainReconciler, SubaccountsDataSource, TrackingDomainAssociationReconciler,
    TrackingDomainReconciler, TrackingDomainVerificationReconciler,
};

/// One configured provider instance
///
/// Owns the single [`ApiGateway`] of a host session and hands it to every
/// reconciler it builds. Dropping the provider (and every reconciler built
/// from it) tears the gateway down.
#[derive(Debug, Clone)]
pub struct SparkPostProvider {
    gateway: Arc<ApiGateway>,
}

impl SparkPostProvider {
    /// Build a provider session from configuration
    ///
    /// # Errors
    ///
    /// - `Error::Config` if the configuration is invalid
    /// - `Error::Transport` if the HTTP client cannot be built
    pub fn configure(config: ProviderConfig) -> Result<Self> {
        let gateway = ApiGateway::new(config)?;
        info!(api_url = gateway.api_url(), "SparkPost provider configured");
        Ok(Self {
            gateway: Arc::new(gateway),
        })
    }

    /// Build a provider session from `SPARKPOST_API_KEY` / `SPARKPOST_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::configure(ProviderConfig::from_env()?)
    }

    /// The shared gateway
    pub fn gateway(&self) -> Arc<ApiGateway> {
        Arc::clone(&self.gateway)
    }

    fn sending_domains_api(&self) -> SendingDomainsApi {
        SendingDomainsApi::new(self.gateway())
    }

    fn tracking_domains_api(&self) -> TrackingDomainsApi {
        TrackingDomainsApi::new(self.gateway())
    }

    pub fn sending_domains(&self) -> SendingDomainReconciler {
        SendingDomainReconciler::new(self.sending_domains_api())
    }

    pub fn tracking_domains(&self) -> TrackingDomainReconciler {
        TrackingDomainReconciler::new(self.tracking_domains_api())
    }

    pub fn domain_ownership_verifications(&self) -> DomainOwnershipVerificationReconciler {
        DomainOwnershipVerificationReconciler::new(self.sending_domains_api())
    }

    pub fn domain_bounce_verifications(&self) -> DomainBounceVerificationReconciler {
        DomainBounceVerificationReconciler::new(self.sending_domains_api())
    }

    pub fn tracking_domain_verifications(&self) -> TrackingDomainVerificationReconciler {
        TrackingDomainVerificationReconciler::new(self.tracking_domains_api())
    }

    pub fn tracking_domain_associations(&self) -> TrackingDomainAssociationReconciler {
        TrackingDomainAssociationReconciler::new(self.sending_domains_api())
    }

    pub fn subaccounts(&self) -> SubaccountsDataSource {
        SubaccountsDataSource::new(SubaccountsApi::new(self.gateway()))
    }
}
