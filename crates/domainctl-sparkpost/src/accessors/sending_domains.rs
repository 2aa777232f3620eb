//! Sending domain accessor
//!
//! ```http
//! POST   sending-domains                  {domain, shared_with_subaccounts, is_default_bounce_domain}  -> 200
//! GET    sending-domains/{domain}                                                                      -> 200
//! DELETE sending-domains/{domain}                                                                      -> 204
//! POST   sending-domains/{domain}/verify  {dkim_verify: true} | {cname_verify: true}                   -> 200
//! PUT    sending-domains/{domain}         {tracking_domain}                                            -> 200
//! ```

use std::sync::Arc;

use domainctl_core::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use super::{classify, decode_results};
use crate::gateway::ApiGateway;

const COLLECTION: &str = "sending-domains";
const ENTITY: &str = "sending domain";

/// Success message returned by a tracking domain association update
pub const ASSOCIATION_SUCCESS_MESSAGE: &str = "Successfully Updated Domain.";

/// The fields of a sending domain read back from the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SendingDomainRecord {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub shared_with_subaccounts: Option<bool>,
    #[serde(default)]
    pub is_default_bounce_domain: Option<bool>,
    /// Associated tracking domain; empty when none is associated
    #[serde(default)]
    pub tracking_domain: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct VerifyResults {
    #[serde(default)]
    ownership_verified: Option<bool>,
    #[serde(default)]
    dkim_status: Option<String>,
    #[serde(default)]
    cname_status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct UpdateResults {
    #[serde(default)]
    message: Option<String>,
}

/// Accessor for `sending-domains` endpoints
#[derive(Debug, Clone)]
pub struct SendingDomainsApi {
    gateway: Arc<ApiGateway>,
}

impl SendingDomainsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Create a sending domain
    pub async fn create(
        &self,
        domain: &str,
        shared_with_subaccounts: bool,
        default_bounce_domain: bool,
        subaccount: Option<u64>,
    ) -> Result<()> {
        let body = json!({
            "domain": domain,
            "shared_with_subaccounts": shared_with_subaccounts,
            "is_default_bounce_domain": default_bounce_domain,
        });

        self.gateway
            .send(
                Method::POST,
                &[COLLECTION],
                Some(&body),
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to create sending domain"))?;

        Ok(())
    }

    /// Fetch a sending domain
    pub async fn get(&self, domain: &str, subaccount: Option<u64>) -> Result<SendingDomainRecord> {
        let response = self
            .gateway
            .send(Method::GET, &[COLLECTION, domain], None, subaccount, StatusCode::OK)
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to read sending domain"))?;

        decode_results(response.body)
            .map_err(|e| e.with_context("Failed to decode sending domain"))
    }

    /// Delete a sending domain
    pub async fn delete(&self, domain: &str, subaccount: Option<u64>) -> Result<()> {
        self.gateway
            .send(
                Method::DELETE,
                &[COLLECTION, domain],
                None,
                subaccount,
                StatusCode::NO_CONTENT,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to delete sending domain"))?;

        Ok(())
    }

    async fn verify(&self, domain: &str, subaccount: Option<u64>, body: Value) -> Result<VerifyResults> {
        let response = self
            .gateway
            .send(
                Method::POST,
                &[COLLECTION, domain, "verify"],
                Some(&body),
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to verify sending domain"))?;

        decode_results(response.body)
            .map_err(|e| e.with_context("Failed to decode verification result"))
    }

    /// Run DKIM ownership verification; succeeds only if ownership is verified
    pub async fn verify_ownership(&self, domain: &str, subaccount: Option<u64>) -> Result<()> {
        let results = self
            .verify(domain, subaccount, json!({ "dkim_verify": true }))
            .await?;

        debug!(domain = domain, ?results, "Ownership verification result");

        if results.ownership_verified == Some(true) {
            return Ok(());
        }

        Err(match results.dkim_status {
            Some(status) => Error::verification_failed("dkim_status", status),
            None => Error::verification_failed(
                "ownership_verified",
                render_flag(results.ownership_verified),
            ),
        })
    }

    /// Run CNAME (bounce) verification; succeeds only if the status is "valid"
    pub async fn verify_cname(&self, domain: &str, subaccount: Option<u64>) -> Result<()> {
        let results = self
            .verify(domain, subaccount, json!({ "cname_verify": true }))
            .await?;

        debug!(domain = domain, ?results, "CNAME verification result");

        match results.cname_status.as_deref() {
            Some("valid") => Ok(()),
            Some(other) => Err(Error::verification_failed("cname_status", other)),
            None => Err(Error::verification_failed("cname_status", "missing")),
        }
    }

    /// Associate a tracking domain; an empty value disassociates
    pub async fn associate_tracking_domain(
        &self,
        domain: &str,
        subaccount: Option<u64>,
        tracking_domain: &str,
    ) -> Result<()> {
        let body = json!({ "tracking_domain": tracking_domain });

        let response = self
            .gateway
            .send(
                Method::PUT,
                &[COLLECTION, domain],
                Some(&body),
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| {
                classify(e, ENTITY, domain, "Failed to update tracking domain association")
            })?;

        let results: UpdateResults = decode_results(response.body)
            .map_err(|e| e.with_context("Failed to decode association result"))?;

        match results.message.as_deref() {
            Some(ASSOCIATION_SUCCESS_MESSAGE) => Ok(()),
            Some(other) => Err(Error::unexpected_response(format!(
                "association of {} returned message '{}'",
                domain, other
            ))),
            None => Err(Error::unexpected_response(format!(
                "association of {} returned no message",
                domain
            ))),
        }
    }

    /// The tracking domain currently associated with `domain` ("" if none)
    pub async fn tracking_domain_association(
        &self,
        domain: &str,
        subaccount: Option<u64>,
    ) -> Result<String> {
        let record = self.get(domain, subaccount).await?;
        Ok(record.tracking_domain.unwrap_or_default())
    }
}

fn render_flag(flag: Option<bool>) -> String {
    match flag {
        Some(value) => value.to_string(),
        None => "missing".to_string(),
    }
}
