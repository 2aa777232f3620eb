//! Tracking domain accessor
//!
//! ```http
//! POST   tracking-domains                  {domain, secure}  -> 200
//! GET    tracking-domains/{domain}                           -> 200
//! PUT    tracking-domains/{domain}         {secure}          -> 200
//! DELETE tracking-domains/{domain}                           -> 204
//! POST   tracking-domains/{domain}/verify  (no body)         -> 200
//! ```

use std::sync::Arc;

use domainctl_core::{Error, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{classify, decode_results};
use crate::gateway::ApiGateway;

const COLLECTION: &str = "tracking-domains";
const ENTITY: &str = "tracking domain";

/// The fields of a tracking domain read back from the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TrackingDomainRecord {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub secure: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct VerifyResults {
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default)]
    cname_status: Option<String>,
}

/// Accessor for `tracking-domains` endpoints
#[derive(Debug, Clone)]
pub struct TrackingDomainsApi {
    gateway: Arc<ApiGateway>,
}

impl TrackingDomainsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Create a tracking domain
    pub async fn create(&self, domain: &str, secure: bool, subaccount: Option<u64>) -> Result<()> {
        let body = json!({ "domain": domain, "secure": secure });

        self.gateway
            .send(
                Method::POST,
                &[COLLECTION],
                Some(&body),
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to create tracking domain"))?;

        Ok(())
    }

    /// Fetch a tracking domain
    pub async fn get(&self, domain: &str, subaccount: Option<u64>) -> Result<TrackingDomainRecord> {
        let response = self
            .gateway
            .send(Method::GET, &[COLLECTION, domain], None, subaccount, StatusCode::OK)
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to read tracking domain"))?;

        decode_results(response.body)
            .map_err(|e| e.with_context("Failed to decode tracking domain"))
    }

    /// Change the `secure` flag of a tracking domain
    pub async fn update(&self, domain: &str, secure: bool, subaccount: Option<u64>) -> Result<()> {
        let body = json!({ "secure": secure });

        self.gateway
            .send(
                Method::PUT,
                &[COLLECTION, domain],
                Some(&body),
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to update tracking domain"))?;

        Ok(())
    }

    /// Delete a tracking domain
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
            .map_err(|e| classify(e, ENTITY, domain, "Failed to delete tracking domain"))?;

        Ok(())
    }

    /// Run tracking domain verification; succeeds only if `verified` is true
    pub async fn verify(&self, domain: &str, subaccount: Option<u64>) -> Result<()> {
        let response = self
            .gateway
            .send(
                Method::POST,
                &[COLLECTION, domain, "verify"],
                None,
                subaccount,
                StatusCode::OK,
            )
            .await
            .map_err(|e| classify(e, ENTITY, domain, "Failed to verify tracking domain"))?;

        let results: VerifyResults = decode_results(response.body)
            .map_err(|e| e.with_context("Failed to decode verification result"))?;

        debug!(domain = domain, ?results, "Tracking domain verification result");

        if results.verified == Some(true) {
            return Ok(());
        }

        Err(match results.cname_status {
            Some(status) => Error::verification_failed("cname_status", status),
            None => Error::verification_failed(
                "verified",
                results
                    .verified
                    .map_or_else(|| "missing".to_string(), |v| v.to_string()),
            ),
        })
    }
}
