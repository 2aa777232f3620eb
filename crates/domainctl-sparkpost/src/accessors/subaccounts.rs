//! Subaccount accessor
//!
//! ```http
//! GET subaccounts -> 200 {"results": [{"id": 1, "name": "..."}]}
//! ```
//!
//! No pagination handling: the API returns every subaccount in one page.

use std::sync::Arc;

use domainctl_core::Result;
use domainctl_core::resources::Subaccount;
use reqwest::{Method, StatusCode};

use super::{classify, decode_results};
use crate::gateway::ApiGateway;

/// Accessor for the `subaccounts` endpoint
#[derive(Debug, Clone)]
pub struct SubaccountsApi {
    gateway: Arc<ApiGateway>,
}

impl SubaccountsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// List every subaccount in remote order
    pub async fn list(&self) -> Result<Vec<Subaccount>> {
        let response = self
            .gateway
            .send(Method::GET, &["subaccounts"], None, None, StatusCode::OK)
            .await
            .map_err(|e| classify(e, "subaccounts", "*", "Subaccounts request failed"))?;

        decode_results(response.body).map_err(|e| e.with_context("Failed to decode subaccounts"))
    }
}
