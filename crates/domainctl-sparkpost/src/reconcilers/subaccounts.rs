//! `sparkpost_subaccounts`: read-only listing of subaccounts

use async_trait::async_trait;
use domainctl_core::resources::{SubaccountListing, type_names};
use domainctl_core::{DataSource, Result};
use tracing::debug;

use crate::accessors::SubaccountsApi;

/// Data source listing every subaccount of the account
#[derive(Debug, Clone)]
pub struct SubaccountsDataSource {
    api: SubaccountsApi,
}

impl SubaccountsDataSource {
    pub fn new(api: SubaccountsApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataSource for SubaccountsDataSource {
    type Output = SubaccountListing;

    fn type_name(&self) -> &'static str {
        type_names::SUBACCOUNTS
    }

    async fn read(&self) -> Result<SubaccountListing> {
        let subaccounts = self
            .api
            .list()
            .await
            .map_err(|e| e.with_context("Failed to fetch subaccounts"))?;

        debug!(count = subaccounts.len(), "Subaccounts listed");
        Ok(SubaccountListing { subaccounts })
    }
}
