//! Entity accessors
//!
//! One accessor per remote entity. Each owns the JSON request/response
//! shape of its endpoints and is consumed by the reconcilers. A remote 404
//! surfaces as `Error::NotFound`; every other gateway failure is wrapped
//! with accessor-specific context.

pub mod sending_domains;
pub mod subaccounts;
pub mod tracking_domains;

pub use sending_domains::{SendingDomainRecord, SendingDomainsApi};
pub use subaccounts::SubaccountsApi;
pub use tracking_domains::{TrackingDomainRecord, TrackingDomainsApi};

use domainctl_core::Error;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Map a gateway error: 404 becomes not-found, everything else gets context
pub(crate) fn classify(err: Error, entity: &str, key: &str, context: impl Into<String>) -> Error {
    if err.status() == Some(404) {
        Error::not_found(entity, key)
    } else {
        err.with_context(context)
    }
}

/// SparkPost response envelope: `{"results": ...}`
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    results: Option<T>,
}

/// Decode the `results` member of a response body, defaulting when absent
pub(crate) fn decode_results<T>(body: Value) -> domainctl_core::Result<T>
where
    T: DeserializeOwned + Default,
{
    if body.is_null() {
        return Ok(T::default());
    }
    let envelope: Envelope<T> = serde_json::from_value(body)?;
    Ok(envelope.results.unwrap_or_default())
}
