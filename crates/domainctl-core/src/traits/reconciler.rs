// # Reconciler Trait
//
// Defines the contract between the host orchestrator and one managed
// resource type.
//
// ## Implementations
//
// - SparkPost: `domainctl-sparkpost` crate (six resource types)
//
// ## Usage
//
// ```rust,ignore
// use domainctl_core::Reconciler;
//
// let outcome = reconciler.create(&config).await?;
// host_state.commit(outcome.state);
//
// let refreshed = reconciler.read(&snapshot).await?;
// if refreshed.is_removed() {
//     host_state.forget();
// }
// ```

use async_trait::async_trait;

use crate::diagnostics::{Diagnostic, Operation};
use crate::error::{Error, Result};
use crate::resources::Declaration;
use crate::state::{ChangePlan, Reconciled};
use crate::validation::Validate;

/// State machine for one declared resource type
///
/// # Contract
///
/// - `create` validates the declaration, performs the remote side effect and
///   only then returns the state to commit. A failed create commits nothing.
/// - `read` re-observes the remote record. A remote 404 is not an error: it
///   yields [`Reconciled::removed`].
/// - `update` is only legal when [`Reconciler::plan`] says the change can be
///   applied in place. Replace-only resources reject it outright.
/// - `delete` treats an already-absent remote record as success.
///
/// # No Retry Logic
///
/// Implementations issue exactly one round trip per remote call and never
/// retry. Retry and backoff belong to the host.
#[async_trait]
pub trait Reconciler: Send + Sync {
    /// Declared configuration
    type Config: Declaration<Snapshot = Self::State> + Validate + Send + Sync;

    /// Committed state snapshot
    type State: Clone + Send + Sync;

    /// Host-facing resource type name
    fn resource_type(&self) -> &'static str;

    /// Create the remote side effect for `config`
    async fn create(&self, config: &Self::Config) -> Result<Reconciled<Self::State>>;

    /// Re-observe the remote record behind `state`
    async fn read(&self, state: &Self::State) -> Result<Reconciled<Self::State>>;

    /// Apply an in-place change from `prior` to `config`
    ///
    /// The default rejects every update; resources with updatable
    /// attributes override it.
    async fn update(
        &self,
        _prior: &Self::State,
        _config: &Self::Config,
    ) -> Result<Reconciled<Self::State>> {
        Err(Error::unsupported_operation(self.resource_type()))
    }

    /// Remove the remote side effect behind `state`
    async fn delete(&self, state: &Self::State) -> Result<()>;

    /// Decide how the host should move from `prior` to `config`
    fn plan(&self, prior: &Self::State, config: &Self::Config) -> ChangePlan {
        config.plan(prior)
    }
}

/// Read-only listing exposed to the host
#[async_trait]
pub trait DataSource: Send + Sync {
    type Output: Send;

    /// Host-facing data source type name
    fn type_name(&self) -> &'static str;

    async fn read(&self) -> Result<Self::Output>;
}

/// Collapse an operation result into the host's (state, diagnostics) shape
///
/// Errors become a single error diagnostic with no state to commit.
pub fn into_diagnostics<S>(
    operation: Operation,
    result: Result<Reconciled<S>>,
) -> (Option<Reconciled<S>>, Vec<Diagnostic>) {
    match result {
        Ok(outcome) => {
            let warnings = outcome.warnings.clone();
            (Some(outcome), warnings)
        }
        Err(err) => (None, vec![Diagnostic::from_error(operation, &err)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::error::ErrorKind;
    use crate::resources::{DomainVerification, DomainVerificationConfig};
    use crate::state::ResourceState;

    struct LocalOnlyReconciler;

    #[async_trait]
    impl Reconciler for LocalOnlyReconciler {
        type Config = DomainVerificationConfig;
        type State = DomainVerification;

        fn resource_type(&self) -> &'static str {
            "local_only"
        }

        async fn create(&self, config: &Self::Config) -> Result<Reconciled<Self::State>> {
            config.validate()?;
            Ok(Reconciled::new(ResourceState::verified(config.snapshot())))
        }

        async fn read(&self, state: &Self::State) -> Result<Reconciled<Self::State>> {
            Ok(Reconciled::new(ResourceState::verified(state.clone())))
        }

        async fn delete(&self, _state: &Self::State) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_update_is_unsupported() {
        let reconciler = LocalOnlyReconciler;
        let config = DomainVerificationConfig::new("example.com");
        let prior = config.snapshot();

        let err = tokio_test::block_on(reconciler.update(&prior, &config)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert!(err.to_string().contains("local_only"));
    }

    #[test]
    fn test_default_plan_delegates_to_declaration() {
        let reconciler = LocalOnlyReconciler;
        let prior = DomainVerificationConfig::new("example.com").snapshot();
        let desired = DomainVerificationConfig::new("other.example.com");

        assert!(reconciler.plan(&prior, &desired).requires_replace());
    }

    #[test]
    fn test_into_diagnostics_on_error() {
        let reconciler = LocalOnlyReconciler;
        let config = DomainVerificationConfig::new("");

        let result = tokio_test::block_on(reconciler.create(&config));
        let (outcome, diags) = into_diagnostics(Operation::Create, result);

        assert!(outcome.is_none());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].summary, "Create Error");
    }

    #[test]
    fn test_into_diagnostics_passes_warnings() {
        let outcome = Reconciled::new(ResourceState::present(
            DomainVerificationConfig::new("example.com").snapshot(),
        ))
        .with_warning(Diagnostic::warning("Drift", "changed remotely"));

        let (committed, diags) = into_diagnostics(Operation::Read, Ok(outcome));
        assert!(committed.is_some());
        assert_eq!(diags, vec![Diagnostic::warning("Drift", "changed remotely")]);
    }
}
