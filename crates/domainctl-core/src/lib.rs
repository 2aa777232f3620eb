// # domainctl-core
//
// Core library for reconciling declared email-delivery domains against a
// remote platform API.
//
// ## Architecture Overview
//
// - **Reconciler**: Trait every managed resource type implements
//   (create / read / update / delete against the remote API)
// - **ResourceState**: Explicit lifecycle state (absent, present, verified)
// - **Declaration / ChangePlan**: Replace-vs-update decision per attribute
// - **Validate**: Cross-field checks evaluated before any remote call
// - **Diagnostic**: What the host sees for errors and drift warnings
//
// Remote bindings (HTTP gateway, entity accessors, concrete reconcilers)
// live in separate crates such as `domainctl-sparkpost`.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod resources;
pub mod state;
pub mod traits;
pub mod validation;

// Re-export core types for convenience
pub use config::ProviderConfig;
pub use diagnostics::{Diagnostic, Operation, Severity};
pub use error::{Error, ErrorKind, Result};
pub use resources::Declaration;
pub use state::{ChangePlan, Reconciled, ResourceState};
pub use traits::{DataSource, Reconciler};
pub use validation::Validate;
