//! Core traits for domainctl
//!
//! - [`Reconciler`]: per-resource-type CRUD state machine driven by the host
//! - [`DataSource`]: read-only listings

pub mod reconciler;

pub use reconciler::{DataSource, Reconciler, into_diagnostics};
