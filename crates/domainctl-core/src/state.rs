// # Resource Lifecycle State
//
// Every managed resource moves through the same three states:
//
// ```text
//   Absent ──create──▶ Present ──verify──▶ Verified
//     ▲                   │                   │
//     └──── delete / remote 404 ──────────────┘
// ```
//
// There is no edge from Verified back to Present. The only way back is a
// full replacement (delete + create), which the change planner forces for
// every replace-triggering attribute.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostic;

/// Explicit lifecycle state of one resource instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResourceState<S> {
    /// No remote record exists
    Absent,

    /// The remote record exists
    Present(S),

    /// A verification action succeeded against the remote record
    Verified {
        record: S,
        /// When the verification last succeeded
        verified_at: DateTime<Utc>,
    },
}

impl<S> ResourceState<S> {
    pub fn present(record: S) -> Self {
        Self::Present(record)
    }

    /// Mark a record verified as of now
    pub fn verified(record: S) -> Self {
        Self::Verified {
            record,
            verified_at: Utc::now(),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    /// The snapshot held by this state, if any
    pub fn record(&self) -> Option<&S> {
        match self {
            Self::Absent => None,
            Self::Present(record) | Self::Verified { record, .. } => Some(record),
        }
    }

    pub fn into_record(self) -> Option<S> {
        match self {
            Self::Absent => None,
            Self::Present(record) | Self::Verified { record, .. } => Some(record),
        }
    }
}

/// What the host must do to move from a prior snapshot to a new declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePlan {
    /// Declaration matches the snapshot
    NoChange,
    /// Only in-place updatable attributes changed
    UpdateInPlace(Vec<&'static str>),
    /// At least one replace-triggering attribute changed
    Replace(Vec<&'static str>),
}

impl ChangePlan {
    /// Classify a set of changed attributes against the updatable set
    pub fn classify(changed: Vec<&'static str>, updatable: &[&'static str]) -> Self {
        if changed.is_empty() {
            ChangePlan::NoChange
        } else if changed.iter().all(|attr| updatable.contains(attr)) {
            ChangePlan::UpdateInPlace(changed)
        } else {
            ChangePlan::Replace(changed)
        }
    }

    pub fn requires_replace(&self) -> bool {
        matches!(self, ChangePlan::Replace(_))
    }
}

/// Result of a successful reconciler call: the state to commit plus any
/// non-blocking diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<S> {
    pub state: ResourceState<S>,
    pub warnings: Vec<Diagnostic>,
}

impl<S> Reconciled<S> {
    pub fn new(state: ResourceState<S>) -> Self {
        Self {
            state,
            warnings: Vec::new(),
        }
    }

    /// The resource is gone and should be removed from host state
    pub fn removed() -> Self {
        Self::new(ResourceState::Absent)
    }

    pub fn with_warning(mut self, warning: Diagnostic) -> Self {
        self.warnings.push(warning);
        self
    }

    pub fn is_removed(&self) -> bool {
        self.state.is_absent()
    }
}
