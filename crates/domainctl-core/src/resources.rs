//! Declared resource configurations and their state snapshots
//!
//! Each resource kind has a declaration (what the operator wants) and a
//! snapshot (what was last committed to host state). Snapshots are keyed
//! by the remote natural key, which for every kind here is the domain name.

use serde::{Deserialize, Serialize};

use crate::state::ChangePlan;

/// Host-facing resource type names
pub mod type_names {
    pub const SENDING_DOMAIN: &str = "sparkpost_domain";
    pub const TRACKING_DOMAIN: &str = "sparkpost_tracking_domain";
    pub const DOMAIN_OWNERSHIP_VERIFICATION: &str = "sparkpost_domain_ownership_verification";
    pub const DOMAIN_BOUNCE_VERIFICATION: &str = "sparkpost_domain_bounce_verification";
    pub const TRACKING_DOMAIN_VERIFICATION: &str = "sparkpost_tracking_domain_verification";
    pub const TRACKING_DOMAIN_ASSOCIATION: &str = "sparkpost_tracking_domain_association";
    pub const SUBACCOUNTS: &str = "sparkpost_subaccounts";
}

/// Normalize a subaccount id: zero means account-level scope
pub fn subaccount_scope(subaccount: Option<u64>) -> Option<u64> {
    subaccount.filter(|id| *id > 0)
}

/// A declaration that can be diffed against its committed snapshot
pub trait Declaration {
    /// Snapshot type this declaration commits to
    type Snapshot;

    /// Attributes that may change without replacing the resource
    const UPDATABLE: &'static [&'static str] = &[];

    /// Names of attributes whose declared value differs from the snapshot
    fn changed_attributes(&self, prior: &Self::Snapshot) -> Vec<&'static str>;

    /// Decide between no-op, in-place update and replacement
    fn plan(&self, prior: &Self::Snapshot) -> ChangePlan {
        ChangePlan::classify(self.changed_attributes(prior), Self::UPDATABLE)
    }
}

fn push_if(changed: &mut Vec<&'static str>, attr: &'static str, differs: bool) {
    if differs {
        changed.push(attr);
    }
}

// ---------------------------------------------------------------------------
// Sending domain
// ---------------------------------------------------------------------------

/// Declared sending domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingDomainConfig {
    pub domain: String,
    #[serde(default)]
    pub subaccount: Option<u64>,
    #[serde(default)]
    pub shared_with_subaccounts: bool,
    #[serde(default)]
    pub default_bounce_domain: bool,
}

impl SendingDomainConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subaccount: None,
            shared_with_subaccounts: false,
            default_bounce_domain: false,
        }
    }

    pub fn with_subaccount(mut self, subaccount: u64) -> Self {
        self.subaccount = Some(subaccount);
        self
    }

    pub fn with_shared_with_subaccounts(mut self, shared: bool) -> Self {
        self.shared_with_subaccounts = shared;
        self
    }

    pub fn with_default_bounce_domain(mut self, default_bounce: bool) -> Self {
        self.default_bounce_domain = default_bounce;
        self
    }

    /// Snapshot committed after a successful create
    pub fn snapshot(&self) -> SendingDomain {
        SendingDomain {
            id: self.domain.clone(),
            domain: self.domain.clone(),
            subaccount: subaccount_scope(self.subaccount),
            shared_with_subaccounts: self.shared_with_subaccounts,
            default_bounce_domain: self.default_bounce_domain,
        }
    }
}

/// Committed sending domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendingDomain {
    pub id: String,
    pub domain: String,
    pub subaccount: Option<u64>,
    pub shared_with_subaccounts: bool,
    pub default_bounce_domain: bool,
}

impl Declaration for SendingDomainConfig {
    type Snapshot = SendingDomain;

    fn changed_attributes(&self, prior: &SendingDomain) -> Vec<&'static str> {
        let mut changed = Vec::new();
        push_if(&mut changed, "domain", self.domain != prior.domain);
        push_if(
            &mut changed,
            "subaccount",
            subaccount_scope(self.subaccount) != subaccount_scope(prior.subaccount),
        );
        push_if(
            &mut changed,
            "shared_with_subaccounts",
            self.shared_with_subaccounts != prior.shared_with_subaccounts,
        );
        push_if(
            &mut changed,
            "default_bounce_domain",
            self.default_bounce_domain != prior.default_bounce_domain,
        );
        changed
    }
}

// ---------------------------------------------------------------------------
// Tracking domain
// ---------------------------------------------------------------------------

/// Declared tracking domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDomainConfig {
    pub domain: String,
    #[serde(default)]
    pub https: bool,
    #[serde(default)]
    pub subaccount: Option<u64>,
}

impl TrackingDomainConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            https: false,
            subaccount: None,
        }
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_subaccount(mut self, subaccount: u64) -> Self {
        self.subaccount = Some(subaccount);
        self
    }

    pub fn snapshot(&self) -> TrackingDomain {
        TrackingDomain {
            id: self.domain.clone(),
            domain: self.domain.clone(),
            https: self.https,
            subaccount: subaccount_scope(self.subaccount),
        }
    }
}

/// Committed tracking domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDomain {
    pub id: String,
    pub domain: String,
    pub https: bool,
    pub subaccount: Option<u64>,
}

impl Declaration for TrackingDomainConfig {
    type Snapshot = TrackingDomain;

    const UPDATABLE: &'static [&'static str] = &["https"];

    fn changed_attributes(&self, prior: &TrackingDomain) -> Vec<&'static str> {
        let mut changed = Vec::new();
        push_if(&mut changed, "domain", self.domain != prior.domain);
        push_if(&mut changed, "https", self.https != prior.https);
        push_if(
            &mut changed,
            "subaccount",
            subaccount_scope(self.subaccount) != subaccount_scope(prior.subaccount),
        );
        changed
    }
}

// ---------------------------------------------------------------------------
// Verifications (ownership, bounce, tracking domain)
// ---------------------------------------------------------------------------

/// Declared verification of a sending or tracking domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVerificationConfig {
    pub domain: String,
    #[serde(default)]
    pub subaccount: Option<u64>,
}

impl DomainVerificationConfig {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subaccount: None,
        }
    }

    pub fn with_subaccount(mut self, subaccount: u64) -> Self {
        self.subaccount = Some(subaccount);
        self
    }

    pub fn snapshot(&self) -> DomainVerification {
        DomainVerification {
            id: self.domain.clone(),
            domain: self.domain.clone(),
            subaccount: subaccount_scope(self.subaccount),
        }
    }
}

/// Committed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainVerification {
    pub id: String,
    pub domain: String,
    pub subaccount: Option<u64>,
}

impl Declaration for DomainVerificationConfig {
    type Snapshot = DomainVerification;

    fn changed_attributes(&self, prior: &DomainVerification) -> Vec<&'static str> {
        let mut changed = Vec::new();
        push_if(&mut changed, "domain", self.domain != prior.domain);
        push_if(
            &mut changed,
            "subaccount",
            subaccount_scope(self.subaccount) != subaccount_scope(prior.subaccount),
        );
        changed
    }
}

// ---------------------------------------------------------------------------
// Tracking domain association
// ---------------------------------------------------------------------------

/// Declared association of a tracking domain with a sending domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDomainAssociationConfig {
    pub domain: String,
    pub tracking_domain: String,
    #[serde(default)]
    pub subaccount: Option<u64>,
}

impl TrackingDomainAssociationConfig {
    pub fn new(domain: impl Into<String>, tracking_domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            tracking_domain: tracking_domain.into(),
            subaccount: None,
        }
    }

    pub fn with_subaccount(mut self, subaccount: u64) -> Self {
        self.subaccount = Some(subaccount);
        self
    }

    pub fn snapshot(&self) -> TrackingDomainAssociation {
        TrackingDomainAssociation {
            id: self.domain.clone(),
            domain: self.domain.clone(),
            tracking_domain: self.tracking_domain.clone(),
            subaccount: subaccount_scope(self.subaccount),
        }
    }
}

/// Committed association; an empty `tracking_domain` means disassociated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingDomainAssociation {
    pub id: String,
    pub domain: String,
    pub tracking_domain: String,
    pub subaccount: Option<u64>,
}

impl Declaration for TrackingDomainAssociationConfig {
    type Snapshot = TrackingDomainAssociation;

    fn changed_attributes(&self, prior: &TrackingDomainAssociation) -> Vec<&'static str> {
        let mut changed = Vec::new();
        push_if(&mut changed, "domain", self.domain != prior.domain);
        push_if(
            &mut changed,
            "tracking_domain",
            self.tracking_domain != prior.tracking_domain,
        );
        push_if(
            &mut changed,
            "subaccount",
            subaccount_scope(self.subaccount) != subaccount_scope(prior.subaccount),
        );
        changed
    }
}

// ---------------------------------------------------------------------------
// Subaccounts (read-only)
// ---------------------------------------------------------------------------

/// A subaccount as listed by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subaccount {
    pub id: u64,
    pub name: String,
}

/// Read-only listing of every subaccount, in remote order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubaccountListing {
    pub subaccounts: Vec<Subaccount>,
}
