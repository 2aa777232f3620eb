//! Cross-field validation of declarations
//!
//! Runs before any remote call. A failed check is always a
//! [`Error::Config`] naming the conflicting fields.

use crate::error::{Error, Result};
use crate::resources::{
    DomainVerificationConfig, SendingDomainConfig, TrackingDomainAssociationConfig,
    TrackingDomainConfig, subaccount_scope,
};

/// A declaration that can be checked without talking to the remote API
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Basic DNS name check per RFC 1035
///
/// The domain doubles as the remote entity's key in request paths, so
/// anything outside letters, digits, hyphens and dots is refused.
fn require_domain(field: &str, value: &str) -> Result<()> {
    let invalid = |reason: String| -> Result<()> {
        Err(Error::config(format!(
            "\"{}\" is not a valid domain name: {}",
            field, reason
        )))
    };

    if value.trim().is_empty() {
        return Err(Error::config(format!("\"{}\" cannot be empty", field)));
    }

    // RFC 1035: 253 chars max
    if value.len() > 253 {
        return invalid(format!("{} chars (max 253)", value.len()));
    }

    for label in value.split('.') {
        if label.is_empty() {
            return invalid(format!("empty label in '{}'", value));
        }
        if label.len() > 63 {
            return invalid(format!("label '{}' is {} chars (max 63)", label, label.len()));
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return invalid(format!(
                "label '{}' contains invalid characters (alphanumeric and hyphen only)",
                label
            ));
        }
        if label.starts_with('-') || label.ends_with('-') {
            return invalid(format!("label '{}' starts or ends with a hyphen", label));
        }
    }

    Ok(())
}

impl Validate for SendingDomainConfig {
    fn validate(&self) -> Result<()> {
        require_domain("domain", &self.domain)?;

        if subaccount_scope(self.subaccount).is_none() {
            return Ok(());
        }

        let conflicts: Vec<&str> = [
            ("shared_with_subaccounts", self.shared_with_subaccounts),
            ("default_bounce_domain", self.default_bounce_domain),
        ]
        .into_iter()
        .filter_map(|(field, set)| set.then_some(field))
        .collect();

        if conflicts.is_empty() {
            return Ok(());
        }

        Err(Error::config(format!(
            "\"subaccount\" cannot be set together with {}",
            conflicts
                .iter()
                .map(|field| format!("\"{}\"", field))
                .collect::<Vec<_>>()
                .join(" or ")
        )))
    }
}

impl Validate for TrackingDomainConfig {
    fn validate(&self) -> Result<()> {
        require_domain("domain", &self.domain)
    }
}

impl Validate for DomainVerificationConfig {
    fn validate(&self) -> Result<()> {
        require_domain("domain", &self.domain)
    }
}

impl Validate for TrackingDomainAssociationConfig {
    fn validate(&self) -> Result<()> {
        require_domain("domain", &self.domain)?;
        require_domain("tracking_domain", &self.tracking_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_subaccount_alone_is_valid() {
        let config = SendingDomainConfig::new("example.com").with_subaccount(5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_shared_alone_is_valid() {
        let config = SendingDomainConfig::new("example.com")
            .with_shared_with_subaccounts(true)
            .with_default_bounce_domain(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_subaccount_with_shared_rejected() {
        let err = SendingDomainConfig::new("example.com")
            .with_subaccount(5)
            .with_shared_with_subaccounts(true)
            .validate()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("\"shared_with_subaccounts\""));
    }

    #[test]
    fn test_subaccount_with_both_names_both_fields() {
        let err = SendingDomainConfig::new("example.com")
            .with_subaccount(5)
            .with_shared_with_subaccounts(true)
            .with_default_bounce_domain(true)
            .validate()
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("\"shared_with_subaccounts\" or \"default_bounce_domain\""));
    }

    #[test]
    fn test_zero_subaccount_does_not_conflict() {
        let config = SendingDomainConfig::new("example.com")
            .with_subaccount(0)
            .with_default_bounce_domain(true);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_domain_rejected() {
        assert!(TrackingDomainConfig::new("").validate().is_err());
        assert!(DomainVerificationConfig::new("bad/domain").validate().is_err());
    }

    #[test]
    fn test_association_requires_tracking_domain() {
        let config = TrackingDomainAssociationConfig::new("example.com", " ");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("tracking_domain"));
    }

    #[test]
    fn test_domain_rejects_path_and_url_syntax() {
        for bad in ["victim.com#x", "victim.com?x=1", "victim%2Ecom", "..", ".", "a..b", "example.com."] {
            let err = SendingDomainConfig::new(bad).validate().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{bad}");
        }
    }

    #[test]
    fn test_domain_label_rules() {
        assert!(TrackingDomainConfig::new("click-1.example.com").validate().is_ok());
        assert!(TrackingDomainConfig::new("-click.example.com").validate().is_err());
        assert!(TrackingDomainConfig::new("click-.example.com").validate().is_err());
        assert!(TrackingDomainConfig::new("ex_ample.com").validate().is_err());

        let long_label = format!("{}.com", "a".repeat(64));
        let err = TrackingDomainConfig::new(long_label).validate().unwrap_err();
        assert!(err.to_string().contains("max 63"));

        let long_name = vec!["a".repeat(63); 5].join(".");
        let err = TrackingDomainConfig::new(long_name).validate().unwrap_err();
        assert!(err.to_string().contains("max 253"));
    }
}
