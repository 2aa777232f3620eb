// # host_session - minimal reconciliation host
//
// Drives one provider session the way a declarative host would: configure
// once, refresh the committed resources, print what the host would show.
// All reconciliation logic lives in the library crates; this binary only
// wires configuration, logging and the runtime.
//
// ## Configuration
//
// - `SPARKPOST_API_KEY`: API key (required)
// - `SPARKPOST_API_URL`: API base URL (optional)
// - `DOMAINCTL_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `DOMAINCTL_SENDING_DOMAIN`: sending domain to refresh (optional)
// - `DOMAINCTL_SUBACCOUNT`: subaccount the domain belongs to (optional)
//
// ## Example
//
// ```bash
// export SPARKPOST_API_KEY=your_key
// export DOMAINCTL_SENDING_DOMAIN=mail.example.com
//
// host_session
// ```

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use domainctl_core::resources::SendingDomainConfig;
use domainctl_core::traits::into_diagnostics;
use domainctl_core::{DataSource, Diagnostic, Operation, Reconciler, ResourceState};
use domainctl_sparkpost::SparkPostProvider;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

const LOG_LEVEL_ENV: &str = "DOMAINCTL_LOG_LEVEL";
const SENDING_DOMAIN_ENV: &str = "DOMAINCTL_SENDING_DOMAIN";
const SUBACCOUNT_ENV: &str = "DOMAINCTL_SUBACCOUNT";

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum SessionExitCode {
    Clean = 0,
    ConfigError = 1,
    RuntimeError = 2,
    /// The session ran but the host would report error diagnostics
    Diagnostics = 3,
}

impl From<SessionExitCode> for ExitCode {
    fn from(code: SessionExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn log_level() -> Result<Level> {
    let raw = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string());
    match raw.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "{} '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            LOG_LEVEL_ENV,
            raw
        ),
    }
}

/// The sending domain to refresh, if one was named
fn declared_domain() -> Result<Option<SendingDomainConfig>> {
    let Ok(domain) = env::var(SENDING_DOMAIN_ENV) else {
        return Ok(None);
    };

    let mut config = SendingDomainConfig::new(domain);
    if let Ok(raw) = env::var(SUBACCOUNT_ENV) {
        let subaccount = raw
            .parse::<u64>()
            .with_context(|| format!("{} must be a non-negative integer, got '{}'", SUBACCOUNT_ENV, raw))?;
        config = config.with_subaccount(subaccount);
    }
    Ok(Some(config))
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        if diagnostic.is_error() {
            error!(summary = %diagnostic.summary, "{}", diagnostic.detail);
        } else {
            warn!(summary = %diagnostic.summary, "{}", diagnostic.detail);
        }
    }
}

async fn run_session(provider: SparkPostProvider, declared: Option<SendingDomainConfig>) -> Result<bool> {
    let listing = provider
        .subaccounts()
        .read()
        .await
        .context("Listing subaccounts failed")?;

    info!(count = listing.subaccounts.len(), "Subaccounts visible to this key");
    for subaccount in &listing.subaccounts {
        info!(id = subaccount.id, name = %subaccount.name, "Subaccount");
    }

    let Some(declared) = declared else {
        return Ok(true);
    };

    // Refresh as if the declared domain had been committed earlier
    let committed = declared.snapshot();
    let result = provider.sending_domains().read(&committed).await;
    let (outcome, diagnostics) = into_diagnostics(Operation::Read, result);
    report(&diagnostics);

    match outcome.map(|o| o.state) {
        Some(ResourceState::Absent) => {
            info!(domain = %committed.id, "Sending domain is gone; the host would drop it from state");
        }
        Some(ResourceState::Present(observed)) | Some(ResourceState::Verified { record: observed, .. }) => {
            info!(
                domain = %observed.id,
                shared_with_subaccounts = observed.shared_with_subaccounts,
                default_bounce_domain = observed.default_bounce_domain,
                "Sending domain refreshed"
            );
        }
        None => {}
    }

    Ok(!domainctl_core::diagnostics::has_errors(&diagnostics))
}

fn main() -> ExitCode {
    let level = match log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return SessionExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return SessionExitCode::ConfigError.into();
    }

    let declared = match declared_domain() {
        Ok(declared) => declared,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return SessionExitCode::ConfigError.into();
        }
    };

    let provider = match SparkPostProvider::from_env() {
        Ok(provider) => provider,
        Err(e) => {
            error!("Provider configuration failed: {}", e);
            return SessionExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return SessionExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run_session(provider, declared).await {
            Ok(true) => SessionExitCode::Clean,
            Ok(false) => SessionExitCode::Diagnostics,
            Err(e) => {
                error!("Session failed: {:#}", e);
                SessionExitCode::RuntimeError
            }
        }
    });

    code.into()
}
