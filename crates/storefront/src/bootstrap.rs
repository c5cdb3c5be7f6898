//! Process setup for the storefront binary: Sentry, the tracing subscriber and
//! the shutdown signal.

use std::borrow::Cow;

use sentry::integrations::tracing::{self as sentry_tracing, EventFilter};
use techsolutions_storefront::config::StorefrontConfig;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "techsolutions_storefront=info,tower_http=debug";

/// Holds the Sentry client for the life of the process.
pub struct Telemetry {
    _sentry: Option<sentry::ClientInitGuard>,
}

impl Telemetry {
    /// Start Sentry when a DSN is configured, then install the global
    /// subscriber. `RUST_LOG` overrides the default filter.
    pub fn install(config: &StorefrontConfig) -> Self {
        let sentry = config.sentry_dsn.as_deref().map(|dsn| {
            sentry::init((
                dsn,
                sentry::ClientOptions {
                    release: sentry::release_name!(),
                    environment: config.sentry_environment.clone().map(Cow::Owned),
                    sample_rate: config.sentry_sample_rate,
                    traces_sample_rate: config.sentry_traces_sample_rate,
                    attach_stacktrace: true,
                    ..Default::default()
                },
            ))
        });

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .with(sentry_tracing::layer().event_filter(sentry_kind))
            .init();

        if sentry.is_some() {
            tracing::info!("Sentry enabled");
        }
        Self { _sentry: sentry }
    }
}

/// Errors and warnings are reported; info and debug ride along as breadcrumbs.
fn sentry_kind(metadata: &tracing::Metadata<'_>) -> EventFilter {
    match *metadata.level() {
        Level::ERROR | Level::WARN => EventFilter::Event,
        Level::INFO | Level::DEBUG => EventFilter::Breadcrumb,
        Level::TRACE => EventFilter::Ignore,
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = terminate.recv() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    let _ = tokio::signal::ctrl_c().await;

    tracing::info!("Shutdown requested, draining connections");
}
