use sentry::ClientInitGuard;
use sentry_tracing::EventFilter;
use std::borrow::Cow;
use thiserror::Error;
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug)]
pub struct TracingConfig {
    // Set by the binary, otherwise the sentry release names this crate
    pub package: &'static str,
    pub version: &'static str,
    #[builder(default)]
    pub sentry_dsn: Option<String>,
    #[builder(setter(into), default = String::from("dev"))]
    pub env: String,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

pub struct TracingGuard {
    _sentry: Option<ClientInitGuard>,
}

/// Installs the fmt layer, an `EnvFilter` defaulting to `INFO` and, with a dsn, the sentry layer.
pub fn setup(config: TracingConfig) -> Result<TracingGuard, Error> {
    let sentry_guard = config.sentry_dsn.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: Some(Cow::Owned(format!("{}@{}", config.package, config.version))),
                environment: Some(Cow::Owned(config.env.clone())),
                ..Default::default()
            },
        ))
    });

    let sentry_layer = sentry_guard.as_ref().map(|_| {
        sentry_tracing::layer().event_filter(|md| match *md.level() {
            Level::ERROR => EventFilter::Event,
            Level::TRACE => EventFilter::Ignore,
            _ => EventFilter::Breadcrumb,
        })
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with(sentry_layer)
        .try_init()?;

    tracing::debug!(package = config.package, env = %config.env, "tracing initialized");
    Ok(TracingGuard { _sentry: sentry_guard })
}
