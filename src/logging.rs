use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::LoggingSettings;

fn create_filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter))
}

fn create_console_layer<S>(settings: &LoggingSettings) -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    if settings.json {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_filter(create_filter(settings))
            .boxed()
    } else {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(create_filter(settings))
            .boxed()
    }
}

/// Installs the global subscriber. Returns `false` when one was already set.
pub fn init_tracing(settings: &LoggingSettings) -> bool {
    tracing_subscriber::registry()
        .with(create_console_layer(settings))
        .try_init()
        .is_ok()
}
