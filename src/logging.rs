use tracing_subscriber::{filter::ParseError, fmt, EnvFilter};

use crate::config::LoggingSettings;

/// `RUST_LOG` wins over the configured level
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))
}

/// Install the global tracing subscriber for a host application
///
/// `format = "pretty"` gives human-readable output, anything else emits
/// JSON lines.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let subscriber = fmt()
        .with_env_filter(build_filter(settings)?)
        .with_target(false)
        .with_level(true);

    if settings.format == "pretty" {
        subscriber.pretty().try_init()
    } else {
        subscriber.json().try_init()
    }
}
