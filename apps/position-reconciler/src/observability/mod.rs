//! Logging setup for the reconciler service.
//!
//! Installs a `tracing-subscriber` registry filtered by `RUST_LOG` when it
//! is set, or by `observability.logging.level` for this crate otherwise.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::config::LoggingConfig;

/// Error type for tracing setup.
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    /// Log directive could not be parsed.
    #[error("invalid log directive '{directive}': {message}")]
    InvalidDirective {
        /// The rejected directive.
        directive: String,
        /// Parser message.
        message: String,
    },
    /// A global subscriber is already installed.
    #[error("failed to initialize tracing subscriber: {0}")]
    SubscriberError(String),
}

/// Build the env filter.
///
/// A non-empty `RUST_LOG` replaces the configured level entirely; otherwise
/// only this crate logs, at `observability.logging.level`.
///
/// # Errors
///
/// Returns `TracingError::InvalidDirective` when the configured level or
/// `RUST_LOG` does not parse.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TracingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(config, rust_log.as_deref())
}

fn filter_from(
    config: &LoggingConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TracingError> {
    let directive = format!("position_reconciler={}", config.level.to_lowercase());
    let parsed = directive
        .parse()
        .map_err(|e: ParseError| invalid(&directive, &e))?;

    let Some(dirs) = rust_log.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(EnvFilter::default().add_directive(parsed));
    };
    EnvFilter::try_new(dirs).map_err(|e| invalid(dirs, &e))
}

fn invalid(directive: &str, err: &ParseError) -> TracingError {
    TracingError::InvalidDirective {
        directive: directive.to_string(),
        message: err.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the level is not a valid directive or a subscriber
/// has already been set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TracingError> {
    let filter = env_filter(config)?;
    let span_events = if config.include_spans {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format.as_str() {
        "pretty" => fmt::layer()
            .pretty()
            .with_target(true)
            .with_span_events(span_events)
            .boxed(),
        "compact" => fmt::layer()
            .compact()
            .with_target(false)
            .with_span_events(span_events)
            .boxed(),
        _ => fmt::layer().json().with_span_events(span_events).boxed(),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| TracingError::SubscriberError(e.to_string()))
}
