//! Tracing setup for hosts embedding the engine
//!
//! The engine only emits `tracing` events. A host (server, CLI, test
//! harness) calls [`init_tracing`] once to install a subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{EngineError, EngineResult};

/// Install a global subscriber honouring RUST_LOG, falling back to the configured filter
pub fn init_tracing(config: &LoggingConfig) -> EngineResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| EngineError::Telemetry(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| EngineError::Telemetry(e.to_string()))
}
