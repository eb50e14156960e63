//! Tracing subscriber configuration for the CLI
//!
//! The library only emits trace events; the CLI configures the subscriber
//! here, mapping `-v` counts onto filter levels.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Tracing setup for CLI runs
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingConfig {
    /// Verbosity level from repeated `-v` flags
    pub verbosity: u8,
}

impl TracingConfig {
    /// Create a configuration with the given verbosity
    #[must_use]
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }

    /// Convert verbosity level to a tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the global subscriber. `RUST_LOG` overrides verbosity.
    ///
    /// # Errors
    /// - Invalid `RUST_LOG` filter expression
    /// - Subscriber already installed
    pub fn init(self) -> anyhow::Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.verbosity_to_filter()))?;

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .compact();

        Registry::default()
            .with(filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {e}"))?;
        Ok(())
    }
}
