//! Logging and metric helpers shared by the translator and dispatch crates.
//!
//! [`install`] sets up a `tracing` subscriber (text or JSON, filtered by `RUST_LOG`) and, when
//! enabled through the environment, OTLP trace export. Metrics go through the `metrics` facade.

use anyhow::Result;

mod config;
mod context;
mod recorders;
mod tracing_init;

pub use config::{TelemetryConfig, TelemetryProtocol};
pub use context::TelemetryLabels;
pub use recorders::{record_counter, record_histogram};
pub use tracing_init::{init_telemetry, telemetry_enabled, with_common_fields};

/// Installs the subscriber configured from the process environment.
///
/// ```no_run
/// wai_telemetry::install("wai-bot")?;
/// assert!(wai_telemetry::telemetry_enabled());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn install(service_name: &str) -> Result<()> {
    init_telemetry(TelemetryConfig::from_env(
        service_name,
        env!("CARGO_PKG_VERSION"),
    ))
}
