use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{ExporterBuildError, Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{TelemetryConfig, TelemetryProtocol};

static INIT: OnceLock<()> = OnceLock::new();
static TELEMETRY_ENABLED: AtomicBool = AtomicBool::new(false);

/// Installs the global subscriber once; later calls only refresh the enabled flag.
pub fn init_telemetry(cfg: TelemetryConfig) -> Result<()> {
    TELEMETRY_ENABLED.store(true, Ordering::SeqCst);
    if INIT.get().is_some() {
        return Ok(());
    }

    let fmt_layer = if cfg.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    if cfg.exporter_enabled() {
        let tracer_provider = SdkTracerProvider::builder()
            .with_resource(service_resource(&cfg))
            .with_batch_exporter(span_exporter(&cfg)?)
            .build();
        let tracer = tracer_provider.tracer(cfg.service_name.clone());
        global::set_tracer_provider(tracer_provider);
        global::set_text_map_propagator(TraceContextPropagator::new());
        registry.with(OpenTelemetryLayer::new(tracer)).try_init().ok();
    } else {
        registry.try_init().ok();
    }

    INIT.set(()).ok();
    Ok(())
}

/// True once [`init_telemetry`] has run in this process.
pub fn telemetry_enabled() -> bool {
    TELEMETRY_ENABLED.load(Ordering::SeqCst)
}

/// Records the recipient and, when known, the message id on a span declared with those fields.
pub fn with_common_fields(span: &Span, jid: &str, msg_id: Option<&str>) {
    span.record("jid", tracing::field::display(jid));
    if let Some(msg_id) = msg_id {
        span.record("msg_id", tracing::field::display(msg_id));
    }
}

fn span_exporter(cfg: &TelemetryConfig) -> Result<SpanExporter, ExporterBuildError> {
    let endpoint = cfg.endpoint.trim().to_string();
    match cfg.protocol {
        TelemetryProtocol::Grpc => SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build(),
        TelemetryProtocol::HttpProtobuf => SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(endpoint)
            .build(),
    }
}

/// Service identity attached to every exported span.
fn service_resource(cfg: &TelemetryConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(cfg.service_name.clone())
        .with_attribute(KeyValue::new("service.version", cfg.service_version.clone()))
        .with_attribute(KeyValue::new("deployment.environment", cfg.environment.clone()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{Key, Value};

    #[test]
    fn local_init_enables_recording_and_is_idempotent() {
        init_telemetry(TelemetryConfig::local("wai")).unwrap();
        assert!(telemetry_enabled());
        init_telemetry(TelemetryConfig::local("wai")).unwrap();
        assert!(telemetry_enabled());
    }

    #[test]
    fn resource_carries_service_identity() {
        let mut cfg = TelemetryConfig::local("wai-bot");
        cfg.environment = "staging".into();
        let resource = service_resource(&cfg);
        assert_eq!(
            resource.get(&Key::new("service.name")),
            Some(Value::from("wai-bot"))
        );
        assert_eq!(
            resource.get(&Key::new("deployment.environment")),
            Some(Value::from("staging"))
        );
    }
}
