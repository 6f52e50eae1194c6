use std::env;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryProtocol {
    Grpc,
    HttpProtobuf,
}

impl TelemetryProtocol {
    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "http" | "http/protobuf" => TelemetryProtocol::HttpProtobuf,
            _ => TelemetryProtocol::Grpc,
        }
    }
}

/// Subscriber and exporter settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub service_version: String,
    pub environment: String,
    pub json_logs: bool,
    pub otlp_enabled: bool,
    pub endpoint: String,
    pub protocol: TelemetryProtocol,
}

impl TelemetryConfig {
    /// Text logs, no export.
    pub fn local(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "dev".into(),
            json_logs: false,
            otlp_enabled: false,
            endpoint: String::new(),
            protocol: TelemetryProtocol::Grpc,
        }
    }

    pub fn from_env(default_service_name: &str, default_service_version: &str) -> Self {
        Self::from_lookup(default_service_name, default_service_version, |key| {
            env::var(key).ok()
        })
    }

    /// Reads the standard `OTEL_*`, `LOG_FORMAT`, `ENABLE_OTEL` and `DEPLOYMENT_ENV` keys.
    pub fn from_lookup<F>(
        default_service_name: &str,
        default_service_version: &str,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").unwrap_or_default();
        let protocol = lookup("OTEL_EXPORTER_OTLP_PROTOCOL")
            .map(|v| TelemetryProtocol::parse(&v))
            .unwrap_or(TelemetryProtocol::Grpc);
        let environment = lookup("OTEL_RESOURCE_ATTRIBUTES")
            .and_then(|attrs| environment_from_resource(&attrs))
            .or_else(|| lookup("DEPLOYMENT_ENV"))
            .unwrap_or_else(|| "dev".into());
        let json_logs = lookup("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let otlp_flag = lookup("ENABLE_OTEL")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| default_service_name.to_string()),
            service_version: lookup("OTEL_SERVICE_VERSION")
                .unwrap_or_else(|| default_service_version.to_string()),
            environment,
            json_logs,
            otlp_enabled: otlp_flag && !endpoint.trim().is_empty(),
            endpoint,
            protocol,
        }
    }

    pub fn exporter_enabled(&self) -> bool {
        self.otlp_enabled && !self.endpoint.trim().is_empty()
    }
}

fn environment_from_resource(attrs: &str) -> Option<String> {
    attrs.split(',').find_map(|kv| {
        let (key, value) = kv.split_once('=')?;
        (key.trim() == "deployment.environment").then(|| value.trim().to_string())
    })
}
