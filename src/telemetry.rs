use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::Tracer;
use opentelemetry_sdk::Resource;
use secrecy::ExposeSecret;
use tonic::metadata::MetadataMap;
use tracing::subscriber::set_global_default;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

use crate::configuration::TelemetrySettings;

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over
/// `env_filter` when set.
pub fn init_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
    settings: &TelemetrySettings,
) -> anyhow::Result<()>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    LogTracer::init().map_err(|e| anyhow::anyhow!("Failed to set logger. {e}"))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = fmt::layer().with_writer(sink);

    let registry = Registry::default().with(env_filter).with(formatting_layer);
    if let Some(open_telemetry_tracer) = telemetry_layer(name, settings)? {
        let telemetry_layer = tracing_opentelemetry::layer().with_tracer(open_telemetry_tracer);
        let registry = registry.with(telemetry_layer);
        set_global_default(registry)?;
    } else {
        set_global_default(registry)?;
    }
    Ok(())
}

/// OTLP exporter, `None` when telemetry is disabled.
pub fn telemetry_layer(name: String, settings: &TelemetrySettings) -> anyhow::Result<Option<Tracer>> {
    if !settings.enabled {
        return Ok(None);
    }
    let mut meta_data = MetadataMap::new();
    meta_data.insert(
        "x-honeycomb-team",
        settings
            .api_key
            .expose_secret()
            .parse()
            .map_err(|e| anyhow::anyhow!("Failed to parse honeycomb api key. {e}"))?,
    );
    let open_telemetry_tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(
            opentelemetry_otlp::new_exporter()
                .tonic()
                .with_metadata(meta_data)
                .with_endpoint(&settings.endpoint)
                .with_tls_config(Default::default()),
        )
        .with_trace_config(
            opentelemetry_sdk::trace::config()
                .with_resource(Resource::new(vec![KeyValue::new("service.name", name)])),
        )
        .install_batch(opentelemetry_sdk::runtime::Tokio)
        .map_err(|e| anyhow::anyhow!("Failed to get opentelemetry tracer. {e}"))?;
    Ok(Some(open_telemetry_tracer))
}
