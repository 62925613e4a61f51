//! Provides helper functions for initializing telemetry collection and publication.
use std::time::Duration;

use anyhow::Result;
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{metrics::MeterProvider, runtime, trace, Resource};
use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter, Registry};

const SERVICE_NAME: &str = "myapp-operator";

fn resource() -> Resource {
    Resource::new(vec![
        KeyValue::new(
            "hostname",
            gethostname::gethostname()
                .into_string()
                .expect("hostname should be valid utf-8"),
        ),
        KeyValue::new("service.name", SERVICE_NAME),
    ])
}

/// Installed telemetry pipelines.
///
/// Call [`Telemetry::shutdown`] before exiting so buffered spans and metrics are flushed.
pub struct Telemetry {
    meter_provider: Option<MeterProvider>,
}

impl Telemetry {
    /// Flush and stop the trace and metric exporters, if any were installed.
    pub fn shutdown(self) -> Result<()> {
        if let Some(meter_provider) = self.meter_provider {
            global::shutdown_tracer_provider();
            meter_provider.shutdown()?;
        }
        Ok(())
    }
}

/// Initialize tracing and metrics.
///
/// Console logging is always installed. Traces and metrics are only exported when an OTLP
/// endpoint is provided.
pub async fn init(otlp_endpoint: Option<String>) -> Result<Telemetry> {
    let (otlp_layer, meter_provider) = match otlp_endpoint {
        Some(otlp_endpoint) => {
            let tracer = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(otlp_endpoint.clone()),
                )
                .with_trace_config(trace::config().with_resource(resource()))
                .install_batch(runtime::Tokio)?;

            let meter_provider = opentelemetry_otlp::new_pipeline()
                .metrics(runtime::Tokio)
                .with_exporter(
                    opentelemetry_otlp::new_exporter()
                        .tonic()
                        .with_endpoint(otlp_endpoint),
                )
                .with_resource(resource())
                .with_period(Duration::from_secs(10))
                .build()?;
            global::set_meter_provider(meter_provider.clone());

            let otlp_filter = EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()?;
            let layer = tracing_opentelemetry::layer()
                .with_tracer(tracer)
                .with_filter(otlp_filter);
            (Some(layer), Some(meter_provider))
        }
        None => (None, None),
    };

    // Default to INFO if no env is specified
    let log_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env()?;
    let logger = tracing_subscriber::fmt::layer()
        .with_ansi(true)
        .compact()
        .with_filter(log_filter);

    let collector = Registry::default().with(otlp_layer).with(logger);

    #[cfg(feature = "tokio-console")]
    let collector = {
        let console_filter = EnvFilter::builder().parse("tokio=trace,runtime=trace")?;
        let console_layer = console_subscriber::spawn().with_filter(console_filter);
        collector.with(console_layer)
    };

    tracing::subscriber::set_global_default(collector)?;

    Ok(Telemetry { meter_provider })
}
