use super::{Method, Metrics, Status, TracingContext};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info};

/// Span and request metrics bookkeeping shared by every service.
///
/// Each service owns one, named after it; its counters are registered under
/// `<prefix>_request_counter` and `<prefix>_request_duration`.
#[derive(Clone)]
pub struct ServiceTracer {
    tracer_name: &'static str,
    metrics: Arc<Mutex<Metrics>>,
}

impl ServiceTracer {
    pub async fn new(
        tracer_name: &'static str,
        metric_prefix: &str,
        registry: &Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();

        let mut registry = registry.lock().await;
        registry.register(
            format!("{metric_prefix}_request_counter"),
            format!("Total number of requests to the {tracer_name}"),
            metrics.request_counter.clone(),
        );
        registry.register(
            format!("{metric_prefix}_request_duration"),
            format!("Histogram of request durations for the {tracer_name}"),
            metrics.request_duration.clone(),
        );

        Self {
            tracer_name,
            metrics: Arc::new(Mutex::new(metrics)),
        }
    }

    fn get_tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start_tracing(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.get_tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub async fn complete_tracing_success(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, true, message)
            .await;
    }

    pub async fn complete_tracing_error(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        error_message: &str,
    ) {
        self.complete_tracing_internal(tracing_ctx, method, false, error_message)
            .await;
    }

    async fn complete_tracing_internal(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        is_success: bool,
        message: &str,
    ) {
        let status_str = if is_success { "SUCCESS" } else { "ERROR" };
        let status = if is_success {
            Status::Success
        } else {
            Status::Error
        };
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        if is_success {
            info!("✅ Operation completed successfully: {message}");
        } else {
            error!("❌ Operation failed: {message}");
        }

        self.metrics.lock().await.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}
