mod logs;
mod metrics;
mod otel;
mod shutdown;
mod tracer;

pub use self::logs::{LogOptions, init_logger};
pub use self::metrics::{Method, Metrics, ProcessMetrics, Status, run_metrics_collector};
pub use self::otel::{Telemetry, TelemetryProviders, TracingContext};
pub use self::shutdown::shutdown_signal;
pub use self::tracer::ServiceTracer;
