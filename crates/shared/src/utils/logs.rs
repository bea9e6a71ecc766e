use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use tracing_appender::{
    non_blocking,
    non_blocking::{NonBlocking, WorkerGuard},
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub struct LogOptions<'a> {
    pub component: &'a str,
    pub dev_mode: bool,
    pub enable_file_log: bool,
    pub otel: Option<&'a SdkLoggerProvider>,
}

fn file_writer(log_dir: &str, component: &str) -> (NonBlocking, WorkerGuard) {
    let file_name = format!("rust_app_{component}.log");
    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, file_name);
    non_blocking(file_appender)
}

/// Installs the global subscriber. The returned guard flushes the file
/// writer when dropped, so hold it until shutdown.
pub fn init_logger(options: LogOptions<'_>) -> Option<WorkerGuard> {
    let (file_layer, guard) = if options.enable_file_log {
        let log_dir = if options.dev_mode {
            "./logs"
        } else {
            "/var/log/app"
        };

        let (file_writer, guard) = file_writer(log_dir, options.component);

        let layer = fmt::layer()
            .with_writer(file_writer)
            .with_ansi(false)
            .json()
            .with_filter(EnvFilter::new("info"));

        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = if options.dev_mode {
        fmt::layer()
            .pretty()
            .with_thread_names(true)
            .with_ansi(true)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_filter(console_filter)
            .boxed()
    };

    let otel_layer = options.otel.map(|provider| {
        let otel_filter = EnvFilter::new("info,hyper=off,opentelemetry=off,tonic=off,h2=off");
        OpenTelemetryTracingBridge::new(provider).with_filter(otel_filter)
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .with(otel_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::file_writer;
    use std::io::Write;

    #[test]
    fn file_writer_flushes_into_the_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().to_str().unwrap();

        let (mut writer, guard) = file_writer(log_dir, "pharmacy");
        writer.write_all(b"{\"msg\":\"order placed\"}\n").unwrap();
        drop(guard);

        let logs: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect();
        assert_eq!(logs.len(), 1);
        assert!(
            logs[0]
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("rust_app_pharmacy.log")
        );
        let written = std::fs::read_to_string(&logs[0]).unwrap();
        assert!(written.contains("order placed"));
    }
}
