use prometheus_client::metrics::histogram::Histogram;
use prometheus_client::metrics::{counter::Counter, family::Family, gauge::Gauge};
use prometheus_client::registry::Registry;
use prometheus_client_derive_encode::{EncodeLabelSet, EncodeLabelValue};
use std::{
    sync::{Arc, Mutex, atomic::AtomicU64},
    time::Duration,
};
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const REFRESH_INTERVAL: Duration = Duration::from_secs(15);

/// Resource gauges for the running server process.
#[derive(Debug)]
pub struct ProcessMetrics {
    pid: Option<Pid>,
    system: Mutex<System>,
    resident_memory_bytes: Gauge,
    virtual_memory_bytes: Gauge,
    threads: Gauge,
    cpu_usage_percent: Gauge<f64, AtomicU64>,
    start_time_seconds: Gauge,
    available_memory_bytes: Gauge,
}

impl Default for ProcessMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessMetrics {
    pub fn new() -> Self {
        Self {
            pid: sysinfo::get_current_pid().ok(),
            system: Mutex::new(System::new()),
            resident_memory_bytes: Gauge::default(),
            virtual_memory_bytes: Gauge::default(),
            threads: Gauge::default(),
            cpu_usage_percent: Gauge::default(),
            start_time_seconds: Gauge::default(),
            available_memory_bytes: Gauge::default(),
        }
    }

    pub fn register(&self, registry: &mut Registry) {
        let registry = registry.sub_registry_with_prefix("pharmacy");

        registry.register(
            "process_resident_memory_bytes",
            "Resident memory of the server process",
            self.resident_memory_bytes.clone(),
        );
        registry.register(
            "process_virtual_memory_bytes",
            "Virtual memory of the server process",
            self.virtual_memory_bytes.clone(),
        );
        registry.register(
            "process_threads",
            "Threads owned by the server process",
            self.threads.clone(),
        );
        registry.register(
            "process_cpu_usage_percent",
            "CPU usage of the server process since the previous refresh",
            self.cpu_usage_percent.clone(),
        );
        registry.register(
            "process_start_time_seconds",
            "Start time of the server process since unix epoch",
            self.start_time_seconds.clone(),
        );
        registry.register(
            "host_available_memory_bytes",
            "Memory available to new allocations on the host",
            self.available_memory_bytes.clone(),
        );
    }

    pub fn refresh(&self) {
        let (Some(pid), Ok(mut system)) = (self.pid, self.system.lock()) else {
            return;
        };

        system.refresh_memory();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        self.available_memory_bytes
            .set(system.available_memory() as i64);

        if let Some(process) = system.process(pid) {
            self.resident_memory_bytes.set(process.memory() as i64);
            self.virtual_memory_bytes
                .set(process.virtual_memory() as i64);
            self.cpu_usage_percent.set(f64::from(process.cpu_usage()));
            self.start_time_seconds.set(process.start_time() as i64);
            if let Some(tasks) = process.tasks() {
                self.threads.set(tasks.len() as i64);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, EncodeLabelValue)]
pub enum Status {
    Success,
    Error,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct Labels {
    pub method: Method,
    pub status: Status,
}

#[derive(Clone, Debug)]
pub struct Metrics {
    pub request_counter: Family<Labels, Counter>,
    pub request_duration: Family<Labels, Histogram>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            request_counter: Family::default(),
            request_duration: Family::new_with_constructor(|| {
                Histogram::new(vec![
                    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
                ])
            }),
        }
    }

    pub fn record(&self, method: Method, status: Status, duration_secs: f64) {
        let labels = Labels { method, status };
        self.request_counter.get_or_create(&labels).inc();
        self.request_duration
            .get_or_create(&labels)
            .observe(duration_secs);
    }
}

pub async fn run_metrics_collector(process_metrics: Arc<ProcessMetrics>) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    loop {
        interval.tick().await;
        process_metrics.refresh();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus_client::encoding::text::encode;

    #[test]
    fn recorded_requests_show_up_in_the_registry() {
        let metrics = Metrics::new();
        let mut registry = Registry::default();
        registry.register(
            "order_service_request_counter",
            "Requests handled",
            metrics.request_counter.clone(),
        );

        metrics.record(Method::Patch, Status::Error, 0.01);

        let mut out = String::new();
        encode(&mut out, &registry).unwrap();
        assert!(out.contains("method=\"Patch\""));
        assert!(out.contains("status=\"Error\""));
    }

    #[test]
    fn process_gauges_are_exported_after_a_refresh() {
        let metrics = ProcessMetrics::new();
        let mut registry = Registry::default();
        metrics.register(&mut registry);

        metrics.refresh();

        assert!(metrics.resident_memory_bytes.get() > 0);
        let mut out = String::new();
        encode(&mut out, &registry).unwrap();
        assert!(out.contains("pharmacy_process_resident_memory_bytes"));
        assert!(out.contains("pharmacy_host_available_memory_bytes"));
    }
}
