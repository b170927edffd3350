use monitor_metrics::go_runtime::{GO_GC_DURATION_SECONDS, GO_GOROUTINES};
use monitor_metrics::system::{
    NODE_DISK_READS_COMPLETED,
    NODE_DISK_READ_TIME_SECONDS,
    NODE_FILESYSTEM_AVAIL_BYTES,
    NODE_FILESYSTEM_SIZE_BYTES,
    NODE_LOAD1,
    SYSTEM_CPU_USAGE_PERCENT,
    SYSTEM_MEMORY_TOTAL_BYTES,
    SYSTEM_MEMORY_USAGE_BYTES,
    SYSTEM_NETWORK_RX_BYTES_PER_SECOND,
    SYSTEM_NETWORK_TX_BYTES_PER_SECOND,
};
use monitor_metrics::MetricCommon;

use crate::alerts::{
    Alert,
    AlertCondition,
    AlertLogicalOp,
    AlertSeverity,
    Evaluator,
    TimeRange,
    EVALUATION_WINDOW_DEFAULT,
    FREQUENCY_DEFAULT,
    GRACE_PERIOD_DEFAULT,
};
use crate::panel::{Target, DATASOURCE_VARIABLE};
use crate::panels::system_metrics::{CPU_USAGE_SCALE, SELECTED_INTERFACE};
use crate::query_builder::{greater_than, rate_of, ratio_percent, RATE_INTERVAL};

// Link capacity assumed by the saturation alert: 1 Gbps.
const LINK_CAPACITY_BITS_PER_SECOND: u64 = 1_000_000_000;

// Queries are fleet wide and ignore the job and instance selection.
fn get_system_alert(
    name: &str,
    message: &str,
    expr: String,
    threshold: f64,
    severity: AlertSeverity,
) -> Alert {
    Alert::new(
        name,
        message,
        vec![AlertCondition::new(
            Target::new(expr).with_datasource(DATASOURCE_VARIABLE),
            TimeRange::last(EVALUATION_WINDOW_DEFAULT),
            Evaluator::greater_than(threshold),
            AlertLogicalOp::And,
        )],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        severity,
    )
}

pub(crate) fn get_high_cpu_usage_alert() -> Alert {
    get_system_alert(
        "High CPU Usage",
        "CPU usage is above 80% for 5 minutes",
        format!("{} / {CPU_USAGE_SCALE}", SYSTEM_CPU_USAGE_PERCENT.get_name()),
        80.0,
        AlertSeverity::Regular,
    )
}

pub(crate) fn get_high_memory_usage_alert() -> Alert {
    get_system_alert(
        "High Memory Usage",
        "Memory usage is above 80% for 5 minutes",
        ratio_percent(SYSTEM_MEMORY_USAGE_BYTES.get_name(), SYSTEM_MEMORY_TOTAL_BYTES.get_name()),
        80.0,
        AlertSeverity::Regular,
    )
}

pub(crate) fn get_network_saturation_alert() -> Alert {
    let transmitted = SYSTEM_NETWORK_TX_BYTES_PER_SECOND.get_name_with_labels(&SELECTED_INTERFACE);
    let received = SYSTEM_NETWORK_RX_BYTES_PER_SECOND.get_name_with_labels(&SELECTED_INTERFACE);
    let bytes_per_second =
        format!("({} + {})", rate_of(transmitted, RATE_INTERVAL), rate_of(received, RATE_INTERVAL));
    get_system_alert(
        "Network Interface Saturation",
        "Network interface bandwidth usage > 80% for 5 minutes",
        greater_than(format!("{bytes_per_second} / {LINK_CAPACITY_BITS_PER_SECOND} * 8"), 0.8),
        0.8,
        AlertSeverity::DayOnly,
    )
}

pub(crate) fn get_high_io_latency_alert() -> Alert {
    let average_read_seconds = format!(
        "{} / {}",
        rate_of(NODE_DISK_READ_TIME_SECONDS.get_name(), RATE_INTERVAL),
        rate_of(NODE_DISK_READS_COMPLETED.get_name(), RATE_INTERVAL)
    );
    get_system_alert(
        "High I/O Latency",
        "I/O operations are taking too long",
        // 100ms average read latency.
        greater_than(average_read_seconds, 0.1),
        0.1,
        AlertSeverity::DayOnly,
    )
}

pub(crate) fn get_long_gc_duration_alert() -> Alert {
    get_system_alert(
        "Long GC Duration",
        "Garbage collection is taking too long",
        rate_of(GO_GC_DURATION_SECONDS.get_sum_name(), RATE_INTERVAL),
        0.1,
        AlertSeverity::DayOnly,
    )
}

fn get_high_goroutine_count_alert() -> Alert {
    get_system_alert(
        "High Goroutine Count",
        "Number of goroutines has increased significantly",
        greater_than(GO_GOROUTINES.get_name(), 10000),
        10000.0,
        AlertSeverity::DayOnly,
    )
}

fn get_low_disk_space_alert() -> Alert {
    get_system_alert(
        "Low Disk Space",
        "Disk space usage is above 85% for 5 minutes",
        format!(
            "100 - (({} * 100) / {})",
            NODE_FILESYSTEM_AVAIL_BYTES.get_name(),
            NODE_FILESYSTEM_SIZE_BYTES.get_name()
        ),
        85.0,
        AlertSeverity::Regular,
    )
}

fn get_high_system_load_alert() -> Alert {
    get_system_alert(
        "High System Load",
        "System load average (1m) is high for 5 minutes",
        NODE_LOAD1.get_name().to_string(),
        // TODO(monitoring): scale the threshold by the core count once node_cpu_seconds_total is in
        // the catalog.
        4.0,
        AlertSeverity::DayOnly,
    )
}

/// System alerts that are not bound to a panel.
pub(crate) fn get_host_alerts() -> Vec<Alert> {
    vec![get_high_goroutine_count_alert(), get_low_disk_space_alert(), get_high_system_load_alert()]
}
