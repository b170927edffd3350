//! Host metrics: the application-level `system_*` collector plus the `node_exporter` and
//! `process_*` series it is usually deployed next to.

use crate::define_metrics;

define_metrics!(
    System => {
        // Reported in millionths of a percent.
        MetricGauge {
            SYSTEM_CPU_USAGE_PERCENT,
            "system_cpu_usage_percent",
            "Host CPU usage, scaled by 10^6"
        },
        MetricGauge {
            SYSTEM_MEMORY_USAGE_BYTES,
            "system_memory_usage_bytes",
            "Host memory in use"
        },
        MetricGauge {
            SYSTEM_MEMORY_TOTAL_BYTES,
            "system_memory_total_bytes",
            "Total host memory"
        },
        MetricGauge {
            SYSTEM_NETWORK_RX_BYTES_PER_SECOND,
            "system_network_rx_bytes_per_second",
            "Bytes received per second, labeled by interface"
        },
        MetricGauge {
            SYSTEM_NETWORK_TX_BYTES_PER_SECOND,
            "system_network_tx_bytes_per_second",
            "Bytes transmitted per second, labeled by interface"
        },
        MetricGauge {
            SYSTEM_NETWORK_RX_PACKETS_PER_SECOND,
            "system_network_rx_packets_per_second",
            "Packets received per second, labeled by interface"
        },
        MetricGauge {
            SYSTEM_NETWORK_TX_PACKETS_PER_SECOND,
            "system_network_tx_packets_per_second",
            "Packets transmitted per second, labeled by interface"
        },
        MetricCounter {
            SYSTEM_IO_READ_OPERATIONS,
            "system_io_read_operations",
            "Total disk read operations"
        },
        MetricCounter {
            SYSTEM_IO_WRITE_OPERATIONS,
            "system_io_write_operations",
            "Total disk write operations"
        },
        MetricCounter { SYSTEM_IO_READ_BYTES, "system_io_read_bytes", "Total bytes read from disk" },
        MetricCounter {
            SYSTEM_IO_WRITE_BYTES,
            "system_io_write_bytes",
            "Total bytes written to disk"
        },
    },
    Node => {
        MetricGauge {
            NODE_FILESYSTEM_AVAIL_BYTES,
            "node_filesystem_avail_bytes",
            "Filesystem space available to non-root users"
        },
        MetricGauge {
            NODE_FILESYSTEM_SIZE_BYTES,
            "node_filesystem_size_bytes",
            "Filesystem size"
        },
        MetricGauge { NODE_LOAD1, "node_load1", "1m load average" },
        MetricCounter {
            NODE_DISK_READ_TIME_SECONDS,
            "node_disk_read_time_seconds_total",
            "Total time spent by all reads"
        },
        MetricCounter {
            NODE_DISK_READS_COMPLETED,
            "node_disk_reads_completed_total",
            "Total number of reads completed successfully"
        },
    },
    Process => {
        MetricGauge {
            PROCESS_RESIDENT_MEMORY_BYTES,
            "process_resident_memory_bytes",
            "Resident memory size of the process"
        },
        MetricGauge {
            PROCESS_VIRTUAL_MEMORY_BYTES,
            "process_virtual_memory_bytes",
            "Virtual memory size of the process"
        },
    },
);

pub const LABEL_NAME_INTERFACE: &str = "interface";
