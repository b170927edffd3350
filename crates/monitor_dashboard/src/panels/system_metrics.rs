use const_format::formatcp;
use monitor_metrics::go_runtime::{
    GO_GC_DURATION_SECONDS,
    GO_GOROUTINES,
    GO_MEMSTATS_HEAP_ALLOC_BYTES,
    GO_MEMSTATS_HEAP_IDLE_BYTES,
    GO_MEMSTATS_HEAP_INUSE_BYTES,
    GO_THREADS,
};
use monitor_metrics::system::{
    LABEL_NAME_INTERFACE,
    PROCESS_RESIDENT_MEMORY_BYTES,
    PROCESS_VIRTUAL_MEMORY_BYTES,
    SYSTEM_CPU_USAGE_PERCENT,
    SYSTEM_IO_READ_BYTES,
    SYSTEM_IO_READ_OPERATIONS,
    SYSTEM_IO_WRITE_BYTES,
    SYSTEM_IO_WRITE_OPERATIONS,
    SYSTEM_MEMORY_USAGE_BYTES,
    SYSTEM_NETWORK_RX_BYTES_PER_SECOND,
    SYSTEM_NETWORK_RX_PACKETS_PER_SECOND,
    SYSTEM_NETWORK_TX_BYTES_PER_SECOND,
    SYSTEM_NETWORK_TX_PACKETS_PER_SECOND,
};
use monitor_metrics::{LabelMatcher, MetricCommon};

use crate::alert_scenarios::system_metrics::{
    get_high_cpu_usage_alert,
    get_high_io_latency_alert,
    get_high_memory_usage_alert,
    get_long_gc_duration_alert,
    get_network_saturation_alert,
};
use crate::panel::{GridPos, Panel, PanelType, Target, Unit, YAxes, YAxis};
use crate::query_builder::{avg_over_time, rate, rate_of, RATE_INTERVAL};

pub(crate) const INTERFACE_VARIABLE: &str = "interface";
// `system_cpu_usage_percent` is reported scaled by 10^6.
pub(crate) const CPU_USAGE_SCALE: u32 = 1_000_000;

pub(crate) const SELECTED_INTERFACE: [LabelMatcher; 1] =
    [LabelMatcher::eq(LABEL_NAME_INTERFACE, formatcp!("${}", INTERFACE_VARIABLE))];

fn y_axes_from_zero(unit: Unit) -> YAxes {
    YAxes::new(YAxis::new(unit).with_min(0.0), YAxis::new(Unit::Short))
}

fn get_stat_cpu_usage() -> Panel {
    Panel::new(
        "CPU Usage",
        format!("Average CPU usage over the rate interval ({RATE_INTERVAL})"),
        vec![Target::new(format!(
            "{} / {CPU_USAGE_SCALE}",
            avg_over_time(&SYSTEM_CPU_USAGE_PERCENT, RATE_INTERVAL)
        ))],
        PanelType::Stat,
    )
    .with_grid_pos(GridPos::new(3, 6, 0, 0))
    .with_unit(Unit::Percent)
}

fn get_stat_memory_usage() -> Panel {
    Panel::new(
        "Memory Usage",
        format!("Average memory in use over the rate interval ({RATE_INTERVAL})"),
        vec![Target::new(avg_over_time(&SYSTEM_MEMORY_USAGE_BYTES, RATE_INTERVAL))],
        PanelType::Stat,
    )
    .with_grid_pos(GridPos::new(3, 6, 6, 0))
    .with_unit(Unit::Bytes)
}

fn get_stat_goroutines() -> Panel {
    Panel::new(
        "Goroutines",
        GO_GOROUTINES.get_description(),
        vec![Target::new(avg_over_time(&GO_GOROUTINES, RATE_INTERVAL))],
        PanelType::Stat,
    )
    .with_grid_pos(GridPos::new(3, 6, 12, 0))
}

fn get_stat_os_threads() -> Panel {
    Panel::new(
        "OS Threads",
        GO_THREADS.get_description(),
        vec![Target::new(avg_over_time(&GO_THREADS, RATE_INTERVAL))],
        PanelType::Stat,
    )
    .with_grid_pos(GridPos::new(3, 6, 18, 0))
}

fn get_panel_cpu_usage() -> Panel {
    Panel::new(
        "CPU Usage Over Time",
        "Host CPU usage",
        vec![
            Target::new(format!(
                "{} / {CPU_USAGE_SCALE}",
                SYSTEM_CPU_USAGE_PERCENT.get_name_with_filter()
            ))
            .with_legend("CPU {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 3))
    .with_y_axes(y_axes_from_zero(Unit::Percent))
    .with_alert(get_high_cpu_usage_alert())
}

fn get_panel_memory_usage() -> Panel {
    Panel::new(
        "Memory Usage Over Time",
        "Host memory in use next to the memory of the monitored process",
        vec![
            Target::new(SYSTEM_MEMORY_USAGE_BYTES.get_name_with_filter())
                .with_legend("System Memory Usage {{instance}}"),
            Target::new(rate(&PROCESS_RESIDENT_MEMORY_BYTES, RATE_INTERVAL))
                .with_legend("Process Resident Memory {{instance}}"),
            Target::new(rate(&PROCESS_VIRTUAL_MEMORY_BYTES, RATE_INTERVAL))
                .with_legend("Process Virtual Memory {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 3))
    .with_y_axes(y_axes_from_zero(Unit::Bytes))
    .with_alert(get_high_memory_usage_alert())
}

fn get_panel_network_traffic() -> Panel {
    Panel::new(
        "Network Traffic (bytes/sec)",
        "Bytes received and transmitted on the selected interface",
        vec![
            Target::new(
                SYSTEM_NETWORK_RX_BYTES_PER_SECOND.get_name_with_extra_labels(&SELECTED_INTERFACE),
            )
            .with_legend("Receive {{instance}}"),
            Target::new(
                SYSTEM_NETWORK_TX_BYTES_PER_SECOND.get_name_with_extra_labels(&SELECTED_INTERFACE),
            )
            .with_legend("Transmit {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 11))
    .with_y_axes(y_axes_from_zero(Unit::Bytes))
    .with_alert(get_network_saturation_alert())
}

fn get_panel_network_packets() -> Panel {
    Panel::new(
        "Network Packets (packets/sec)",
        "Packets received and transmitted on the selected interface",
        vec![
            Target::new(
                SYSTEM_NETWORK_RX_PACKETS_PER_SECOND.get_name_with_extra_labels(&SELECTED_INTERFACE),
            )
            .with_legend("Receive Packets {{instance}}"),
            Target::new(
                SYSTEM_NETWORK_TX_PACKETS_PER_SECOND.get_name_with_extra_labels(&SELECTED_INTERFACE),
            )
            .with_legend("Transmit Packets {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 11))
}

fn get_panel_io_operations() -> Panel {
    Panel::new(
        "IO Operations",
        "Disk read and write operations per second",
        vec![
            Target::new(rate(&SYSTEM_IO_READ_OPERATIONS, RATE_INTERVAL))
                .with_legend("Read Ops/sec {{instance}}"),
            Target::new(rate(&SYSTEM_IO_WRITE_OPERATIONS, RATE_INTERVAL))
                .with_legend("Write Ops/sec {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 19))
    .with_alert(get_high_io_latency_alert())
}

fn get_panel_io_bytes() -> Panel {
    Panel::new(
        "IO Bytes",
        "Bytes read from and written to disk per second",
        vec![
            Target::new(rate(&SYSTEM_IO_READ_BYTES, RATE_INTERVAL))
                .with_legend("Read Bytes/sec {{instance}}"),
            Target::new(rate(&SYSTEM_IO_WRITE_BYTES, RATE_INTERVAL))
                .with_legend("Write Bytes/sec {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 19))
    .with_y_axes(y_axes_from_zero(Unit::Bytes))
}

fn get_panel_garbage_collection() -> Panel {
    Panel::new(
        "Garbage Collection",
        GO_GC_DURATION_SECONDS.get_description(),
        vec![
            Target::new(rate_of(GO_GC_DURATION_SECONDS.get_sum_name_with_filter(), RATE_INTERVAL))
                .with_legend("GC Duration {{instance}}"),
            Target::new(GO_GC_DURATION_SECONDS.get_quantile_with_filter("0.75"))
                .with_legend("GC 75th %ile {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 27))
    .with_alert(get_long_gc_duration_alert())
}

fn get_panel_go_heap_usage() -> Panel {
    Panel::new(
        "Go Heap Usage",
        "Allocated, in use and idle heap bytes",
        vec![
            Target::new(rate(&GO_MEMSTATS_HEAP_ALLOC_BYTES, RATE_INTERVAL))
                .with_legend("Heap Allocated {{instance}}"),
            Target::new(rate(&GO_MEMSTATS_HEAP_INUSE_BYTES, RATE_INTERVAL))
                .with_legend("Heap In Use {{instance}}"),
            Target::new(rate(&GO_MEMSTATS_HEAP_IDLE_BYTES, RATE_INTERVAL))
                .with_legend("Heap Idle {{instance}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 27))
    .with_y_axes(y_axes_from_zero(Unit::Bytes))
}

pub(crate) fn get_quick_stats_panels() -> Vec<Panel> {
    vec![
        get_stat_cpu_usage(),
        get_stat_memory_usage(),
        get_stat_goroutines(),
        get_stat_os_threads(),
    ]
}

pub(crate) fn get_system_resources_panels() -> Vec<Panel> {
    vec![get_panel_cpu_usage(), get_panel_memory_usage()]
}

pub(crate) fn get_network_panels() -> Vec<Panel> {
    vec![get_panel_network_traffic(), get_panel_network_packets()]
}

pub(crate) fn get_io_panels() -> Vec<Panel> {
    vec![get_panel_io_operations(), get_panel_io_bytes()]
}

pub(crate) fn get_go_runtime_panels() -> Vec<Panel> {
    vec![get_panel_garbage_collection(), get_panel_go_heap_usage()]
}
