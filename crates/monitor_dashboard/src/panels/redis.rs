use monitor_metrics::redis::{
    REDIS_BLOCKED_CLIENTS,
    REDIS_COMMANDS_DURATION_SECONDS,
    REDIS_COMMANDS_PROCESSED,
    REDIS_CONNECTED_CLIENTS,
    REDIS_MEMORY_MAX_BYTES,
    REDIS_MEMORY_USED_BYTES,
    REDIS_MEM_FRAGMENTATION_RATIO,
    REDIS_NET_INPUT_BYTES,
    REDIS_NET_OUTPUT_BYTES,
    REDIS_TOTAL_ERROR_REPLIES,
};
use monitor_metrics::MetricCommon;

use crate::panel::{GridPos, Panel, PanelType, Target, Unit};
use crate::query_builder::{rate, RATE_INTERVAL};

fn get_panel_memory_usage() -> Panel {
    Panel::new(
        "Memory Usage",
        "Memory allocated by Redis against its maxmemory setting",
        vec![
            Target::new(REDIS_MEMORY_USED_BYTES.get_name_with_filter()).with_legend("Used Memory"),
            Target::new(REDIS_MEMORY_MAX_BYTES.get_name_with_filter()).with_legend("Max Memory"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 0))
    .with_unit(Unit::Bytes)
}

fn get_panel_memory_fragmentation() -> Panel {
    Panel::new(
        "Memory Fragmentation",
        REDIS_MEM_FRAGMENTATION_RATIO.get_description(),
        vec![
            Target::new(REDIS_MEM_FRAGMENTATION_RATIO.get_name_with_filter())
                .with_legend("Fragmentation Ratio"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 0))
    .with_unit(Unit::Short)
}

fn get_panel_client_connections() -> Panel {
    Panel::new(
        "Client Connections",
        "Connected clients and clients blocked on a blocking call",
        vec![
            Target::new(REDIS_CONNECTED_CLIENTS.get_name_with_filter())
                .with_legend("Connected Clients"),
            Target::new(REDIS_BLOCKED_CLIENTS.get_name_with_filter())
                .with_legend("Blocked Clients"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 8))
    .with_unit(Unit::Short)
}

fn get_panel_commands_processed() -> Panel {
    Panel::new(
        "Commands Processed",
        "Commands processed per second",
        vec![
            Target::new(rate(&REDIS_COMMANDS_PROCESSED, RATE_INTERVAL)).with_legend("Commands/sec"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 8))
    .with_unit(Unit::Short)
}

fn get_panel_network_traffic() -> Panel {
    Panel::new(
        "Network Traffic",
        "Bytes read from and written to the network per second",
        vec![
            Target::new(rate(&REDIS_NET_INPUT_BYTES, RATE_INTERVAL)).with_legend("Input Bytes/sec"),
            Target::new(rate(&REDIS_NET_OUTPUT_BYTES, RATE_INTERVAL))
                .with_legend("Output Bytes/sec"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 16))
    .with_unit(Unit::Bytes)
}

fn get_panel_command_latency() -> Panel {
    Panel::new(
        "Command Latency",
        "Time spent executing commands per second",
        vec![
            Target::new(rate(&REDIS_COMMANDS_DURATION_SECONDS, RATE_INTERVAL))
                .with_legend("Command Duration"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 16))
    .with_unit(Unit::Milliseconds)
}

fn get_panel_error_rate() -> Panel {
    Panel::new(
        "Error Rate",
        "Error replies sent to clients per second",
        vec![
            Target::new(rate(&REDIS_TOTAL_ERROR_REPLIES, RATE_INTERVAL)).with_legend("Errors/sec"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 24))
    .with_unit(Unit::Short)
}

pub(crate) fn get_redis_panels() -> Vec<Panel> {
    vec![
        get_panel_memory_usage(),
        get_panel_memory_fragmentation(),
        get_panel_client_connections(),
        get_panel_commands_processed(),
        get_panel_network_traffic(),
        get_panel_command_latency(),
        get_panel_error_rate(),
    ]
}
