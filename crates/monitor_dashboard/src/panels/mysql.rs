use monitor_metrics::mysql::{
    LABEL_NAME_BUFFER_POOL_STATE,
    LABEL_NAME_COMMAND,
    MYSQL_ABORTED_CLIENTS,
    MYSQL_ABORTED_CONNECTS,
    MYSQL_BUFFER_POOL_PAGES,
    MYSQL_BUFFER_POOL_READS,
    MYSQL_BUFFER_POOL_READ_REQUESTS,
    MYSQL_COMMANDS,
    MYSQL_CONNECTION_ERRORS,
    MYSQL_INNODB_DATA_READS,
    MYSQL_INNODB_DATA_WRITES,
    MYSQL_INNODB_PAGE_SIZE,
    MYSQL_MAX_CONNECTIONS,
    MYSQL_SLOW_QUERIES,
    MYSQL_THREADS_CACHED,
    MYSQL_THREADS_CONNECTED,
    MYSQL_THREADS_RUNNING,
    MYSQL_UP,
};
use monitor_metrics::{LabelMatcher, MetricCommon};

use crate::alert_scenarios::mysql::{
    get_buffer_pool_free_alert,
    get_connection_errors_alert,
    get_high_connections_alert,
    get_mysql_down_alert,
};
use crate::panel::{GridPos, Legend, LegendCalc, Panel, PanelType, Target, Unit};
use crate::query_builder::{multiply_on, rate, rate_of, RATE_WINDOW_DEFAULT};

// Statements broken down on the command operations panel.
const TRACKED_COMMANDS: &str = "select|insert|update|delete";

fn buffer_pool_bytes(state: &'static str) -> String {
    multiply_on(
        MYSQL_BUFFER_POOL_PAGES
            .get_name_with_extra_labels(&[LabelMatcher::eq(LABEL_NAME_BUFFER_POOL_STATE, state)]),
        "instance",
        MYSQL_INNODB_PAGE_SIZE.get_name_with_filter(),
    )
}

fn get_panel_mysql_status() -> Panel {
    Panel::new(
        "MySQL Status",
        MYSQL_UP.get_description(),
        vec![Target::new(MYSQL_UP.get_name_with_filter())],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(3, 4, 0, 0))
    .with_alert(get_mysql_down_alert())
}

fn get_panel_mysql_connections() -> Panel {
    Panel::new(
        "MySQL Connections",
        "Open connections against the configured connection limit",
        vec![
            Target::new(MYSQL_THREADS_CONNECTED.get_name_with_filter())
                .with_legend("Connected Threads"),
            Target::new(MYSQL_MAX_CONNECTIONS.get_name_with_filter()).with_legend("Max Used"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 3))
    .with_alert(get_high_connections_alert())
}

fn get_panel_connection_errors() -> Panel {
    Panel::new(
        "Connection Errors",
        format!("Connection errors per second by kind ({RATE_WINDOW_DEFAULT} window)"),
        vec![
            Target::new(rate(&MYSQL_CONNECTION_ERRORS, RATE_WINDOW_DEFAULT)).with_legend("{{error}}"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 3))
    .with_unit(Unit::Ops)
    .with_alert(get_connection_errors_alert())
}

fn get_panel_buffer_pool_size() -> Panel {
    Panel::new(
        "InnoDB Buffer Pool Size",
        "Data and free InnoDB buffer pool pages, in bytes",
        vec![
            Target::new(buffer_pool_bytes("data")).with_legend("Data"),
            Target::new(buffer_pool_bytes("free")).with_legend("Free"),
        ],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 11))
    .with_unit(Unit::Bytes)
    .with_alert(get_buffer_pool_free_alert())
}

fn get_panel_innodb_read_write() -> Panel {
    Panel::new(
        "InnoDB Read/Write Operations",
        format!("InnoDB data reads and writes per second ({RATE_WINDOW_DEFAULT} window)"),
        vec![
            Target::new(rate(&MYSQL_INNODB_DATA_READS, RATE_WINDOW_DEFAULT)).with_legend("Reads"),
            Target::new(rate(&MYSQL_INNODB_DATA_WRITES, RATE_WINDOW_DEFAULT)).with_legend("Writes"),
        ],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 11))
    .with_unit(Unit::Ops)
    .with_legend(Legend::table(vec![LegendCalc::Mean, LegendCalc::Max]))
}

fn get_panel_slow_queries() -> Panel {
    Panel::new(
        "Slow Queries",
        MYSQL_SLOW_QUERIES.get_description(),
        vec![
            Target::new(rate(&MYSQL_SLOW_QUERIES, RATE_WINDOW_DEFAULT)).with_legend("Slow Queries"),
        ],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 19))
    .with_unit(Unit::Short)
}

fn get_panel_command_operations() -> Panel {
    let commands = MYSQL_COMMANDS
        .get_name_with_extra_labels(&[LabelMatcher::regex(LABEL_NAME_COMMAND, TRACKED_COMMANDS)]);
    Panel::new(
        "Command Operations",
        format!("Executed {TRACKED_COMMANDS} statements per second"),
        vec![Target::new(rate_of(commands, RATE_WINDOW_DEFAULT)).with_legend("{{command}}")],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 19))
    .with_unit(Unit::Ops)
    .with_legend(Legend::table(vec![LegendCalc::Mean, LegendCalc::Max]))
}

fn get_panel_thread_activity() -> Panel {
    Panel::new(
        "Thread Activity",
        "Running, connected and cached server threads",
        vec![
            Target::new(MYSQL_THREADS_RUNNING.get_name_with_filter()).with_legend("Running"),
            Target::new(MYSQL_THREADS_CONNECTED.get_name_with_filter()).with_legend("Connected"),
            Target::new(MYSQL_THREADS_CACHED.get_name_with_filter()).with_legend("Cached"),
        ],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 27))
    .with_unit(Unit::Short)
}

fn get_panel_buffer_pool_hit_ratio() -> Panel {
    Panel::new(
        "Buffer Pool Hit Ratio",
        "Buffer pool read requests against the reads that missed the pool",
        vec![
            Target::new(rate(&MYSQL_BUFFER_POOL_READ_REQUESTS, RATE_WINDOW_DEFAULT))
                .with_legend("Read Requests"),
            Target::new(rate(&MYSQL_BUFFER_POOL_READS, RATE_WINDOW_DEFAULT)).with_legend("Reads"),
        ],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 12, 27))
    .with_unit(Unit::Ops)
}

fn get_panel_connection_aborts() -> Panel {
    Panel::new(
        "Connection Aborts",
        "Failed connection attempts and clients that disconnected uncleanly",
        vec![
            Target::new(rate(&MYSQL_ABORTED_CONNECTS, RATE_WINDOW_DEFAULT))
                .with_legend("Connect Aborts"),
            Target::new(rate(&MYSQL_ABORTED_CLIENTS, RATE_WINDOW_DEFAULT))
                .with_legend("Client Aborts"),
        ],
        PanelType::TimeSeries,
    )
    .with_grid_pos(GridPos::new(8, 12, 0, 35))
    .with_unit(Unit::Ops)
}

pub(crate) fn get_mysql_panels() -> Vec<Panel> {
    vec![
        get_panel_mysql_status(),
        get_panel_mysql_connections(),
        get_panel_connection_errors(),
        get_panel_buffer_pool_size(),
        get_panel_innodb_read_write(),
        get_panel_slow_queries(),
        get_panel_command_operations(),
        get_panel_thread_activity(),
        get_panel_buffer_pool_hit_ratio(),
        get_panel_connection_aborts(),
    ]
}
