use monitor_metrics::redis::{
    REDIS_COMMANDS_DURATION_SECONDS,
    REDIS_CONNECTED_CLIENTS,
    REDIS_MEMORY_MAX_BYTES,
    REDIS_MEMORY_USED_BYTES,
    REDIS_MEM_FRAGMENTATION_RATIO,
    REDIS_TOTAL_ERROR_REPLIES,
};
use monitor_metrics::MetricCommon;

use crate::alerts::{
    Alert,
    AlertCondition,
    AlertLogicalOp,
    AlertReducer,
    AlertSeverity,
    Evaluator,
    TimeRange,
    EVALUATION_WINDOW_DEFAULT,
    FREQUENCY_DEFAULT,
    GRACE_PERIOD_DEFAULT,
};
use crate::panel::{Target, DATASOURCE_VARIABLE};
use crate::query_builder::{greater_than, increase, rate, ratio_percent, RATE_INTERVAL};

fn get_redis_alert(
    name: &str,
    message: &str,
    expr: String,
    threshold: f64,
    severity: AlertSeverity,
) -> Alert {
    Alert::new(
        name,
        message,
        vec![
            AlertCondition::new(
                Target::new(greater_than(expr, threshold)).with_datasource(DATASOURCE_VARIABLE),
                TimeRange::last(EVALUATION_WINDOW_DEFAULT),
                Evaluator::greater_than(threshold),
                AlertLogicalOp::And,
            )
            .with_reducer(AlertReducer::Max),
        ],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        severity,
    )
}

fn get_high_memory_usage_alert() -> Alert {
    get_redis_alert(
        "Redis High Memory Usage",
        "Redis memory usage is high",
        ratio_percent(
            REDIS_MEMORY_USED_BYTES.get_name_with_filter(),
            REDIS_MEMORY_MAX_BYTES.get_name_with_filter(),
        ),
        90.0,
        AlertSeverity::Regular,
    )
}

fn get_high_memory_fragmentation_alert() -> Alert {
    get_redis_alert(
        "Redis High Memory Fragmentation",
        "Redis memory fragmentation ratio is high",
        REDIS_MEM_FRAGMENTATION_RATIO.get_name_with_filter().to_string(),
        2.0,
        AlertSeverity::DayOnly,
    )
}

fn get_too_many_clients_alert() -> Alert {
    get_redis_alert(
        "Redis Too Many Clients",
        "Redis has too many connected clients",
        REDIS_CONNECTED_CLIENTS.get_name_with_filter().to_string(),
        5000.0,
        AlertSeverity::Regular,
    )
}

fn get_high_command_latency_alert() -> Alert {
    get_redis_alert(
        "Redis High Command Latency",
        "Redis command latency is high",
        rate(&REDIS_COMMANDS_DURATION_SECONDS, RATE_INTERVAL),
        0.1,
        AlertSeverity::DayOnly,
    )
}

fn get_high_error_rate_alert() -> Alert {
    get_redis_alert(
        "Redis High Error Rate",
        "Redis error rate is high",
        increase(&REDIS_TOTAL_ERROR_REPLIES, RATE_INTERVAL),
        100.0,
        AlertSeverity::DayOnly,
    )
}

/// Redis alerts are not bound to a panel.
pub(crate) fn get_redis_alerts() -> Vec<Alert> {
    vec![
        get_high_memory_usage_alert(),
        get_high_memory_fragmentation_alert(),
        get_too_many_clients_alert(),
        get_high_command_latency_alert(),
        get_high_error_rate_alert(),
    ]
}
