use const_format::formatcp;
use monitor_metrics::mysql::{
    LABEL_NAME_BUFFER_POOL_STATE,
    MYSQL_BUFFER_POOL_PAGES,
    MYSQL_CONNECTION_ERRORS,
    MYSQL_MAX_CONNECTIONS,
    MYSQL_THREADS_CONNECTED,
    MYSQL_UP,
};
use monitor_metrics::{LabelMatcher, MetricCommon};

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
use crate::panel::Target;
use crate::query_builder::{
    equals,
    greater_than,
    less_than,
    rate,
    ratio_percent,
    RATE_WINDOW_DEFAULT,
};

pub(crate) const CONNECTION_THRESHOLD_VARIABLE: &str = "connection_threshold";
pub(crate) const SLOW_QUERY_THRESHOLD_VARIABLE: &str = "slow_query_threshold";
pub(crate) const BUFFER_POOL_THRESHOLD_VARIABLE: &str = "buffer_pool_threshold";

// The threshold is part of the expression, so the condition fires on any positive result.
fn get_mysql_alert(
    name: &str,
    message: &str,
    expr: String,
    evaluation_window: &str,
    frequency: &str,
    severity: AlertSeverity,
) -> Alert {
    Alert::new(
        name,
        message,
        vec![AlertCondition::new(
            Target::new(expr),
            TimeRange::last(evaluation_window),
            Evaluator::greater_than(0.0),
            AlertLogicalOp::And,
        )],
        frequency,
        GRACE_PERIOD_DEFAULT,
        severity,
    )
}

pub(crate) fn get_mysql_down_alert() -> Alert {
    get_mysql_alert(
        "MySQL Instance Down",
        "MySQL instance {{ $labels.instance }} is down",
        equals(MYSQL_UP.get_name_with_filter(), 0),
        EVALUATION_WINDOW_DEFAULT,
        FREQUENCY_DEFAULT,
        AlertSeverity::Sos,
    )
}

pub(crate) fn get_high_connections_alert() -> Alert {
    get_mysql_alert(
        "High Connection Count",
        "MySQL instance {{ $labels.instance }} has high number of connections",
        greater_than(
            ratio_percent(
                MYSQL_THREADS_CONNECTED.get_name_with_filter(),
                MYSQL_MAX_CONNECTIONS.get_name(),
            ),
            formatcp!("${}", CONNECTION_THRESHOLD_VARIABLE),
        ),
        EVALUATION_WINDOW_DEFAULT,
        FREQUENCY_DEFAULT,
        AlertSeverity::Regular,
    )
}

pub(crate) fn get_connection_errors_alert() -> Alert {
    get_mysql_alert(
        "High Connection Error Rate",
        "MySQL instance {{ $labels.instance }} has high connection error rate",
        greater_than(rate(&MYSQL_CONNECTION_ERRORS, RATE_WINDOW_DEFAULT), 1),
        EVALUATION_WINDOW_DEFAULT,
        FREQUENCY_DEFAULT,
        AlertSeverity::DayOnly,
    )
}

pub(crate) fn get_buffer_pool_free_alert() -> Alert {
    let free_pages = MYSQL_BUFFER_POOL_PAGES
        .get_name_with_extra_labels(&[LabelMatcher::eq(LABEL_NAME_BUFFER_POOL_STATE, "free")]);
    let total_pages = MYSQL_BUFFER_POOL_PAGES
        .get_name_with_labels(&[LabelMatcher::eq(LABEL_NAME_BUFFER_POOL_STATE, "total")]);
    get_mysql_alert(
        "InnoDB Buffer Pool Low Free Pages",
        "MySQL instance {{ $labels.instance }} has low free buffer pool pages",
        less_than(
            ratio_percent(free_pages, total_pages),
            formatcp!("${}", BUFFER_POOL_THRESHOLD_VARIABLE),
        ),
        "15m",
        "5m",
        AlertSeverity::DayOnly,
    )
}
