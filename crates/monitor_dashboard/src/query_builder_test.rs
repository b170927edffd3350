use monitor_metrics::mysql::{MYSQL_BUFFER_POOL_PAGES, MYSQL_SLOW_QUERIES, MYSQL_UP};
use monitor_metrics::redis::REDIS_COMMANDS_PROCESSED;
use monitor_metrics::system::SYSTEM_MEMORY_USAGE_BYTES;
use monitor_metrics::{LabelMatcher, MetricCommon};
use pretty_assertions::assert_eq;

use crate::query_builder::{
    avg_over_time,
    equals,
    greater_than,
    increase,
    label_values,
    less_than,
    multiply_on,
    rate,
    rate_of,
    ratio_percent,
    RATE_INTERVAL,
};

#[test]
fn range_functions() {
    assert_eq!(
        rate(&REDIS_COMMANDS_PROCESSED, RATE_INTERVAL),
        r#"rate(redis_commands_processed_total{instance=~"$instance"}[$rate_interval])"#
    );
    assert_eq!(
        increase(&MYSQL_SLOW_QUERIES, "10m"),
        format!("increase({}[10m])", MYSQL_SLOW_QUERIES.get_name_with_filter())
    );
    assert_eq!(
        avg_over_time(&SYSTEM_MEMORY_USAGE_BYTES, RATE_INTERVAL),
        r#"avg_over_time(system_memory_usage_bytes{job=~"$job", instance=~"$instance"}[$rate_interval])"#
    );
    assert_eq!(rate_of("go_gc_duration_seconds_sum", "1m"), "rate(go_gc_duration_seconds_sum[1m])");
}

#[test]
fn comparisons() {
    assert_eq!(equals(MYSQL_UP.get_name(), 0), "mysql_up == 0");
    assert_eq!(greater_than("x", 0.1), "x > 0.1");
    assert_eq!(greater_than("x", "$connection_threshold"), "x > $connection_threshold");
    assert_eq!(less_than("x", 10), "x < 10");
}

#[test]
fn arithmetic() {
    let free_pages =
        MYSQL_BUFFER_POOL_PAGES.get_name_with_extra_labels(&[LabelMatcher::eq("state", "free")]);
    let total_pages =
        MYSQL_BUFFER_POOL_PAGES.get_name_with_labels(&[LabelMatcher::eq("state", "total")]);
    assert_eq!(
        ratio_percent(&free_pages, &total_pages),
        format!("{free_pages} / {total_pages} * 100")
    );
    assert_eq!(multiply_on("a", "instance", "b"), "a * on(instance) b");
}

#[test]
fn template_queries() {
    assert_eq!(label_values(MYSQL_UP.get_name(), "job"), "label_values(mysql_up, job)");
    assert_eq!(
        label_values(MYSQL_UP.get_name_with_labels(&[LabelMatcher::regex("job", "$job")]), "instance"),
        r#"label_values(mysql_up{job=~"$job"}, instance)"#
    );
}
