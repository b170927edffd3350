use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::go_runtime::GO_GC_DURATION_SECONDS;
use crate::metrics::{LabelMatcher, MetricCommon, MetricScope};
use crate::mysql::{MYSQL_BUFFER_POOL_PAGES, MYSQL_UP};
use crate::redis::REDIS_CONNECTED_CLIENTS;
use crate::system::{NODE_LOAD1, SYSTEM_NETWORK_RX_BYTES_PER_SECOND};

#[rstest]
#[case::mysql(
    &MYSQL_UP,
    MetricScope::Mysql,
    r#"mysql_up{job=~"$job", instance=~"$instance", environment=~"$environment"}"#
)]
#[case::redis(
    &REDIS_CONNECTED_CLIENTS,
    MetricScope::Redis,
    r#"redis_connected_clients{instance=~"$instance"}"#
)]
#[case::node(&NODE_LOAD1, MetricScope::Node, r#"node_load1{job=~"$job", instance=~"$instance"}"#)]
fn name_with_scope_filter(
    #[case] metric: &dyn MetricCommon,
    #[case] expected_scope: MetricScope,
    #[case] expected: &str,
) {
    assert_eq!(metric.get_scope(), expected_scope);
    assert_eq!(metric.get_name_with_filter(), expected);
}

#[test]
fn extra_labels_extend_the_scope_filter() {
    assert_eq!(
        MYSQL_BUFFER_POOL_PAGES.get_name_with_extra_labels(&[LabelMatcher::eq("state", "free")]),
        r#"mysql_global_status_buffer_pool_pages{job=~"$job", instance=~"$instance", environment=~"$environment", state="free"}"#
    );
    assert_eq!(
        SYSTEM_NETWORK_RX_BYTES_PER_SECOND
            .get_name_with_extra_labels(&[LabelMatcher::eq("interface", "$interface")]),
        r#"system_network_rx_bytes_per_second{job=~"$job", instance=~"$instance", interface="$interface"}"#
    );
    // No matchers keep the plain filtered name.
    assert_eq!(
        MYSQL_UP.get_name_with_extra_labels(&[]),
        MYSQL_UP.get_name_with_filter().to_string()
    );
}

#[test]
fn labels_without_scope_filter() {
    assert_eq!(
        MYSQL_BUFFER_POOL_PAGES.get_name_with_labels(&[LabelMatcher::eq("state", "total")]),
        r#"mysql_global_status_buffer_pool_pages{state="total"}"#
    );
    assert_eq!(MYSQL_UP.get_name_with_labels(&[]), "mysql_up");
}

#[test]
fn regex_matcher_display() {
    assert_eq!(
        LabelMatcher::regex("command", "select|insert").to_string(),
        r#"command=~"select|insert""#
    );
}

#[test]
fn summary_series() {
    assert_eq!(GO_GC_DURATION_SECONDS.get_sum_name(), "go_gc_duration_seconds_sum");
    assert_eq!(
        GO_GC_DURATION_SECONDS.get_sum_name_with_filter(),
        r#"go_gc_duration_seconds_sum{job=~"$job", instance=~"$instance"}"#
    );
    assert_eq!(
        GO_GC_DURATION_SECONDS.get_count_name_with_filter(),
        r#"go_gc_duration_seconds_count{job=~"$job", instance=~"$instance"}"#
    );
    assert_eq!(
        GO_GC_DURATION_SECONDS.get_quantile_with_filter("0.75"),
        r#"go_gc_duration_seconds{job=~"$job", instance=~"$instance", quantile="0.75"}"#
    );
}
