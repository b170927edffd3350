use std::fmt::Display;

use monitor_metrics::MetricCommon;

#[cfg(test)]
#[path = "query_builder_test.rs"]
mod query_builder_test;

/// The range of `rate` queries on dashboards that expose a rate interval variable.
pub(crate) const RATE_INTERVAL: &str = "$rate_interval";
/// The range of `rate` queries on dashboards without a rate interval variable.
pub(crate) const RATE_WINDOW_DEFAULT: &str = "5m";

pub(crate) fn rate(metric: &dyn MetricCommon, duration: &str) -> String {
    rate_of(metric.get_name_with_filter(), duration)
}

/// `rate` over an arbitrary series selector, e.g. one with extra label matchers.
pub(crate) fn rate_of(selector: impl Display, duration: &str) -> String {
    format!("rate({selector}[{duration}])")
}

pub(crate) fn increase(metric: &dyn MetricCommon, duration: &str) -> String {
    format!("increase({}[{}])", metric.get_name_with_filter(), duration)
}

pub(crate) fn avg_over_time(metric: &dyn MetricCommon, duration: &str) -> String {
    format!("avg_over_time({}[{}])", metric.get_name_with_filter(), duration)
}

/// `numerator / denominator * 100`.
pub(crate) fn ratio_percent(numerator: impl Display, denominator: impl Display) -> String {
    format!("{numerator} / {denominator} * 100")
}

/// `expr * factor`, joining the series on `label`.
pub(crate) fn multiply_on(expr: impl Display, label: &str, factor: impl Display) -> String {
    format!("{expr} * on({label}) {factor}")
}

pub(crate) fn greater_than(expr: impl Display, threshold: impl Display) -> String {
    format!("{expr} > {threshold}")
}

pub(crate) fn less_than(expr: impl Display, threshold: impl Display) -> String {
    format!("{expr} < {threshold}")
}

pub(crate) fn equals(expr: impl Display, value: impl Display) -> String {
    format!("{expr} == {value}")
}

/// The values of `label` across the series matching `selector`, for query template variables.
pub(crate) fn label_values(selector: impl Display, label: &str) -> String {
    format!("label_values({selector}, {label})")
}
