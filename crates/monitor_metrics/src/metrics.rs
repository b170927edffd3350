use std::fmt;

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

/// The exporter family a metric belongs to. Each scope carries its own label filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MetricScope {
    Mysql,
    Redis,
    System,
    Node,
    Process,
    GoRuntime,
}

/// A single PromQL label matcher, e.g. `state="free"` or `command=~"select|insert"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelMatcher {
    Equal(&'static str, &'static str),
    Regex(&'static str, &'static str),
}

impl LabelMatcher {
    pub const fn eq(label: &'static str, value: &'static str) -> Self {
        Self::Equal(label, value)
    }

    pub const fn regex(label: &'static str, value: &'static str) -> Self {
        Self::Regex(label, value)
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMatcher::Equal(label, value) => write!(f, "{label}=\"{value}\""),
            LabelMatcher::Regex(label, value) => write!(f, "{label}=~\"{value}\""),
        }
    }
}

fn join_matchers(matchers: &[LabelMatcher]) -> String {
    matchers.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

pub struct Metric {
    scope: MetricScope,
    name: &'static str,
    name_with_filter: &'static str,
    description: &'static str,
}

impl Metric {
    pub const fn new(
        scope: MetricScope,
        name: &'static str,
        name_with_filter: &'static str,
        description: &'static str,
    ) -> Self {
        Self { scope, name, name_with_filter, description }
    }
}

pub trait MetricCommon {
    fn get_scope(&self) -> MetricScope;

    fn get_name(&self) -> &'static str;

    /// The metric name followed by the label filter of its scope.
    fn get_name_with_filter(&self) -> &'static str;

    fn get_description(&self) -> &'static str;

    /// The metric name with the scope label filter extended by `matchers`.
    fn get_name_with_extra_labels(&self, matchers: &[LabelMatcher]) -> String {
        if matchers.is_empty() {
            return self.get_name_with_filter().to_string();
        }
        let filter_prefix = self
            .get_name_with_filter()
            .strip_suffix('}')
            .expect("Metric label filter should end with a }");
        format!("{filter_prefix}, {}}}", join_matchers(matchers))
    }

    /// The metric name restricted by `matchers` only, ignoring the scope label filter.
    fn get_name_with_labels(&self, matchers: &[LabelMatcher]) -> String {
        if matchers.is_empty() {
            return self.get_name().to_string();
        }
        format!("{}{{{}}}", self.get_name(), join_matchers(matchers))
    }
}

impl MetricCommon for Metric {
    fn get_scope(&self) -> MetricScope {
        self.scope
    }

    fn get_name(&self) -> &'static str {
        self.name
    }

    fn get_name_with_filter(&self) -> &'static str {
        self.name_with_filter
    }

    fn get_description(&self) -> &'static str {
        self.description
    }
}

/// Implements [`MetricCommon`] by delegating to the wrapped [`Metric`].
macro_rules! delegate_metric_common {
    ($type:ty) => {
        impl MetricCommon for $type {
            fn get_scope(&self) -> MetricScope {
                self.metric.get_scope()
            }

            fn get_name(&self) -> &'static str {
                self.metric.get_name()
            }

            fn get_name_with_filter(&self) -> &'static str {
                self.metric.get_name_with_filter()
            }

            fn get_description(&self) -> &'static str {
                self.metric.get_description()
            }
        }
    };
}

/// A monotonically increasing metric, usually queried through `rate` or `increase`.
pub struct MetricCounter {
    metric: Metric,
}

impl MetricCounter {
    pub const fn new(
        scope: MetricScope,
        name: &'static str,
        name_with_filter: &'static str,
        description: &'static str,
    ) -> Self {
        Self { metric: Metric::new(scope, name, name_with_filter, description) }
    }
}

delegate_metric_common!(MetricCounter);

pub struct MetricGauge {
    metric: Metric,
}

impl MetricGauge {
    pub const fn new(
        scope: MetricScope,
        name: &'static str,
        name_with_filter: &'static str,
        description: &'static str,
    ) -> Self {
        Self { metric: Metric::new(scope, name, name_with_filter, description) }
    }
}

delegate_metric_common!(MetricGauge);

/// A Prometheus summary: quantile series plus `_sum` and `_count` series.
pub struct MetricSummary {
    metric: Metric,
    sum_name_with_filter: &'static str,
    count_name_with_filter: &'static str,
}

impl MetricSummary {
    pub const fn new(
        scope: MetricScope,
        name: &'static str,
        name_with_filter: &'static str,
        sum_name_with_filter: &'static str,
        count_name_with_filter: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            metric: Metric::new(scope, name, name_with_filter, description),
            sum_name_with_filter,
            count_name_with_filter,
        }
    }

    pub fn get_sum_name(&self) -> String {
        format!("{}_sum", self.get_name())
    }

    pub const fn get_sum_name_with_filter(&self) -> &'static str {
        self.sum_name_with_filter
    }

    pub const fn get_count_name_with_filter(&self) -> &'static str {
        self.count_name_with_filter
    }

    /// The quantile series of the summary, e.g. `0.75`.
    pub fn get_quantile_with_filter(&self, quantile: &'static str) -> String {
        self.get_name_with_extra_labels(&[LabelMatcher::eq("quantile", quantile)])
    }
}

delegate_metric_common!(MetricSummary);
