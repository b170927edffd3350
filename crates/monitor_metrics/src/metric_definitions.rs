/// The label filter binding a metric of the given scope to the dashboard template variables.
#[macro_export]
macro_rules! metric_label_filter {
    (Mysql) => {
        "{job=~\"$job\", instance=~\"$instance\", environment=~\"$environment\"}"
    };
    (Redis) => {
        "{instance=~\"$instance\"}"
    };
    // System, node, process and Go runtime metrics share the job/instance selectors.
    ($scope:ident) => {
        "{job=~\"$job\", instance=~\"$instance\"}"
    };
}

/// Macro to define all metric constants for specified scopes and store them in a collection.
/// This generates:
/// - Individual metric constant according to type:
///     - `MetricCounter`
///     - `MetricGauge`
///     - `MetricSummary`
/// - A const array `<SCOPE>_ALL_METRICS` containing all $keys of all the metrics constants.
#[macro_export]
macro_rules! define_metrics {
    (
        $(
            $scope:ident => { // Metric scope, e.g., Mysql, Redis, etc.
                $(
                    $type:ident { // Metric type, e.g., MetricCounter, MetricGauge, etc.
                        $name:ident, // Metric name, e.g., MYSQL_UP
                        $key:expr, // Metric key, e.g., "mysql_up"
                        $desc:expr // Metric description, e.g., "Whether the MySQL server is up"
                    }
                ),*
                $(,)?
            }
        ),*
        $(,)?
    ) => {
        $(
            $(
                $crate::define_metrics!(@define_single $scope, $type, $name, $key, $desc);
            )*
        )*

        $(
            #[cfg(any(feature = "testing", test))]
            $crate::paste::paste! {
                pub const [<$scope:snake:upper _ALL_METRICS>]: &[&'static str] = &[
                    $(
                        $key,
                    )*
                ];
            }
        )*
    };

    // Special case: MetricSummary
    (@define_single $scope:ident, MetricSummary, $name:ident, $key:expr, $desc:expr) => {
        pub const $name: $crate::metrics::MetricSummary = $crate::metrics::MetricSummary::new(
            $crate::metrics::MetricScope::$scope,
            $key,
            concat!($key, $crate::metric_label_filter!($scope)),
            concat!($key, "_sum", $crate::metric_label_filter!($scope)),
            concat!($key, "_count", $crate::metric_label_filter!($scope)),
            $desc
        );
    };

    // Fallback: all others (MetricCounter, MetricGauge)
    (@define_single $scope:ident, $type:ident, $name:ident, $key:expr, $desc:expr) => {
        pub const $name: $crate::metrics::$type = $crate::metrics::$type::new(
            $crate::metrics::MetricScope::$scope,
            $key,
            concat!($key, $crate::metric_label_filter!($scope)),
            $desc
        );
    };
}
