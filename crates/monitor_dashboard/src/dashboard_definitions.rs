use const_format::formatcp;
use monitor_metrics::mysql::MYSQL_UP;
use monitor_metrics::redis::REDIS_UP;
use monitor_metrics::system::{SYSTEM_CPU_USAGE_PERCENT, SYSTEM_NETWORK_RX_BYTES_PER_SECOND};
use monitor_metrics::{LabelMatcher, MetricCommon};
use strum::{Display, EnumIter};

use crate::alert_scenarios::mysql::{
    BUFFER_POOL_THRESHOLD_VARIABLE,
    CONNECTION_THRESHOLD_VARIABLE,
    SLOW_QUERY_THRESHOLD_VARIABLE,
};
use crate::alert_scenarios::redis::get_redis_alerts;
use crate::alert_scenarios::system_metrics::get_host_alerts;
use crate::alerts::Alerts;
use crate::dashboard::{Dashboard, DashboardError, Time};
use crate::panels::mysql::get_mysql_panels;
use crate::panels::redis::get_redis_panels;
use crate::panels::system_metrics::{
    get_go_runtime_panels,
    get_io_panels,
    get_network_panels,
    get_quick_stats_panels,
    get_system_resources_panels,
    INTERFACE_VARIABLE,
};
use crate::query_builder::label_values;
use crate::templating::{Template, TemplateRefresh, Templating};

#[cfg(test)]
#[path = "dashboard_definitions_test.rs"]
mod dashboard_definitions_test;

/// Where the generator writes the dashboards, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "crates/monitor_dashboard/resources";

const DATASOURCE_PLUGIN: &str = "prometheus";
const RATE_INTERVAL_OPTIONS: [&str; 5] = ["1m", "5m", "10m", "30m", "1h"];
const RATE_INTERVAL_DEFAULT: &str = "5m";

const JOB_LABEL: &str = "job";
const INSTANCE_LABEL: &str = "instance";
const ENVIRONMENT_LABEL: &str = "environment";
const SELECTED_JOB: [LabelMatcher; 1] =
    [LabelMatcher::regex(JOB_LABEL, formatcp!("${}", JOB_LABEL))];

fn get_datasource_template() -> Template {
    Template::datasource("datasource", "Data Source", DATASOURCE_PLUGIN)
}

fn get_mysql_templating() -> Templating {
    Templating::new(vec![
        get_datasource_template(),
        Template::query("job", "Job", label_values(MYSQL_UP.get_name(), JOB_LABEL))
            .with_include_all()
            .with_multi(),
        Template::query(
            "instance",
            "Instance",
            label_values(MYSQL_UP.get_name_with_labels(&SELECTED_JOB), INSTANCE_LABEL),
        )
        .with_refresh(TemplateRefresh::OnTimeRangeChange)
        .with_include_all()
        .with_multi(),
        Template::query(
            "environment",
            "Environment",
            label_values(MYSQL_UP.get_name(), ENVIRONMENT_LABEL),
        )
        .with_include_all(),
        Template::constant(CONNECTION_THRESHOLD_VARIABLE, "Connection Alert Threshold %", 80),
        Template::constant(SLOW_QUERY_THRESHOLD_VARIABLE, "Slow Query Alert Threshold", 5),
        Template::constant(BUFFER_POOL_THRESHOLD_VARIABLE, "Buffer Pool Free % Threshold", 10),
    ])
}

fn get_redis_templating() -> Templating {
    Templating::new(vec![
        get_datasource_template(),
        Template::query(
            "instance",
            "Redis Instance",
            label_values(REDIS_UP.get_name(), INSTANCE_LABEL),
        )
        .with_include_all(),
        Template::interval(
            "rate_interval",
            "Rate Interval",
            &RATE_INTERVAL_OPTIONS,
            RATE_INTERVAL_DEFAULT,
        ),
    ])
}

fn get_system_metrics_templating() -> Templating {
    Templating::new(vec![
        get_datasource_template(),
        Template::query("job", "Job", label_values(SYSTEM_CPU_USAGE_PERCENT.get_name(), JOB_LABEL))
            .with_refresh(TemplateRefresh::OnTimeRangeChange),
        Template::query(
            "instance",
            "Instance",
            label_values(
                SYSTEM_CPU_USAGE_PERCENT.get_name_with_labels(&SELECTED_JOB),
                INSTANCE_LABEL,
            ),
        )
        .with_refresh(TemplateRefresh::OnTimeRangeChange),
        Template::query(
            INTERFACE_VARIABLE,
            "Network Interface",
            label_values(SYSTEM_NETWORK_RX_BYTES_PER_SECOND.get_name(), INTERFACE_VARIABLE),
        )
        .with_refresh(TemplateRefresh::OnTimeRangeChange),
        Template::custom(
            "rate_interval",
            "Rate Interval",
            &RATE_INTERVAL_OPTIONS,
            RATE_INTERVAL_DEFAULT,
        ),
    ])
}

pub fn get_mysql_dashboard() -> Dashboard {
    Dashboard::new("MySQL Overview", "MySQL server performance and health metrics")
        .with_uid("mysql-overview")
        .with_tags(&["mysql", "database"])
        .with_refresh("1m")
        .with_templating(get_mysql_templating())
        .with_panels(get_mysql_panels())
        .auto_panel_ids()
}

pub fn get_redis_dashboard() -> Dashboard {
    Dashboard::new("Redis Monitoring", "Dashboard for monitoring Redis metrics")
        .with_uid("redis-monitoring")
        .with_tags(&["redis", "monitoring", "database"])
        .with_templating(get_redis_templating())
        .with_panels(get_redis_panels())
        .with_dashboard_alerts(get_redis_alerts())
        .auto_panel_ids()
}

pub fn get_system_metrics_dashboard() -> Dashboard {
    let panels = [
        get_quick_stats_panels(),
        get_system_resources_panels(),
        get_network_panels(),
        get_io_panels(),
        get_go_runtime_panels(),
    ]
    .concat();

    Dashboard::new("System Metrics Dashboard", "Comprehensive system metrics from Prometheus")
        .with_uid("system-metrics")
        .with_tags(&["system", "golang"])
        .with_time(Time::new("now-3h", "now"))
        .with_refresh("10s")
        .with_templating(get_system_metrics_templating())
        .with_panels(panels)
        .with_dashboard_alerts(get_host_alerts())
        .auto_panel_ids()
}

/// The dashboards this crate generates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum DashboardKind {
    Mysql,
    Redis,
    SystemMetrics,
}

impl DashboardKind {
    pub fn dashboard(self) -> Dashboard {
        match self {
            DashboardKind::Mysql => get_mysql_dashboard(),
            DashboardKind::Redis => get_redis_dashboard(),
            DashboardKind::SystemMetrics => get_system_metrics_dashboard(),
        }
    }

    /// Builds and validates the dashboard, together with the catalog of all of its alerts.
    pub fn build(self) -> Result<(Dashboard, Alerts), DashboardError> {
        let dashboard = self.dashboard();
        dashboard.validate()?;
        let alerts = dashboard.alerts();
        Ok((dashboard, alerts))
    }

    pub fn dashboard_file_name(self) -> String {
        format!("{self}.json")
    }

    pub fn alerts_file_name(self) -> String {
        format!("{self}_alerts.json")
    }
}
