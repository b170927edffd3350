use std::collections::HashSet;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::panel::Target;

#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

pub(crate) const FREQUENCY_DEFAULT: &str = "1m";
pub(crate) const GRACE_PERIOD_DEFAULT: &str = "5m";
pub(crate) const NOTIFICATION_HANDLER_DEFAULT: u32 = 1;
pub(crate) const EVALUATION_WINDOW_DEFAULT: &str = "5m";

/// Alerts of a dashboard, dumped as a standalone rule file next to the dashboard itself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alerts {
    alerts: Vec<Alert>,
}

impl Alerts {
    pub fn new(alerts: Vec<Alert>) -> Self {
        // Validate that there are no duplicate alert names.
        alerts
            .iter()
            .map(|alert| alert.name.as_str())
            .try_fold(HashSet::new(), |mut set, name| set.insert(name).then_some(set).ok_or(name))
            .unwrap_or_else(|duplicate| panic!("Duplicate alert name found: {duplicate}"));

        Self { alerts }
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    /// Critical issues that demand immediate attention. These are high-impact incidents that
    /// affect the availability of the monitored service.
    #[serde(rename = "p1")]
    Sos,
    /// Standard alerts for production issues that require attention around the clock but are not
    /// as time-sensitive as SOS alerts.
    #[serde(rename = "p2")]
    Regular,
    /// Important alerts that do not require overnight attention.
    #[serde(rename = "p3")]
    DayOnly,
    /// Alerts that are only triggered during official business hours.
    #[serde(rename = "p4")]
    WorkingHours,
    /// Non-critical alerts, meant purely for information.
    #[serde(rename = "p5")]
    Informational,
}

/// The state an alert transitions to on evaluation errors or on missing data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Alerting,
    NoData,
    KeepState,
    Ok,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AlertComparisonOp {
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "outside_range")]
    OutsideRange,
    #[serde(rename = "within_range")]
    WithinRange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLogicalOp {
    And,
    Or,
}

/// How the query series are reduced to a single value before comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertReducer {
    Avg,
    Min,
    Max,
    Sum,
    Count,
    #[default]
    Last,
    Median,
}

/// Compares the reduced query value against one (or two, for ranges) thresholds.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Evaluator {
    #[serde(rename = "type")]
    comparison_op: AlertComparisonOp,
    params: Vec<f64>,
}

impl Evaluator {
    pub fn greater_than(value: f64) -> Self {
        Self { comparison_op: AlertComparisonOp::GreaterThan, params: vec![value] }
    }

    pub fn less_than(value: f64) -> Self {
        Self { comparison_op: AlertComparisonOp::LessThan, params: vec![value] }
    }

    pub fn outside_range(low: f64, high: f64) -> Self {
        assert!(low <= high, "Range bounds out of order: [{low}, {high}].");
        Self { comparison_op: AlertComparisonOp::OutsideRange, params: vec![low, high] }
    }

    pub fn within_range(low: f64, high: f64) -> Self {
        assert!(low <= high, "Range bounds out of order: [{low}, {high}].");
        Self { comparison_op: AlertComparisonOp::WithinRange, params: vec![low, high] }
    }
}

/// The window of data a condition query is evaluated over, e.g. `5m` to `now`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeRange {
    from: String,
    to: String,
}

impl TimeRange {
    pub fn new(from: impl ToString, to: impl ToString) -> Self {
        Self { from: from.to_string(), to: to.to_string() }
    }

    /// The window from `from` ago until now.
    pub fn last(from: impl ToString) -> Self {
        Self::new(from, "now")
    }
}

/// Defines the condition to trigger the alert.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertCondition {
    // The query whose result is compared.
    pub(crate) target: Target,
    // The window the query is evaluated over.
    time_range: TimeRange,
    // The comparison of the reduced query value.
    evaluator: Evaluator,
    // The logical operator between this condition and the previous conditions.
    logical_op: AlertLogicalOp,
    reducer: AlertReducer,
}

impl AlertCondition {
    pub fn new(
        target: Target,
        time_range: TimeRange,
        evaluator: Evaluator,
        logical_op: AlertLogicalOp,
    ) -> Self {
        // A condition queries a single target, which is always its own first query.
        let target = match target.ref_id {
            Some(_) => target,
            None => target.with_ref_id("A"),
        };
        Self { target, time_range, evaluator, logical_op, reducer: AlertReducer::default() }
    }

    pub fn with_reducer(mut self, reducer: AlertReducer) -> Self {
        self.reducer = reducer;
        self
    }

    pub fn expr(&self) -> &str {
        self.target.expr()
    }
}

impl Serialize for AlertCondition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("AlertCondition", 5)?;

        state.serialize_field("evaluator", &self.evaluator)?;

        state.serialize_field(
            "operator",
            &serde_json::json!({
                "type": self.logical_op
            }),
        )?;

        state.serialize_field(
            "query",
            &serde_json::json!({
                "model": self.target,
                "params": [self.target.ref_id, self.time_range.from, self.time_range.to]
            }),
        )?;

        state.serialize_field(
            "reducer",
            &serde_json::json!({
                "params": [],
                "type": self.reducer
            }),
        )?;

        state.serialize_field("type", "query")?;

        state.end()
    }
}

fn serialize_rule_tags<S>(severity: &AlertSeverity, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let tags: IndexMap<&str, AlertSeverity> = IndexMap::from([("severity", *severity)]);
    tags.serialize(serializer)
}

/// Describes a Grafana panel alert rule.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Alert {
    // The name of the alert.
    pub(crate) name: String,
    // The notification message.
    message: String,
    // The conditions that must be met for the alert to be triggered.
    pub(crate) conditions: Vec<AlertCondition>,
    #[serde(rename = "executionErrorState")]
    execution_error_state: AlertState,
    #[serde(rename = "noDataState")]
    no_data_state: AlertState,
    // How often the alert is evaluated.
    frequency: String,
    // The time duration for which the conditions must be true before the alert fires.
    #[serde(rename = "for")]
    grace_period: String,
    handler: u32,
    notifications: Vec<String>,
    #[serde(rename = "alertRuleTags", serialize_with = "serialize_rule_tags")]
    severity: AlertSeverity,
}

impl Alert {
    pub fn new(
        name: impl ToString,
        message: impl ToString,
        conditions: Vec<AlertCondition>,
        frequency: impl ToString,
        grace_period: impl ToString,
        severity: AlertSeverity,
    ) -> Self {
        let name = name.to_string();
        assert!(!conditions.is_empty(), "Alert {name} has no conditions.");

        Self {
            name,
            message: message.to_string(),
            conditions,
            execution_error_state: AlertState::Alerting,
            no_data_state: AlertState::NoData,
            frequency: frequency.to_string(),
            grace_period: grace_period.to_string(),
            handler: NOTIFICATION_HANDLER_DEFAULT,
            notifications: vec![],
            severity,
        }
    }

    pub fn with_execution_error_state(mut self, state: AlertState) -> Self {
        self.execution_error_state = state;
        self
    }

    pub fn with_no_data_state(mut self, state: AlertState) -> Self {
        self.no_data_state = state;
        self
    }

    pub fn with_notifications(mut self, notification_uids: Vec<String>) -> Self {
        self.notifications = notification_uids;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn severity(&self) -> AlertSeverity {
        self.severity
    }

    pub fn conditions(&self) -> &[AlertCondition] {
        &self.conditions
    }
}
