use monitor_infra_utils::test_utils::assert_json_eq;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

use crate::alerts::{
    Alert,
    AlertCondition,
    AlertLogicalOp,
    AlertReducer,
    AlertSeverity,
    AlertState,
    Alerts,
    Evaluator,
    TimeRange,
    FREQUENCY_DEFAULT,
    GRACE_PERIOD_DEFAULT,
};
use crate::panel::Target;

fn condition(expr: &str) -> AlertCondition {
    AlertCondition::new(
        Target::new(expr),
        TimeRange::last("5m"),
        Evaluator::greater_than(10.0),
        AlertLogicalOp::And,
    )
}

fn alert(name: &str) -> Alert {
    Alert::new(
        name,
        "Message",
        vec![condition("up == 0")],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        AlertSeverity::Regular,
    )
}

#[test]
fn serialize_alert() {
    let alert = Alert::new(
        "Name",
        "Message",
        vec![
            AlertCondition::new(
                Target::new("max_over_time(x[5m])").with_datasource("${datasource}"),
                TimeRange::last("15m"),
                Evaluator::greater_than(10.0),
                AlertLogicalOp::And,
            )
            .with_reducer(AlertReducer::Max),
        ],
        "5m",
        GRACE_PERIOD_DEFAULT,
        AlertSeverity::Sos,
    )
    .with_no_data_state(AlertState::Ok)
    .with_execution_error_state(AlertState::KeepState)
    .with_notifications(vec!["pager".to_string()]);

    let expected = json!({
        "name": "Name",
        "message": "Message",
        "conditions": [
            {
                "evaluator": {"type": "gt", "params": [10.0]},
                "operator": {"type": "and"},
                "query": {
                    "model": {
                        "expr": "max_over_time(x[5m])",
                        "refId": "A",
                        "legendFormat": "",
                        "datasource": "${datasource}",
                        "format": "time_series",
                        "hide": false
                    },
                    "params": ["A", "15m", "now"]
                },
                "reducer": {"params": [], "type": "max"},
                "type": "query"
            }
        ],
        "executionErrorState": "keep_state",
        "noDataState": "ok",
        "frequency": "5m",
        "for": "5m",
        "handler": 1,
        "notifications": ["pager"],
        "alertRuleTags": {"severity": "p1"}
    });
    assert_json_eq(&alert, &expected, "Json Comparison failed".to_string());
}

#[test]
fn condition_keeps_explicit_ref_id() {
    let condition = AlertCondition::new(
        Target::new("x").with_ref_id("B"),
        TimeRange::new("10m", "now-1m"),
        Evaluator::less_than(1.0),
        AlertLogicalOp::Or,
    );

    let serialized = serde_json::to_value(&condition).unwrap();
    assert_eq!(serialized["query"]["params"], json!(["B", "10m", "now-1m"]));
    assert_eq!(serialized["evaluator"], json!({"type": "lt", "params": [1.0]}));
    assert_eq!(serialized["operator"], json!({"type": "or"}));
    assert_eq!(serialized["reducer"]["type"], json!("last"));
}

#[rstest]
#[case::outside_range(Evaluator::outside_range(1.0, 2.0), json!({"type": "outside_range", "params": [1.0, 2.0]}))]
#[case::within_range(Evaluator::within_range(0.0, 0.5), json!({"type": "within_range", "params": [0.0, 0.5]}))]
fn range_evaluators(#[case] evaluator: Evaluator, #[case] expected: serde_json::Value) {
    assert_eq!(serde_json::to_value(&evaluator).unwrap(), expected);
}

#[test]
#[should_panic(expected = "Range bounds out of order")]
fn range_evaluator_rejects_reversed_bounds() {
    Evaluator::outside_range(2.0, 1.0);
}

#[test]
#[should_panic(expected = "has no conditions")]
fn alert_requires_conditions() {
    Alert::new(
        "Name",
        "Message",
        vec![],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        AlertSeverity::Regular,
    );
}

#[test]
fn alerts_catalog() {
    let alerts = Alerts::new(vec![alert("first"), alert("second")]);

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts.iter().map(Alert::name).collect::<Vec<_>>(), vec!["first", "second"]);
    let serialized = serde_json::to_value(&alerts).unwrap();
    assert_eq!(serialized["alerts"].as_array().unwrap().len(), 2);
}

#[test]
#[should_panic(expected = "Duplicate alert name found: first")]
fn alerts_catalog_rejects_duplicate_names() {
    Alerts::new(vec![alert("first"), alert("first")]);
}
