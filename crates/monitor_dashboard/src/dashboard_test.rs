use monitor_infra_utils::test_utils::{assert_json_eq, assert_json_includes};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::alerts::{
    Alert,
    AlertCondition,
    AlertLogicalOp,
    AlertSeverity,
    Evaluator,
    TimeRange,
    FREQUENCY_DEFAULT,
    GRACE_PERIOD_DEFAULT,
};
use crate::dashboard::{Dashboard, DashboardError, Time};
use crate::panel::{GridPos, Panel, PanelType, Target};
use crate::templating::{Template, Templating};

fn alert(name: &str, expr: &str) -> Alert {
    Alert::new(
        name,
        "Message",
        vec![AlertCondition::new(
            Target::new(expr),
            TimeRange::last("5m"),
            Evaluator::greater_than(0.0),
            AlertLogicalOp::And,
        )],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        AlertSeverity::Regular,
    )
}

fn panel(title: &str, expr: &str, grid_pos: GridPos) -> Panel {
    Panel::new(title, "", vec![Target::new(expr)], PanelType::Graph).with_grid_pos(grid_pos)
}

fn templating() -> Templating {
    Templating::new(vec![
        Template::datasource("datasource", "Data Source", "prometheus"),
        Template::query("instance", "Instance", "label_values(up, instance)"),
    ])
}

fn dashboard(panels: Vec<Panel>) -> Dashboard {
    Dashboard::new("Title", "Description").with_templating(templating()).with_panels(panels)
}

#[test]
fn serialize_dashboard_defaults() {
    let dashboard = Dashboard::new("Title", "Description").with_tags(&["a", "b"]);

    let expected = json!({
        "id": null,
        "uid": null,
        "title": "Title",
        "description": "Description",
        "tags": ["a", "b"],
        "timezone": "browser",
        "editable": true,
        "refresh": "10s",
        "time": {"from": "now-1h", "to": "now"},
        "timepicker": {
            "refresh_intervals": ["5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d"],
            "time_options": ["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"],
            "hidden": false
        },
        "templating": {"list": []},
        "annotations": {"list": []},
        "links": [],
        "panels": [],
        "schemaVersion": 12,
        "version": 0
    });
    assert_json_eq(&dashboard, &expected, "Json Comparison failed".to_string());
}

#[test]
fn serialize_dashboard_overrides() {
    let dashboard = Dashboard::new("Title", "Description")
        .with_uid("uid")
        .with_timezone("utc")
        .with_refresh("1m")
        .with_editable(false)
        .with_time(Time::new("now-3h", "now"));

    let expected = json!({
        "uid": "uid",
        "timezone": "utc",
        "refresh": "1m",
        "editable": false,
        "time": {"from": "now-3h", "to": "now"}
    });
    assert_json_includes(&dashboard, &expected, "Json Comparison failed".to_string());
}

#[test]
fn auto_panel_ids_follow_panel_order() {
    let dashboard = dashboard(vec![
        panel("first", "up", GridPos::new(8, 12, 0, 0)),
        panel("second", "up", GridPos::new(8, 12, 12, 0)),
    ])
    .auto_panel_ids();

    let ids: Vec<_> = dashboard.panels().iter().map(|panel| panel.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2)]);
}

#[test]
fn valid_dashboard() {
    let dashboard = dashboard(vec![
        panel("first", r#"up{instance=~"$instance"}"#, GridPos::new(3, 4, 0, 0))
            .with_alert(alert("down", "up == 0")),
        panel("second", "up", GridPos::new(8, 12, 0, 3)),
    ])
    .with_dashboard_alerts(vec![alert("dashboard", "sum(up) < 1")]);

    assert_eq!(dashboard.validate(), Ok(()));
    let alert_names: Vec<_> =
        dashboard.alerts().iter().map(Alert::name).map(String::from).collect();
    assert_eq!(alert_names, vec!["down", "dashboard"]);
}

#[test]
fn panel_out_of_grid() {
    let dashboard = dashboard(vec![panel("wide", "up", GridPos::new(8, 12, 16, 0))]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::OutOfGrid {
            panel: "wide".to_string(),
            grid_pos: GridPos::new(8, 12, 16, 0)
        })
    );
}

#[test]
fn panel_width_overflowing_the_grid() {
    let grid_pos = GridPos::new(8, u32::MAX, 1, 0);
    let dashboard = dashboard(vec![panel("huge", "up", grid_pos)]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::OutOfGrid { panel: "huge".to_string(), grid_pos })
    );
}

#[test]
fn overlapping_panels() {
    let dashboard = dashboard(vec![
        panel("first", "up", GridPos::new(8, 12, 0, 0)),
        panel("second", "up", GridPos::new(8, 12, 0, 7)),
    ]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::OverlappingPanels {
            first: "first".to_string(),
            second: "second".to_string()
        })
    );
}

#[test]
fn duplicate_ref_ids() {
    let panel = Panel::new(
        "panel",
        "",
        vec![Target::new("a").with_ref_id("A"), Target::new("b").with_ref_id("A")],
        PanelType::TimeSeries,
    );

    assert_eq!(
        dashboard(vec![panel]).validate(),
        Err(DashboardError::DuplicateRefId { panel: "panel".to_string(), ref_id: "A".to_string() })
    );
}

#[test]
fn undefined_variable_in_target() {
    let dashboard =
        dashboard(vec![panel("panel", r#"up{job=~"$job"}"#, GridPos::new(8, 12, 0, 0))]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::UndefinedVariable {
            location: "Panel \"panel\"".to_string(),
            variable: "job".to_string()
        })
    );
}

#[test]
fn undefined_variable_in_panel_datasource() {
    let dashboard = dashboard(vec![
        panel("panel", "up", GridPos::new(8, 12, 0, 0)).with_datasource("${prometheus}"),
    ]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::UndefinedVariable {
            location: "Panel \"panel\"".to_string(),
            variable: "prometheus".to_string()
        })
    );
}

#[test]
fn undefined_variable_in_alert() {
    let dashboard = dashboard(vec![])
        .with_dashboard_alerts(vec![alert("high", "rate(x[$rate_interval]) > 1")]);

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::UndefinedVariable {
            location: "Alert \"high\"".to_string(),
            variable: "rate_interval".to_string()
        })
    );
}

#[test]
fn undefined_variable_in_template() {
    let dashboard = Dashboard::new("Title", "Description").with_templating(Templating::new(vec![
        Template::query("instance", "Instance", "label_values(up, instance)"),
    ]));

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::UndefinedVariable {
            location: "Template variable instance".to_string(),
            variable: "datasource".to_string()
        })
    );
}

#[test]
fn duplicate_template_variable() {
    let dashboard = Dashboard::new("Title", "Description").with_templating(Templating::new(vec![
        Template::constant("threshold", "Threshold", 1),
        Template::constant("threshold", "Threshold", 2),
    ]));

    assert_eq!(
        dashboard.validate(),
        Err(DashboardError::DuplicateTemplateVariable("threshold".to_string()))
    );
}

#[test]
fn duplicate_alert_names() {
    let dashboard = dashboard(vec![
        panel("panel", "up", GridPos::new(8, 12, 0, 0)).with_alert(alert("down", "up == 0")),
    ])
    .with_dashboard_alerts(vec![alert("down", "up < 1")]);

    assert_eq!(dashboard.validate(), Err(DashboardError::DuplicateAlertName("down".to_string())));
}

#[test]
fn alert_on_non_graph_panel() {
    let panel = Panel::new("stat", "", vec![Target::new("up")], PanelType::Stat)
        .with_alert(alert("down", "up == 0"));

    assert_eq!(
        dashboard(vec![panel]).validate(),
        Err(DashboardError::AlertOnNonGraphPanel {
            panel: "stat".to_string(),
            panel_type: PanelType::Stat
        })
    );
}
