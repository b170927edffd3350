use monitor_infra_utils::test_utils::{assert_json_eq, assert_json_includes};
use pretty_assertions::assert_eq;
use rstest::rstest;
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
use crate::panel::{
    ref_id_for_index,
    single_y_axis,
    GridPos,
    Legend,
    LegendCalc,
    Panel,
    PanelType,
    Target,
    Unit,
    YAxes,
    YAxis,
    DATASOURCE_VARIABLE,
};

#[rstest]
#[case(0, "A")]
#[case(1, "B")]
#[case(25, "Z")]
#[case(26, "AA")]
#[case(27, "AB")]
#[case(701, "ZZ")]
#[case(702, "AAA")]
fn ref_ids(#[case] index: usize, #[case] expected: &str) {
    assert_eq!(ref_id_for_index(index), expected);
}

#[test]
fn targets_get_sequential_ref_ids() {
    let panel = Panel::new(
        "Title",
        "Description",
        vec![Target::new("a"), Target::new("b").with_ref_id("X"), Target::new("c")],
        PanelType::TimeSeries,
    );

    let ref_ids: Vec<_> = panel.targets().iter().map(|target| target.ref_id()).collect();
    assert_eq!(ref_ids, vec![Some("A"), Some("X"), Some("C")]);
    assert_eq!(panel.datasource, DATASOURCE_VARIABLE);
}

#[rstest]
#[case::inside(GridPos::new(8, 12, 12, 0), true)]
#[case::full_width(GridPos::new(3, 24, 0, 5), true)]
#[case::past_right_edge(GridPos::new(8, 12, 13, 0), false)]
#[case::zero_width(GridPos::new(8, 0, 0, 0), false)]
#[case::width_overflows(GridPos::new(8, u32::MAX, 1, 0), false)]
fn grid_fit(#[case] grid_pos: GridPos, #[case] fits: bool) {
    assert_eq!(grid_pos.fits_grid(), fits);
}

#[rstest]
#[case::same_row(GridPos::new(8, 12, 0, 0), GridPos::new(8, 12, 6, 4), true)]
#[case::side_by_side(GridPos::new(8, 12, 0, 0), GridPos::new(8, 12, 12, 0), false)]
#[case::stacked(GridPos::new(3, 4, 0, 0), GridPos::new(8, 12, 0, 3), false)]
#[case::huge(GridPos::new(u32::MAX, u32::MAX, 0, 0), GridPos::new(8, 12, 12, 40), true)]
#[case::huge_far_right(GridPos::new(u32::MAX, 4, u32::MAX, 0), GridPos::new(8, 12, 0, 0), false)]
fn grid_overlap(#[case] first: GridPos, #[case] second: GridPos, #[case] overlaps: bool) {
    assert_eq!(first.overlaps(&second), overlaps);
    assert_eq!(second.overlaps(&first), overlaps);
}

#[test]
fn serialize_graph_panel() {
    let alert = Alert::new(
        "Alert",
        "Message",
        vec![AlertCondition::new(
            Target::new("up == 0"),
            TimeRange::last("5m"),
            Evaluator::greater_than(0.0),
            AlertLogicalOp::And,
        )],
        FREQUENCY_DEFAULT,
        GRACE_PERIOD_DEFAULT,
        AlertSeverity::Sos,
    );
    let panel = Panel::new(
        "Up",
        "Whether the target is up",
        vec![Target::new("up").with_legend("{{instance}}")],
        PanelType::Graph,
    )
    .with_grid_pos(GridPos::new(3, 4, 0, 0))
    .with_unit(Unit::Bytes)
    .with_alert(alert);

    let expected = json!({
        "id": null,
        "title": "Up",
        "description": "Whether the target is up",
        "type": "graph",
        "datasource": "${datasource}",
        "gridPos": {"h": 3, "w": 4, "x": 0, "y": 0},
        "targets": [
            {
                "expr": "up",
                "refId": "A",
                "legendFormat": "{{instance}}",
                "format": "time_series",
                "hide": false
            }
        ],
        "lines": true,
        "linewidth": 1,
        "fill": 1,
        "nullPointMode": "connected",
        "legend": {"show": true, "alignAsTable": false},
        "xaxis": {"mode": "time", "show": true},
        "yaxes": [
            {
                "format": "bytes",
                "label": null,
                "logBase": 1,
                "max": null,
                "min": null,
                "decimals": null,
                "show": true
            },
            {
                "format": "short",
                "label": null,
                "logBase": 1,
                "max": null,
                "min": null,
                "decimals": null,
                "show": false
            }
        ],
        "alert": serde_json::to_value(panel.alert().unwrap()).unwrap()
    });
    assert_json_eq(&panel, &expected, "Json Comparison failed".to_string());
}

#[test]
fn graph_panel_explicit_y_axes() {
    let panel = Panel::new("Cpu", "", vec![Target::new("cpu")], PanelType::Graph)
        .with_y_axes(YAxes::new(YAxis::new(Unit::Percent).with_min(0.0), YAxis::new(Unit::Short)));

    let serialized = serde_json::to_value(&panel).unwrap();
    assert_eq!(serialized["yaxes"][0]["format"], json!("percent"));
    assert_eq!(serialized["yaxes"][0]["min"], json!(0.0));
    assert_eq!(serialized["yaxes"][1]["show"], json!(true));
    assert!(serialized.get("alert").is_none());
}

#[test]
fn graph_panel_explicit_y_axes_override_unit() {
    let panel = Panel::new("Cpu", "", vec![Target::new("cpu")], PanelType::Graph)
        .with_unit(Unit::Bytes)
        .with_y_axes(single_y_axis(Unit::Percent));

    let serialized = serde_json::to_value(&panel).unwrap();
    assert_eq!(serialized["yaxes"][0]["format"], json!("percent"));
    assert!(serialized.get("fieldConfig").is_none());
}

#[test]
fn time_series_list_legend() {
    let panel = Panel::new("Reads", "", vec![Target::new("reads")], PanelType::TimeSeries)
        .with_legend(Legend::list());

    assert_eq!(panel, Panel::new("Reads", "", vec![Target::new("reads")], PanelType::TimeSeries));
    let serialized = serde_json::to_value(&panel).unwrap();
    assert_eq!(
        serialized["options"]["legend"],
        json!({"displayMode": "list", "placement": "bottom", "calcs": []})
    );
}

#[test]
fn default_graph_axes_are_short() {
    let panel = Panel::new("Count", "", vec![Target::new("count")], PanelType::Graph);

    assert_json_includes(
        &panel,
        &json!({"yaxes": serde_json::to_value(single_y_axis(Unit::Short)).unwrap()}),
        "Json Comparison failed".to_string(),
    );
}

#[test]
fn serialize_time_series_panel() {
    let panel = Panel::new(
        "Operations",
        "Reads and writes",
        vec![Target::new("reads").with_legend("Reads"), Target::new("writes").with_legend("Writes")],
        PanelType::TimeSeries,
    )
    .with_unit(Unit::Ops)
    .with_legend(Legend::table(vec![LegendCalc::Mean, LegendCalc::Max]));

    let expected = json!({
        "type": "timeseries",
        "fieldConfig": {
            "defaults": {
                "unit": "ops",
                "custom": {"drawStyle": "line", "lineWidth": 1, "fillOpacity": 10, "showPoints": "never"}
            },
            "overrides": []
        },
        "options": {
            "legend": {"displayMode": "table", "placement": "bottom", "calcs": ["mean", "max"]},
            "tooltip": {"mode": "single"}
        }
    });
    assert_json_includes(&panel, &expected, "Json Comparison failed".to_string());

    let serialized = serde_json::to_value(&panel).unwrap();
    assert_eq!(serialized["targets"][1]["refId"], json!("B"));
    assert!(serialized.get("yaxes").is_none());
}

#[test]
fn serialize_stat_panel() {
    let panel = Panel::new("Memory", "", vec![Target::new("mem")], PanelType::Stat)
        .with_grid_pos(GridPos::new(3, 6, 6, 0))
        .with_unit(Unit::Bytes);

    let expected = json!({
        "type": "stat",
        "gridPos": {"h": 3, "w": 6, "x": 6, "y": 0},
        "fieldConfig": {"defaults": {"unit": "bytes"}, "overrides": []},
        "options": {"reduceOptions": {"calcs": ["mean"], "fields": "", "values": false}}
    });
    assert_json_includes(&panel, &expected, "Json Comparison failed".to_string());
}
