use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::json;

use crate::alerts::Alert;

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

/// Number of columns of the Grafana dashboard grid.
pub const GRID_WIDTH: u32 = 24;

/// The datasource template variable every dashboard in this crate declares.
pub const DATASOURCE_VARIABLE: &str = "${datasource}";

/// Grafana panel types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PanelType {
    #[serde(rename = "graph")]
    Graph,
    #[serde(rename = "timeseries")]
    TimeSeries,
    #[serde(rename = "stat")]
    Stat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "ops")]
    Ops,
    #[serde(rename = "percent")]
    Percent,
    #[serde(rename = "percentunit")]
    PercentUnit,
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "s")]
    Seconds,
}

/// Placement of a panel on the dashboard grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridPos {
    pub h: u32,
    pub w: u32,
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub const fn new(h: u32, w: u32, x: u32, y: u32) -> Self {
        Self { h, w, x, y }
    }

    pub(crate) fn fits_grid(&self) -> bool {
        self.w > 0
            && self.h > 0
            && self.x.checked_add(self.w).is_some_and(|right_edge| right_edge <= GRID_WIDTH)
    }

    pub(crate) fn overlaps(&self, other: &GridPos) -> bool {
        self.x < other.x.saturating_add(other.w)
            && other.x < self.x.saturating_add(self.w)
            && self.y < other.y.saturating_add(other.h)
            && other.y < self.y.saturating_add(self.h)
    }
}

/// A single query of a panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Target {
    pub(crate) expr: String,
    #[serde(rename = "refId")]
    pub(crate) ref_id: Option<String>,
    #[serde(rename = "legendFormat")]
    legend_format: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) datasource: Option<String>,
    format: &'static str,
    hide: bool,
}

impl Target {
    pub fn new(expr: impl ToString) -> Self {
        Self {
            expr: expr.to_string(),
            ref_id: None,
            legend_format: String::new(),
            datasource: None,
            format: "time_series",
            hide: false,
        }
    }

    pub fn with_legend(mut self, legend_format: impl ToString) -> Self {
        self.legend_format = legend_format.to_string();
        self
    }

    pub fn with_ref_id(mut self, ref_id: impl ToString) -> Self {
        self.ref_id = Some(ref_id.to_string());
        self
    }

    pub fn with_datasource(mut self, datasource: impl ToString) -> Self {
        self.datasource = Some(datasource.to_string());
        self
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn ref_id(&self) -> Option<&str> {
        self.ref_id.as_deref()
    }
}

impl From<String> for Target {
    fn from(expr: String) -> Self {
        Self::new(expr)
    }
}

/// Returns the Grafana ref id of the query at `index`: A, B, ..., Z, AA, AB, ...
pub(crate) fn ref_id_for_index(index: usize) -> String {
    let mut remaining = index + 1;
    let mut letters = Vec::new();
    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'A' + u8::try_from(remaining % 26).expect("Below 26")));
        remaining /= 26;
    }
    letters.iter().rev().collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct YAxis {
    format: Unit,
    label: Option<String>,
    #[serde(rename = "logBase")]
    log_base: u32,
    max: Option<f64>,
    min: Option<f64>,
    decimals: Option<u32>,
    show: bool,
}

impl YAxis {
    pub fn new(format: Unit) -> Self {
        Self { format, label: None, log_base: 1, max: None, min: None, decimals: None, show: true }
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// The left and right y axes of a graph panel.
#[derive(Clone, Debug, PartialEq)]
pub struct YAxes {
    left: YAxis,
    right: YAxis,
}

impl YAxes {
    pub fn new(left: YAxis, right: YAxis) -> Self {
        Self { left, right }
    }
}

impl Serialize for YAxes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [&self.left, &self.right].serialize(serializer)
    }
}

/// A graph axis pair where only the left axis is shown.
pub fn single_y_axis(format: Unit) -> YAxes {
    YAxes::new(YAxis::new(format), YAxis::new(Unit::Short).hidden())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendDisplayMode {
    List,
    Table,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendPlacement {
    Bottom,
    Right,
}

/// Reductions shown next to each series in a time series legend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendCalc {
    Mean,
    Max,
    Min,
    Last,
    Sum,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Legend {
    #[serde(rename = "displayMode")]
    display_mode: LegendDisplayMode,
    placement: LegendPlacement,
    calcs: Vec<LegendCalc>,
}

impl Legend {
    pub fn list() -> Self {
        Self {
            display_mode: LegendDisplayMode::List,
            placement: LegendPlacement::Bottom,
            calcs: vec![],
        }
    }

    pub fn table(calcs: Vec<LegendCalc>) -> Self {
        Self { display_mode: LegendDisplayMode::Table, placement: LegendPlacement::Bottom, calcs }
    }
}

impl Default for Legend {
    fn default() -> Self {
        Self::list()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    pub(crate) id: Option<u32>,
    pub(crate) title: String,
    description: String,
    pub(crate) panel_type: PanelType,
    pub(crate) datasource: String,
    pub(crate) targets: Vec<Target>,
    pub(crate) grid_pos: GridPos,
    unit: Option<Unit>,
    y_axes: Option<YAxes>,
    legend: Legend,
    pub(crate) alert: Option<Alert>,
}

impl Panel {
    pub fn new(
        title: impl ToString,
        description: impl ToString,
        targets: Vec<Target>,
        panel_type: PanelType,
    ) -> Self {
        let targets = targets
            .into_iter()
            .enumerate()
            .map(|(index, mut target)| {
                target.ref_id.get_or_insert_with(|| ref_id_for_index(index));
                target
            })
            .collect();

        Self {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            panel_type,
            datasource: DATASOURCE_VARIABLE.to_string(),
            targets,
            grid_pos: GridPos::new(8, 12, 0, 0),
            unit: None,
            y_axes: None,
            legend: Legend::default(),
            alert: None,
        }
    }

    pub fn with_grid_pos(mut self, grid_pos: GridPos) -> Self {
        self.grid_pos = grid_pos;
        self
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Explicit axes of a graph panel. They take precedence over `with_unit`, whose unit then
    /// only applies to the field config of the other panel types.
    pub fn with_y_axes(mut self, y_axes: YAxes) -> Self {
        self.y_axes = Some(y_axes);
        self
    }

    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_alert(mut self, alert: Alert) -> Self {
        self.alert = Some(alert);
        self
    }

    pub fn with_datasource(mut self, datasource: impl ToString) -> Self {
        self.datasource = datasource.to_string();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn panel_type(&self) -> PanelType {
        self.panel_type
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    fn graph_y_axes(&self) -> YAxes {
        self.y_axes.clone().unwrap_or_else(|| single_y_axis(self.unit.unwrap_or(Unit::Short)))
    }

    fn field_config(&self) -> serde_json::Value {
        let mut defaults = serde_json::Map::new();
        if let Some(unit) = self.unit {
            defaults.insert("unit".to_string(), json!(unit));
        }
        if self.panel_type == PanelType::TimeSeries {
            defaults.insert(
                "custom".to_string(),
                json!({
                    "drawStyle": "line",
                    "lineWidth": 1,
                    "fillOpacity": 10,
                    "showPoints": "never"
                }),
            );
        }
        json!({"defaults": defaults, "overrides": []})
    }
}

// Grafana's panel schema differs per panel type, hence the custom Serialize implementation.
impl Serialize for Panel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("description", &self.description)?;
        map.serialize_entry("type", &self.panel_type)?;
        map.serialize_entry("datasource", &self.datasource)?;
        map.serialize_entry("gridPos", &self.grid_pos)?;
        map.serialize_entry("targets", &self.targets)?;

        match self.panel_type {
            PanelType::Graph => {
                map.serialize_entry("lines", &true)?;
                map.serialize_entry("linewidth", &1)?;
                map.serialize_entry("fill", &1)?;
                map.serialize_entry("nullPointMode", "connected")?;
                let align_as_table = self.legend.display_mode == LegendDisplayMode::Table;
                map.serialize_entry(
                    "legend",
                    &json!({"show": true, "alignAsTable": align_as_table}),
                )?;
                map.serialize_entry("xaxis", &json!({"mode": "time", "show": true}))?;
                map.serialize_entry("yaxes", &self.graph_y_axes())?;
                if let Some(alert) = &self.alert {
                    map.serialize_entry("alert", alert)?;
                }
            }
            PanelType::TimeSeries => {
                map.serialize_entry("fieldConfig", &self.field_config())?;
                map.serialize_entry(
                    "options",
                    &json!({"legend": self.legend, "tooltip": {"mode": "single"}}),
                )?;
            }
            PanelType::Stat => {
                map.serialize_entry("fieldConfig", &self.field_config())?;
                map.serialize_entry(
                    "options",
                    &json!({
                        "reduceOptions": {"calcs": ["mean"], "fields": "", "values": false},
                        "colorMode": "value",
                        "graphMode": "area",
                        "justifyMode": "auto",
                        "orientation": "auto",
                        "textMode": "auto"
                    }),
                )?;
            }
        }

        map.end()
    }
}
