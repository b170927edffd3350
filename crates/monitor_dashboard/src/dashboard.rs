use std::collections::HashSet;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::alerts::{Alert, Alerts};
use crate::panel::{GridPos, Panel, PanelType};
use crate::templating::{referenced_variables, Templating};

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// The dashboard JSON schema version the serialized dashboards follow.
pub const SCHEMA_VERSION: u32 = 12;

const TIMEZONE_DEFAULT: &str = "browser";
const REFRESH_DEFAULT: &str = "10s";
const REFRESH_INTERVALS: [&str; 10] =
    ["5s", "10s", "30s", "1m", "5m", "15m", "30m", "1h", "2h", "1d"];
const TIME_OPTIONS: [&str; 9] = ["5m", "15m", "1h", "6h", "12h", "24h", "2d", "7d", "30d"];

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DashboardError {
    #[error("Panel {panel:?} does not fit the 24-column grid: {grid_pos:?}.")]
    OutOfGrid { panel: String, grid_pos: GridPos },
    #[error("Panels {first:?} and {second:?} overlap.")]
    OverlappingPanels { first: String, second: String },
    #[error("Panel {panel:?} has more than one query with refId {ref_id}.")]
    DuplicateRefId { panel: String, ref_id: String },
    #[error("{location} references the undefined template variable ${variable}.")]
    UndefinedVariable { location: String, variable: String },
    #[error("Template variable {0} is defined more than once.")]
    DuplicateTemplateVariable(String),
    #[error("Alert name {0} is used more than once.")]
    DuplicateAlertName(String),
    #[error("Panel {panel:?} of type {panel_type:?} cannot carry an alert, only graph panels can.")]
    AlertOnNonGraphPanel { panel: String, panel_type: PanelType },
}

/// The default time range of the dashboard, e.g. `now-1h` to `now`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Time {
    from: String,
    to: String,
}

impl Time {
    pub fn new(from: impl ToString, to: impl ToString) -> Self {
        Self { from: from.to_string(), to: to.to_string() }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new("now-1h", "now")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimePicker {
    refresh_intervals: Vec<String>,
    time_options: Vec<String>,
    hidden: bool,
}

impl Default for TimePicker {
    fn default() -> Self {
        Self {
            refresh_intervals: REFRESH_INTERVALS.iter().map(ToString::to_string).collect(),
            time_options: TIME_OPTIONS.iter().map(ToString::to_string).collect(),
            hidden: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    title: String,
    description: String,
    uid: Option<String>,
    tags: Vec<String>,
    timezone: String,
    refresh: String,
    editable: bool,
    time: Time,
    time_picker: TimePicker,
    templating: Templating,
    panels: Vec<Panel>,
    // Alerts that are not bound to a panel. They only reach the alert rule file.
    dashboard_alerts: Vec<Alert>,
}

impl Dashboard {
    pub fn new(title: impl ToString, description: impl ToString) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            uid: None,
            tags: vec![],
            timezone: TIMEZONE_DEFAULT.to_string(),
            refresh: REFRESH_DEFAULT.to_string(),
            editable: true,
            time: Time::default(),
            time_picker: TimePicker::default(),
            templating: Templating::default(),
            panels: vec![],
            dashboard_alerts: vec![],
        }
    }

    pub fn with_uid(mut self, uid: impl ToString) -> Self {
        self.uid = Some(uid.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_timezone(mut self, timezone: impl ToString) -> Self {
        self.timezone = timezone.to_string();
        self
    }

    pub fn with_refresh(mut self, refresh: impl ToString) -> Self {
        self.refresh = refresh.to_string();
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_time(mut self, time: Time) -> Self {
        self.time = time;
        self
    }

    pub fn with_templating(mut self, templating: Templating) -> Self {
        self.templating = templating;
        self
    }

    pub fn with_panels(mut self, panels: Vec<Panel>) -> Self {
        self.panels = panels;
        self
    }

    pub fn with_dashboard_alerts(mut self, alerts: Vec<Alert>) -> Self {
        self.dashboard_alerts = alerts;
        self
    }

    /// Numbers the panels 1, 2, ... in their order on the dashboard.
    pub fn auto_panel_ids(mut self) -> Self {
        for (panel, id) in self.panels.iter_mut().zip(1..) {
            panel.id = Some(id);
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn templating(&self) -> &Templating {
        &self.templating
    }

    /// All alerts of the dashboard: panel alerts in panel order, then dashboard-level alerts.
    pub fn alerts(&self) -> Alerts {
        let alerts = self
            .panels
            .iter()
            .filter_map(|panel| panel.alert.clone())
            .chain(self.dashboard_alerts.iter().cloned())
            .collect();
        Alerts::new(alerts)
    }

    /// Checks the dashboard is consistent: layout, query ids, variable references and alerts.
    pub fn validate(&self) -> Result<(), DashboardError> {
        self.validate_layout()?;
        self.validate_ref_ids()?;
        self.validate_variables()?;
        self.validate_alerts()?;
        debug!("Dashboard {:?} is valid.", self.title);
        Ok(())
    }

    fn validate_layout(&self) -> Result<(), DashboardError> {
        for (index, panel) in self.panels.iter().enumerate() {
            if !panel.grid_pos.fits_grid() {
                return Err(DashboardError::OutOfGrid {
                    panel: panel.title.clone(),
                    grid_pos: panel.grid_pos,
                });
            }
            if let Some(other) =
                self.panels[..index].iter().find(|other| other.grid_pos.overlaps(&panel.grid_pos))
            {
                return Err(DashboardError::OverlappingPanels {
                    first: other.title.clone(),
                    second: panel.title.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_ref_ids(&self) -> Result<(), DashboardError> {
        for panel in &self.panels {
            let mut seen = HashSet::new();
            for ref_id in panel.targets.iter().filter_map(|target| target.ref_id()) {
                if !seen.insert(ref_id) {
                    return Err(DashboardError::DuplicateRefId {
                        panel: panel.title.clone(),
                        ref_id: ref_id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_variables(&self) -> Result<(), DashboardError> {
        let mut declared = HashSet::new();
        for template in self.templating.iter() {
            if !declared.insert(template.name.as_str()) {
                return Err(DashboardError::DuplicateTemplateVariable(template.name.clone()));
            }
        }

        let check = |location: String, text: &str| -> Result<(), DashboardError> {
            let undefined =
                referenced_variables(text).into_iter().find(|name| !declared.contains(name.as_str()));
            match undefined {
                Some(variable) => Err(DashboardError::UndefinedVariable { location, variable }),
                None => Ok(()),
            }
        };

        for template in self.templating.iter() {
            let location = format!("Template variable {}", template.name);
            check(location.clone(), &template.query)?;
            if let Some(datasource) = &template.datasource {
                check(location, datasource)?;
            }
        }
        for panel in &self.panels {
            let location = format!("Panel {:?}", panel.title);
            check(location.clone(), &panel.datasource)?;
            for target in &panel.targets {
                check(location.clone(), target.expr())?;
            }
        }
        let panel_alerts = self.panels.iter().filter_map(|panel| panel.alert.as_ref());
        for alert in panel_alerts.chain(&self.dashboard_alerts) {
            let location = format!("Alert {:?}", alert.name);
            for condition in &alert.conditions {
                check(location.clone(), condition.expr())?;
                if let Some(datasource) = &condition.target.datasource {
                    check(location.clone(), datasource)?;
                }
            }
        }
        Ok(())
    }

    fn validate_alerts(&self) -> Result<(), DashboardError> {
        let mut names = HashSet::new();
        for panel in &self.panels {
            let Some(alert) = &panel.alert else {
                continue;
            };
            if panel.panel_type != PanelType::Graph {
                return Err(DashboardError::AlertOnNonGraphPanel {
                    panel: panel.title.clone(),
                    panel_type: panel.panel_type,
                });
            }
            if !names.insert(alert.name.as_str()) {
                return Err(DashboardError::DuplicateAlertName(alert.name.clone()));
            }
        }
        for alert in &self.dashboard_alerts {
            if !names.insert(alert.name.as_str()) {
                return Err(DashboardError::DuplicateAlertName(alert.name.clone()));
            }
        }
        Ok(())
    }
}

impl Serialize for Dashboard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Dashboard", 16)?;
        state.serialize_field("id", &None::<u32>)?;
        state.serialize_field("uid", &self.uid)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("tags", &self.tags)?;
        state.serialize_field("timezone", &self.timezone)?;
        state.serialize_field("editable", &self.editable)?;
        state.serialize_field("refresh", &self.refresh)?;
        state.serialize_field("time", &self.time)?;
        state.serialize_field("timepicker", &self.time_picker)?;
        state.serialize_field("templating", &self.templating)?;
        state.serialize_field("annotations", &serde_json::json!({"list": []}))?;
        state.serialize_field("links", &Vec::<String>::new())?;
        state.serialize_field("panels", &self.panels)?;
        state.serialize_field("schemaVersion", &SCHEMA_VERSION)?;
        state.serialize_field("version", &0)?;
        state.end()
    }
}
