use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::json;
use serde_repr::Serialize_repr;

use crate::panel::DATASOURCE_VARIABLE;

#[cfg(test)]
#[path = "templating_test.rs"]
mod templating_test;

// Matches `$name` and `${name}` (optionally with a `${name:format}` suffix).
static VARIABLE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)(?::[^}]*)?\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("Variable reference pattern should compile")
});

// Grafana's global variables, e.g. `$__interval`, are always defined.
const BUILTIN_VARIABLE_PREFIX: &str = "__";

/// Returns the names of the template variables referenced in `expr`, in order of appearance,
/// without duplicates and without Grafana built-ins.
pub fn referenced_variables(expr: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for captures in VARIABLE_REFERENCE.captures_iter(expr) {
        let Some(name) = captures.get(1).or_else(|| captures.get(2)) else {
            continue;
        };
        let name = name.as_str();
        if name.starts_with(BUILTIN_VARIABLE_PREFIX) || names.iter().any(|known| known == name) {
            continue;
        }
        names.push(name.to_string());
    }
    names
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Query,
    Datasource,
    Constant,
    Interval,
    Custom,
}

/// When Grafana re-runs the variable query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_repr)]
#[repr(u8)]
pub enum TemplateRefresh {
    Never = 0,
    OnDashboardLoad = 1,
    OnTimeRangeChange = 2,
}

/// A dashboard variable, rendered as a dropdown and substituted into queries.
#[derive(Clone, Debug, PartialEq)]
pub struct Template {
    pub(crate) name: String,
    label: String,
    pub(crate) template_type: TemplateType,
    pub(crate) datasource: Option<String>,
    pub(crate) query: String,
    regex: String,
    refresh: TemplateRefresh,
    include_all: bool,
    multi: bool,
    default: Option<String>,
}

impl Template {
    fn new(
        name: impl ToString,
        label: impl ToString,
        template_type: TemplateType,
        datasource: Option<String>,
        query: impl ToString,
    ) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            template_type,
            datasource,
            query: query.to_string(),
            regex: String::new(),
            refresh: TemplateRefresh::OnDashboardLoad,
            include_all: false,
            multi: false,
            default: None,
        }
    }

    /// A datasource picker restricted to datasources of the `plugin` type.
    pub fn datasource(name: impl ToString, label: impl ToString, plugin: impl ToString) -> Self {
        Self::new(name, label, TemplateType::Datasource, None, plugin).with_regex("/.*/")
    }

    /// A variable whose values come from a query against the dashboard datasource.
    pub fn query(name: impl ToString, label: impl ToString, query: impl ToString) -> Self {
        Self::new(name, label, TemplateType::Query, Some(DATASOURCE_VARIABLE.to_string()), query)
    }

    /// A fixed value, usually an alert threshold shared by several queries.
    pub fn constant(name: impl ToString, label: impl ToString, value: impl ToString) -> Self {
        let value = value.to_string();
        Self::new(name, label, TemplateType::Constant, None, &value).with_default(value)
    }

    /// A time interval picker, e.g. for the range of `rate` queries.
    pub fn interval(
        name: impl ToString,
        label: impl ToString,
        values: &[&str],
        default: impl ToString,
    ) -> Self {
        Self::new(name, label, TemplateType::Interval, None, values.join(",")).with_default(default)
    }

    /// A picker over a fixed list of values.
    pub fn custom(
        name: impl ToString,
        label: impl ToString,
        values: &[&str],
        default: impl ToString,
    ) -> Self {
        Self::new(name, label, TemplateType::Custom, None, values.join(",")).with_default(default)
    }

    pub fn with_refresh(mut self, refresh: TemplateRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_regex(mut self, regex: impl ToString) -> Self {
        self.regex = regex.to_string();
        self
    }

    pub fn with_include_all(mut self) -> Self {
        self.include_all = true;
        self
    }

    pub fn with_multi(mut self) -> Self {
        self.multi = true;
        self
    }

    pub fn with_default(mut self, default: impl ToString) -> Self {
        self.default = Some(default.to_string());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn template_type(&self) -> TemplateType {
        self.template_type
    }

    pub fn refresh(&self) -> TemplateRefresh {
        self.refresh
    }

    fn has_listed_values(&self) -> bool {
        matches!(self.template_type, TemplateType::Interval | TemplateType::Custom)
    }

    fn options(&self) -> Vec<serde_json::Value> {
        if !self.has_listed_values() {
            return vec![];
        }
        self.query
            .split(',')
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                let selected = self.default.as_deref() == Some(value);
                json!({"selected": selected, "text": value, "value": value})
            })
            .collect()
    }

    fn current(&self) -> serde_json::Value {
        match &self.default {
            Some(default) => json!({"selected": true, "text": default, "value": default}),
            None => json!({}),
        }
    }
}

impl Serialize for Template {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("type", &self.template_type)?;
        map.serialize_entry("datasource", &self.datasource)?;
        map.serialize_entry("query", &self.query)?;
        map.serialize_entry("regex", &self.regex)?;
        map.serialize_entry("refresh", &self.refresh)?;
        map.serialize_entry("includeAll", &self.include_all)?;
        map.serialize_entry("allValue", &None::<String>)?;
        map.serialize_entry("multi", &self.multi)?;
        map.serialize_entry("current", &self.current())?;
        map.serialize_entry("options", &self.options())?;
        map.serialize_entry("hide", &0)?;
        map.serialize_entry("sort", &0)?;
        if self.template_type == TemplateType::Interval {
            map.serialize_entry("auto", &false)?;
            map.serialize_entry("auto_count", &30)?;
            map.serialize_entry("auto_min", "10s")?;
        }
        map.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Templating {
    list: Vec<Template>,
}

impl Templating {
    pub fn new(list: Vec<Template>) -> Self {
        Self { list }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.list.iter().find(|template| template.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.list.iter()
    }
}
