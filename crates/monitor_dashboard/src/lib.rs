mod alert_scenarios;
pub mod alerts;
pub mod dashboard;
pub mod dashboard_definitions;
pub mod panel;
mod panels;
mod query_builder;
pub mod templating;
