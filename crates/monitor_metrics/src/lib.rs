pub mod metric_definitions;
pub mod metrics;

pub mod go_runtime;
pub mod mysql;
pub mod redis;
pub mod system;


// Its being exported here to be used in define_metrics macro.
pub use paste;

pub use crate::metrics::{LabelMatcher, MetricCommon};
