pub(crate) mod mysql;
pub(crate) mod redis;
pub(crate) mod system_metrics;
