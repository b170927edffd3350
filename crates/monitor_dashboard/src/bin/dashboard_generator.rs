use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use monitor_dashboard::dashboard_definitions::{DashboardKind, DEFAULT_OUTPUT_DIR};
use monitor_infra_utils::dumping::{check_file_up_to_date, serialize_to_file};
use monitor_infra_utils::path::resolve_project_relative_path;
use monitor_infra_utils::tracing_utils::{configure_tracing, parse_level, DEFAULT_LEVEL};
use strum::IntoEnumIterator;
use tracing::info;

const FIX_COMMAND: &str = "cargo run --bin dashboard_generator -q";

/// Generates the Grafana dashboard and alert rule files.
#[derive(Parser, Debug)]
#[command(name = "dashboard_generator", version, about)]
struct Args {
    /// Output directory. Defaults to the resources directory of the dashboard crate.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Dashboards to generate. Defaults to all of them.
    #[arg(long = "dashboard", value_enum)]
    dashboards: Vec<DashboardKind>,

    /// Verify the existing files are up to date instead of writing them.
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Log level, e.g. `debug`. `RUST_LOG` takes precedence.
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<tracing::metadata::LevelFilter>,
}

fn parse_log_level(level: &str) -> Result<tracing::metadata::LevelFilter, String> {
    parse_level(level).ok_or_else(|| format!("Unknown log level: {level}"))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    configure_tracing(args.log_level.unwrap_or(DEFAULT_LEVEL));

    let output_dir = match args.output_dir {
        Some(output_dir) => output_dir,
        None => resolve_project_relative_path(".")
            .context("Failed resolving the project root")?
            .join(DEFAULT_OUTPUT_DIR),
    };
    let dashboards =
        if args.dashboards.is_empty() { DashboardKind::iter().collect() } else { args.dashboards };

    for kind in dashboards {
        let (dashboard, alerts) =
            kind.build().with_context(|| format!("Invalid {kind} dashboard"))?;

        let dashboard_path = output_dir.join(kind.dashboard_file_name());
        let alerts_path = output_dir.join(kind.alerts_file_name());
        if args.check {
            check_file_up_to_date(&dashboard, &dashboard_path, FIX_COMMAND)?;
            check_file_up_to_date(&alerts, &alerts_path, FIX_COMMAND)?;
            info!("{kind} dashboard is up to date.");
        } else {
            serialize_to_file(&dashboard, &dashboard_path)?;
            serialize_to_file(&alerts, &alerts_path)?;
            info!(
                "Generated {kind} dashboard with {} panels and {} alerts.",
                dashboard.panels().len(),
                alerts.len()
            );
        }
    }

    Ok(())
}
