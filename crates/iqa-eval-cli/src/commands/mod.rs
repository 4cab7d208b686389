//! CLI subcommand implementations.

pub mod assess;
pub mod batch;
pub mod metrics;

use std::path::Path;
use std::sync::Arc;

use iqa_eval::PerformanceMonitor;

/// Print a value as pretty JSON to stdout or to a file.
pub fn emit_json<T: serde::Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Print the monitor snapshot to stderr.
pub fn print_timings(monitor: &Arc<PerformanceMonitor>) -> anyhow::Result<()> {
    let snapshot = monitor.snapshot();
    eprintln!("--- timings ---");
    eprintln!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
