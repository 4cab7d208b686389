//! `batch` subcommand: multi-image quality assessment.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use iqa_eval::{AssessmentReport, AssessmentSession, BatchRequest, NativeProvider, SessionConfig};

use super::{emit_json, print_timings};

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: SessionConfig,
    images: Vec<PathBuf>,
    references: Vec<PathBuf>,
    metrics: Vec<String>,
    output: Option<PathBuf>,
    csv: Option<PathBuf>,
    deadline_secs: Option<u64>,
    timings: bool,
) -> anyhow::Result<()> {
    let session = AssessmentSession::new(config, Arc::new(NativeProvider::new()))?;

    let request = BatchRequest {
        image_paths: images,
        reference_paths: if references.is_empty() {
            None
        } else {
            Some(references)
        },
        metrics: if metrics.is_empty() {
            None
        } else {
            Some(metrics)
        },
    };

    let deadline = deadline_secs.map(|secs| Instant::now() + Duration::from_secs(secs));
    let items = session.assess_batch_with_deadline(&request, deadline)?;

    let failures = items.iter().filter(|item| item.is_total_failure()).count();
    eprintln!("Assessed {} images ({failures} failed outright)", items.len());

    let report = AssessmentReport::new(items);
    if let Some(path) = &csv {
        report.write_csv(path)?;
        eprintln!("Wrote {}", path.display());
    }
    match output {
        Some(path) => {
            report.write_json(&path)?;
            eprintln!("Wrote {}", path.display());
        }
        None => emit_json(&report, None)?,
    }

    if timings {
        print_timings(session.monitor())?;
    }
    Ok(())
}
