//! `assess` subcommand: single-image quality assessment.

use std::path::PathBuf;
use std::sync::Arc;

use iqa_eval::{AssessRequest, AssessmentSession, NativeProvider, SessionConfig};

use super::{emit_json, print_timings};

pub fn run(
    config: SessionConfig,
    image: PathBuf,
    reference: Option<PathBuf>,
    metrics: Vec<String>,
    output: Option<PathBuf>,
    timings: bool,
) -> anyhow::Result<()> {
    let session = AssessmentSession::new(config, Arc::new(NativeProvider::new()))?;

    let mut request = AssessRequest::new(image);
    if let Some(reference) = reference {
        request = request.with_reference(reference);
    }
    if !metrics.is_empty() {
        request = request.with_metrics(metrics);
    }

    let assessment = session.assess(&request)?;

    if !assessment.errors.is_empty() {
        eprintln!(
            "{} of {} metrics failed",
            assessment.errors.len(),
            assessment.errors.len() + assessment.scores.len()
        );
    }

    emit_json(&assessment, output.as_deref())?;
    if timings {
        print_timings(session.monitor())?;
    }
    Ok(())
}
