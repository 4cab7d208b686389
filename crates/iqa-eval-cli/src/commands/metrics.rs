//! `metrics` subcommand: catalog listing and score interpretation.

use iqa_eval::{list_metrics, metric_info};

use super::emit_json;

pub fn list() -> anyhow::Result<()> {
    emit_json(&list_metrics(), None)
}

pub fn interpret(name: &str, score: Option<f64>) -> anyhow::Result<()> {
    let info = metric_info(name, score)?;
    emit_json(&info, None)
}
