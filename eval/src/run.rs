//! Case execution orchestration.
//!
//! Resolves the case form with the case's resolver config, judges the path
//! against gold, and captures the results.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};
use tspath::analyze::{FormSource, stitch_source};
use tspath::core::path::TonalPath;
use tspath::io::config::TspathConfig;

use crate::case::CaseFile;
use crate::config::apply_case_config;
use crate::judge::{judge, write_judgment};
use crate::outcome::{Outcome, classify_outcome};
use crate::results::{CaptureInput, capture_results, update_outcome};

/// Result of running a single case.
#[derive(Debug)]
pub struct RunOutcome {
    /// Unique identifier for this eval run.
    pub eval_run_id: String,
    /// Path to the results directory.
    pub results_dir: PathBuf,
    /// Classified outcome.
    pub outcome: Outcome,
}

/// Run a case end-to-end: resolution, checks, result capture.
#[instrument(skip_all, fields(case_id = %case.case.id))]
pub fn run_case(repo_root: &Path, case_path: &Path, case: &CaseFile) -> Result<RunOutcome> {
    info!("case run started");

    let cfg = apply_case_config(TspathConfig::default(), &case.config)?;
    let started_at = Utc::now();
    let eval_run_id = eval_run_id(started_at);

    debug!("resolving form");
    let resolved = resolve_case(&cfg, case);
    let finished_at = Utc::now();
    match &resolved {
        Ok(path) => info!(steps = path.len(), "form resolved"),
        Err(err) => info!(error = %format!("{err:#}"), "form failed to resolve"),
    }

    debug!("capturing results");
    let capture_input = CaptureInput {
        case_id: &case.case.id,
        case_path,
        eval_run_id: &eval_run_id,
        form: &case.case.form,
        config: &cfg,
        resolved: resolved.as_ref().map_err(|err| format!("{err:#}")),
        started_at,
        finished_at,
        repo_root,
    };
    let results_dir = capture_results(&repo_root.join("eval").join("results"), &capture_input)
        .context("capture results")?;

    debug!("running checks");
    let path = resolved.as_ref().ok();
    let judgment = judge(path, &case.case.gold, &case.checks);
    write_judgment(&results_dir.join("checks.json"), &judgment).context("write checks")?;

    let outcome = classify_outcome(path, &case.case.gold);
    update_outcome(&results_dir, outcome).context("update outcome")?;

    info!(outcome = ?outcome, results_dir = %results_dir.display(), "case run complete");

    Ok(RunOutcome {
        eval_run_id,
        results_dir,
        outcome,
    })
}

fn resolve_case(cfg: &TspathConfig, case: &CaseFile) -> Result<TonalPath> {
    stitch_source(cfg, FormSource::Notation(&case.case.form))
}

/// Second-resolution timestamps collide across `--runs`, so a random suffix
/// keeps ids unique.
fn eval_run_id(started_at: DateTime<Utc>) -> String {
    format!(
        "eval-{}-{:04x}",
        started_at.format("%Y%m%d_%H%M%S"),
        rand::random::<u16>()
    )
}
