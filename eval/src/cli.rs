//! CLI command implementations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::case::{CaseFile, discover_cases, validate_case_id};
use crate::report::aggregate;
use crate::run::run_case;

fn cases_dir(repo_root: &Path) -> PathBuf {
    repo_root.join("eval").join("cases")
}

fn results_dir(repo_root: &Path) -> PathBuf {
    repo_root.join("eval").join("results")
}

/// List all available cases.
pub fn list_cases(repo_root: &Path) -> Result<()> {
    let cases = discover_cases(&cases_dir(repo_root))?;
    for (_, case) in cases {
        println!("{}\t{}", case.case.id, case.case.form);
    }
    Ok(())
}

/// Run one case by id, or every case when `case_id` is `None`.
pub fn run_cases(repo_root: &Path, case_id: Option<&str>, runs: u32) -> Result<()> {
    let selected: Vec<(PathBuf, CaseFile)> = match case_id {
        Some(case_id) => {
            validate_case_id(case_id)?;
            let case_path = cases_dir(repo_root).join(format!("{case_id}.toml"));
            if !case_path.exists() {
                bail!("case {} not found at {}", case_id, case_path.display());
            }
            let case = CaseFile::load(&case_path).context("load case")?;
            vec![(case_path, case)]
        }
        None => discover_cases(&cases_dir(repo_root))?,
    };
    if selected.is_empty() {
        bail!("no cases found in {}", cases_dir(repo_root).display());
    }

    info!(cases = selected.len(), runs, "starting runs");
    for (case_path, case) in &selected {
        for run_num in 1..=runs {
            debug!(case_id = %case.case.id, run_num, runs, "starting run");
            let outcome = run_case(repo_root, case_path, case).context("run case")?;
            println!(
                "run: case={} eval_run_id={} outcome={:?} results={}",
                case.case.id,
                outcome.eval_run_id,
                outcome.outcome,
                outcome.results_dir.display()
            );
        }
    }
    Ok(())
}

/// Show aggregated results for a case.
pub fn report_case(repo_root: &Path, case_id: &str) -> Result<()> {
    validate_case_id(case_id)?;
    let (summary, warnings) = aggregate(&results_dir(repo_root).join(case_id))?;
    println!("report: case={} runs={}", case_id, summary.runs);
    println!(
        "report: exact={} partial={} error={}",
        summary.exact, summary.partial, summary.error
    );
    if let Some(mean) = summary.mean_f_score {
        println!("report: mean_f_score={:.3}", mean);
    }
    if let Some(avg) = summary.avg_duration_secs {
        println!("report: avg_duration_secs={:.3}", avg);
    }
    for (label, (passed, total)) in summary.check_pass_rates {
        println!("report: check {} {}/{}", label, passed, total);
    }
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
    Ok(())
}

/// Remove captured results for a case.
pub fn clean_case(repo_root: &Path, case_id: &str) -> Result<()> {
    validate_case_id(case_id)?;
    let case_results = results_dir(repo_root).join(case_id);
    if case_results.exists() {
        std::fs::remove_dir_all(&case_results)
            .with_context(|| format!("remove {}", case_results.display()))?;
    }
    println!("clean: case={} results={}", case_id, case_results.display());
    Ok(())
}
