use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::judge::Judgment;
use crate::outcome::Outcome;
use crate::results::EvalMeta;

#[derive(Debug, Default)]
pub struct ReportSummary {
    pub runs: usize,
    pub exact: usize,
    pub partial: usize,
    pub error: usize,
    /// Mean step F-score over runs that resolved.
    pub mean_f_score: Option<f64>,
    pub avg_duration_secs: Option<f64>,
    pub check_pass_rates: BTreeMap<String, (usize, usize)>,
}

pub fn load_run_dirs(case_results_dir: &Path) -> Result<Vec<PathBuf>> {
    if !case_results_dir.exists() {
        return Ok(Vec::new());
    }
    let mut dirs = Vec::new();
    for entry in fs::read_dir(case_results_dir)
        .with_context(|| format!("read {}", case_results_dir.display()))?
    {
        let entry = entry.context("read entry")?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

pub fn aggregate(case_results_dir: &Path) -> Result<(ReportSummary, Vec<String>)> {
    let mut summary = ReportSummary::default();
    let mut warnings = Vec::new();
    let mut f_scores = Vec::new();

    for run_dir in load_run_dirs(case_results_dir)? {
        let meta_path = run_dir.join("meta.json");
        let checks_path = run_dir.join("checks.json");

        let meta: EvalMeta = match fs::read_to_string(&meta_path)
            .with_context(|| format!("read {}", meta_path.display()))
            .and_then(|contents| serde_json::from_str(&contents).context("parse meta"))
        {
            Ok(meta) => meta,
            Err(err) => {
                warnings.push(format!(
                    "skip {}: meta.json invalid ({err})",
                    run_dir.display()
                ));
                continue;
            }
        };

        let judgment: Judgment = match fs::read_to_string(&checks_path)
            .with_context(|| format!("read {}", checks_path.display()))
            .and_then(|contents| serde_json::from_str(&contents).context("parse checks"))
        {
            Ok(checks) => checks,
            Err(err) => {
                warnings.push(format!(
                    "skip {}: checks.json invalid ({err})",
                    run_dir.display()
                ));
                continue;
            }
        };

        summary.runs += 1;
        match meta.outcome {
            Some(Outcome::Exact) => summary.exact += 1,
            Some(Outcome::Partial) => summary.partial += 1,
            Some(Outcome::Error) | None => summary.error += 1,
        }

        summary.avg_duration_secs = Some(match summary.avg_duration_secs {
            None => meta.duration_secs,
            Some(avg) => {
                let total = avg * (summary.runs as f64 - 1.0) + meta.duration_secs;
                total / summary.runs as f64
            }
        });

        if let Some(score) = &judgment.score {
            f_scores.push(score.f_score);
        }
        update_check_pass_rates(&mut summary.check_pass_rates, &judgment);
    }

    if !f_scores.is_empty() {
        summary.mean_f_score = Some(f_scores.iter().sum::<f64>() / f_scores.len() as f64);
    }

    Ok((summary, warnings))
}

fn update_check_pass_rates(stats: &mut BTreeMap<String, (usize, usize)>, judgment: &Judgment) {
    for check in &judgment.checks {
        let entry = stats.entry(check.label()).or_insert((0, 0));
        if check.passed() {
            entry.0 += 1;
        }
        entry.1 += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::CheckOutcome;
    use tempfile::tempdir;
    use tspath::core::distance::{Alignment, PathScore};

    fn write_meta(path: &Path, outcome: Outcome, duration: f64) {
        let meta = EvalMeta {
            case_id: "case".to_string(),
            eval_run_id: "run".to_string(),
            case_hash: "hash".to_string(),
            git_sha: None,
            tspath_version: "0.1.0".to_string(),
            form: "<0,0>".to_string(),
            outcome: Some(outcome),
            resolve_error: None,
            start_time: "now".to_string(),
            end_time: "later".to_string(),
            duration_secs: duration,
            errors: Vec::new(),
        };
        let contents = serde_json::to_string_pretty(&meta).expect("meta json");
        fs::write(path, format!("{contents}\n")).expect("write meta");
    }

    fn write_checks(path: &Path, f_score: Option<f64>, passed: bool) {
        let judgment = Judgment {
            score: f_score.map(|f_score| PathScore {
                precision: f_score,
                recall: f_score,
                f_score,
                alignment: Alignment::default(),
            }),
            edit_distance: f_score.map(|_| 0),
            checks: vec![CheckOutcome::ExactPath { passed }],
        };
        let contents = serde_json::to_string_pretty(&judgment).expect("checks json");
        fs::write(path, format!("{contents}\n")).expect("write checks");
    }

    #[test]
    fn aggregates_runs() {
        let temp = tempdir().expect("tempdir");
        let runs = [
            ("run1", Outcome::Exact, 1.0, Some(1.0), true),
            ("run2", Outcome::Partial, 3.0, Some(0.5), false),
            ("run3", Outcome::Error, 2.0, None, false),
        ];
        for (name, outcome, duration, f_score, passed) in runs {
            let dir = temp.path().join(name);
            fs::create_dir_all(&dir).expect("run dir");
            write_meta(&dir.join("meta.json"), outcome, duration);
            write_checks(&dir.join("checks.json"), f_score, passed);
        }

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert!(warnings.is_empty());
        assert_eq!(summary.runs, 3);
        assert_eq!((summary.exact, summary.partial, summary.error), (1, 1, 1));
        assert_eq!(summary.mean_f_score, Some(0.75));
        assert_eq!(summary.avg_duration_secs, Some(2.0));
        assert_eq!(
            summary.check_pass_rates.get("exact_path"),
            Some(&(1, 3))
        );
    }

    #[test]
    fn skips_runs_with_missing_checks() {
        let temp = tempdir().expect("tempdir");
        let dir = temp.path().join("run1");
        fs::create_dir_all(&dir).expect("run dir");
        write_meta(&dir.join("meta.json"), Outcome::Exact, 1.0);

        let (summary, warnings) = aggregate(temp.path()).expect("aggregate");
        assert_eq!(summary.runs, 0);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("checks.json invalid"));
    }
}
