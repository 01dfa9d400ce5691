//! Path scoring and check evaluation.
//!
//! Compares a resolved path with the case's gold path and records the
//! metrics and the outcome of every configured check.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use tspath::core::distance::{PathScore, edit_distance, score, steps};
use tspath::core::path::TonalPath;

use crate::case::Check;

/// Metrics and check outcomes for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    /// `None` when the form failed to resolve.
    pub score: Option<PathScore>,
    pub edit_distance: Option<usize>,
    pub checks: Vec<CheckOutcome>,
}

/// Result of running a single check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CheckOutcome {
    ExactPath {
        passed: bool,
    },
    MinFScore {
        threshold: f64,
        f_score: Option<f64>,
        passed: bool,
    },
    MaxEditDistance {
        max: usize,
        distance: Option<usize>,
        passed: bool,
    },
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        match self {
            CheckOutcome::ExactPath { passed }
            | CheckOutcome::MinFScore { passed, .. }
            | CheckOutcome::MaxEditDistance { passed, .. } => *passed,
        }
    }

    pub fn label(&self) -> String {
        match self {
            CheckOutcome::ExactPath { .. } => "exact_path".to_string(),
            CheckOutcome::MinFScore { threshold, .. } => format!("min_f_score({threshold})"),
            CheckOutcome::MaxEditDistance { max, .. } => format!("max_edit_distance({max})"),
        }
    }
}

/// Score `resolved` against `gold` and run all checks.
#[instrument(skip_all, fields(check_count = checks.len()))]
pub fn judge(resolved: Option<&TonalPath>, gold: &TonalPath, checks: &[Check]) -> Judgment {
    let score = resolved.map(|path| score(path, gold));
    let edit_distance = resolved.map(|path| edit_distance(&steps(path), &steps(gold)));

    let mut outcomes = Vec::with_capacity(checks.len());
    for check in checks {
        let outcome = match check {
            Check::ExactPath => CheckOutcome::ExactPath {
                passed: resolved == Some(gold),
            },
            Check::MinFScore { threshold } => {
                let f_score = score.map(|score| score.f_score);
                CheckOutcome::MinFScore {
                    threshold: *threshold,
                    f_score,
                    passed: f_score.is_some_and(|f| f >= *threshold),
                }
            }
            Check::MaxEditDistance { max } => CheckOutcome::MaxEditDistance {
                max: *max,
                distance: edit_distance,
                passed: edit_distance.is_some_and(|distance| distance <= *max),
            },
        };
        debug!(check = %outcome.label(), passed = outcome.passed(), "check result");
        outcomes.push(outcome);
    }

    Judgment {
        score,
        edit_distance,
        checks: outcomes,
    }
}

pub fn write_judgment(path: &Path, judgment: &Judgment) -> Result<()> {
    let contents = serde_json::to_string_pretty(judgment).context("serialize checks")?;
    fs::write(path, format!("{contents}\n"))
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tspath::core::coordinate::Coordinate;

    fn path(points: &[(i64, i64)]) -> TonalPath {
        points
            .iter()
            .map(|(x, y)| Coordinate::new([*x, *y]))
            .collect()
    }

    fn all_checks() -> Vec<Check> {
        vec![
            Check::ExactPath,
            Check::MinFScore { threshold: 0.75 },
            Check::MaxEditDistance { max: 1 },
        ]
    }

    #[test]
    fn exact_path_passes_everything() {
        let gold = path(&[(-1, 0), (0, 0)]);
        let judgment = judge(Some(&gold), &gold, &all_checks());
        assert_eq!(judgment.edit_distance, Some(0));
        assert_eq!(judgment.score.map(|s| s.f_score), Some(1.0));
        assert!(judgment.checks.iter().all(CheckOutcome::passed));
    }

    #[test]
    fn near_miss_passes_tolerant_checks_only() {
        let gold = path(&[(0, 0), (1, 0), (2, 0)]);
        let resolved = path(&[(0, 0), (1, 0)]);
        let judgment = judge(Some(&resolved), &gold, &all_checks());
        let passed: Vec<bool> = judgment.checks.iter().map(CheckOutcome::passed).collect();
        // F-score 0.8, one missing step.
        assert_eq!(passed, vec![false, true, true]);
    }

    #[test]
    fn unresolved_form_fails_every_check() {
        let gold = path(&[(0, 0)]);
        let judgment = judge(None, &gold, &all_checks());
        assert!(judgment.score.is_none());
        assert!(judgment.checks.iter().all(|check| !check.passed()));
    }

    #[test]
    fn write_judgment_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let file = temp.path().join("checks.json");
        let gold = path(&[(0, 0)]);
        let judgment = judge(Some(&gold), &gold, &all_checks());
        write_judgment(&file, &judgment).expect("write");
        let loaded: Judgment =
            serde_json::from_str(&fs::read_to_string(&file).expect("read")).expect("parse");
        assert_eq!(loaded, judgment);
    }
}
