//! Case file parsing and validation.
//!
//! Cases are TOML files pairing a logical form with the gold-standard path it
//! should resolve to. See `eval/cases/` for examples.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use tspath::core::cadence::LogicalForm;
use tspath::core::coordinate::Coordinate;
use tspath::core::notation::parse_form;
use tspath::core::path::TonalPath;
use tspath::io::config::{EquivalenceConfig, TspathConfig};

use crate::config::apply_case_config;

/// A parsed case file containing form, gold path, config, and checks.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CaseFile {
    pub case: CaseMeta,
    #[serde(default)]
    pub config: CaseConfig,
    #[serde(default)]
    pub checks: Vec<Check>,
}

/// Case metadata: identifier, input form and expected path.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CaseMeta {
    /// Unique identifier (slug format: `[a-z0-9_-]+`).
    pub id: String,
    /// Logical form in notation, e.g. `[leftonto(<0,0>), <0,0>]`.
    pub form: String,
    /// Gold-standard path as `[[x, y], ...]`.
    pub gold: TonalPath,
}

/// Resolver configuration overrides for the case.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct CaseConfig {
    pub origin: Option<Coordinate>,
    pub sentinel: Option<Coordinate>,
    pub equivalence: Option<EquivalenceConfig>,
}

/// Extra verification applied to the resolved path.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Check {
    /// The path equals the gold path point for point.
    ExactPath,
    /// The step F-score against gold is at least `threshold`.
    MinFScore { threshold: f64 },
    /// The step edit distance against gold is at most `max`.
    MaxEditDistance { max: usize },
}

impl CaseFile {
    /// Load and validate a case file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("read case {}", path.display()))?;
        let case: CaseFile =
            toml::from_str(&contents).with_context(|| format!("parse case {}", path.display()))?;
        case.validate()
            .with_context(|| format!("validate case {}", path.display()))?;
        Ok(case)
    }

    #[cfg(test)]
    pub fn parse_str(contents: &str) -> Result<Self> {
        let case: CaseFile = toml::from_str(contents).context("parse case")?;
        case.validate()?;
        Ok(case)
    }

    /// The case's logical form, parsed from notation.
    pub fn logical_form(&self) -> Result<LogicalForm> {
        parse_form(&self.case.form).with_context(|| format!("parse case.form '{}'", self.case.form))
    }

    fn validate(&self) -> Result<()> {
        validate_case_id(&self.case.id)?;
        if self.case.form.trim().is_empty() {
            bail!("case.form must be non-empty");
        }
        self.logical_form()?;
        apply_case_config(TspathConfig::default(), &self.config).context("config invalid")?;
        for (index, check) in self.checks.iter().enumerate() {
            check
                .validate()
                .with_context(|| format!("checks[{}] invalid", index))?;
        }
        Ok(())
    }
}

impl Check {
    fn validate(&self) -> Result<()> {
        match self {
            Check::MinFScore { threshold } => {
                if !(0.0..=1.0).contains(threshold) {
                    bail!("min_f_score.threshold must be within [0, 1]");
                }
            }
            Check::ExactPath | Check::MaxEditDistance { .. } => {}
        }
        Ok(())
    }
}

/// Discover and load all case files from a directory.
///
/// Returns each case with the file it was loaded from, sorted by id. Errors
/// if duplicate ids are found.
pub fn discover_cases(dir: &Path) -> Result<Vec<(PathBuf, CaseFile)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let mut cases = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read cases dir {}", dir.display()))? {
        let entry = entry.context("read case entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            continue;
        }
        let case = CaseFile::load(&path)?;
        cases.push((path, case));
    }
    cases.sort_by(|(_, left), (_, right)| left.case.id.cmp(&right.case.id));
    for pair in cases.windows(2) {
        if pair[0].1.case.id == pair[1].1.case.id {
            return Err(anyhow!("duplicate case.id {}", pair[0].1.case.id));
        }
    }
    Ok(cases)
}

pub fn validate_case_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        bail!("case.id must be non-empty");
    }
    if id.contains('/') || id.contains('\\') {
        bail!("case.id must not contain path separators");
    }
    if id.contains("..") {
        bail!("case.id must not contain '..'");
    }
    if !id
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
    {
        bail!("case.id must use [a-z0-9_-] only");
    }
    Ok(())
}
