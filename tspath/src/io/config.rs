//! Resolver configuration stored in `tspath.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::coordinate::{COORDINATE_LIMIT, Coordinate};
use crate::core::equivalence::{
    EquivalencePolicy, Identity, MAX_MODULUS, Metric, PitchClassEquivalence,
};
use crate::core::names::PathFormat;
use crate::core::stitch::Stitcher;

pub const DEFAULT_CONFIG_PATH: &str = "tspath.toml";

/// Resolver configuration (TOML).
///
/// Missing fields default to the identity policy anchored at the origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TspathConfig {
    /// Fallback resolution for `coordres` outside any coordination.
    pub sentinel: Coordinate,

    /// Anchor for the last cadence when stitching.
    pub origin: Coordinate,

    /// Rendering of output points.
    pub format: PathFormat,

    pub equivalence: EquivalenceConfig,
}

/// Which points count as the same when stitching cadence paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquivalenceConfig {
    /// Paths are never shifted.
    #[default]
    Identity,
    /// Points agree when `weights · point` agrees modulo `modulus`.
    PitchClass {
        #[serde(default = "default_weights")]
        weights: [i64; 2],
        #[serde(default = "default_modulus")]
        modulus: i64,
        #[serde(default)]
        metric: Metric,
    },
}

fn default_weights() -> [i64; 2] {
    [7, 4]
}

fn default_modulus() -> i64 {
    12
}

impl Default for TspathConfig {
    fn default() -> Self {
        Self {
            sentinel: Coordinate::origin(),
            origin: Coordinate::origin(),
            format: PathFormat::default(),
            equivalence: EquivalenceConfig::default(),
        }
    }
}

impl TspathConfig {
    pub fn validate(&self) -> Result<()> {
        if let EquivalenceConfig::PitchClass { modulus, .. } = &self.equivalence
            && !(1..=MAX_MODULUS).contains(modulus)
        {
            return Err(anyhow!(
                "equivalence.modulus must be within 1..={MAX_MODULUS}"
            ));
        }
        if !self.origin.in_range() || !self.sentinel.in_range() {
            return Err(anyhow!(
                "origin and sentinel must lie within ±{COORDINATE_LIMIT}"
            ));
        }
        Ok(())
    }

    /// A stitcher configured with this policy, origin and sentinel.
    pub fn stitcher(&self) -> Result<Stitcher<2, Box<dyn EquivalencePolicy<2>>>> {
        Ok(Stitcher::new(self.equivalence.build()?)
            .with_origin(self.origin)
            .with_sentinel(self.sentinel))
    }
}

impl EquivalenceConfig {
    pub fn build(&self) -> Result<Box<dyn EquivalencePolicy<2>>> {
        match self {
            EquivalenceConfig::Identity => Ok(Box::new(Identity)),
            EquivalenceConfig::PitchClass {
                weights,
                modulus,
                metric,
            } => {
                let policy = PitchClassEquivalence::new(*weights, *modulus, *metric)
                    .ok_or_else(|| {
                        anyhow!("equivalence.modulus must be within 1..={MAX_MODULUS}")
                    })?;
                Ok(Box::new(policy))
            }
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `TspathConfig::default()`.
pub fn load_config(path: &Path) -> Result<TspathConfig> {
    if !path.exists() {
        let cfg = TspathConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: TspathConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &TspathConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
