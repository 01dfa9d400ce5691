//! Orchestration for `tspath resolve` and `tspath stitch`.
//!
//! Reads cadences from notation or a form file, resolves them with the
//! configured stitcher, and returns the resulting path.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use crate::core::cadence::{Cadence, LogicalForm};
use crate::core::invariants::validate_invariants;
use crate::core::notation::{parse_cadence, parse_form};
use crate::core::path::TonalPath;
use crate::core::resolve::resolve;
use crate::io::config::TspathConfig;
use crate::io::form_store::load_form;

/// Where the cadences of a `stitch` come from.
#[derive(Debug, Clone, Copy)]
pub enum FormSource<'a> {
    Notation(&'a str),
    File(&'a Path),
}

/// Resolve one cadence given in notation, without equivalence shifting.
pub fn resolve_notation(cfg: &TspathConfig, text: &str) -> Result<TonalPath> {
    let cadence: Cadence = parse_cadence(text).with_context(|| format!("parse cadence '{text}'"))?;
    debug!(nodes = cadence.size(), "parsed cadence");
    let path = resolve(&cadence, cfg.sentinel).context("resolve cadence")?;
    Ok(path)
}

/// Load the logical form named by `source`.
pub fn load_source(source: FormSource<'_>) -> Result<LogicalForm> {
    match source {
        FormSource::Notation(text) => {
            let form: LogicalForm = parse_form(text).with_context(|| format!("parse form '{text}'"))?;
            let errors = validate_invariants(&form);
            if !errors.is_empty() {
                bail!("invariant violations:\n- {}", errors.join("\n- "));
            }
            Ok(form)
        }
        FormSource::File(path) => load_form(path),
    }
}

/// Resolve and stitch every cadence of `form` under the configured policy.
pub fn stitch_form(cfg: &TspathConfig, form: &LogicalForm) -> Result<TonalPath> {
    let stitcher = cfg.stitcher().context("build stitcher")?;
    let path = stitcher
        .stitch(&form.cadences)
        .context("stitch logical form")?;
    info!(
        cadences = form.cadences.len(),
        points = path.len(),
        "stitched logical form"
    );
    Ok(path)
}

/// Load `source` and stitch it.
pub fn stitch_source(cfg: &TspathConfig, source: FormSource<'_>) -> Result<TonalPath> {
    let form = load_source(source)?;
    stitch_form(cfg, &form)
}
