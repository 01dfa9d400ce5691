//! Resolver configuration merging.
//!
//! Applies case-specific overrides to the base resolver configuration.

use anyhow::Result;
use tspath::io::config::TspathConfig;

use crate::case::CaseConfig;

/// Apply case configuration overrides to the base resolver config.
pub fn apply_case_config(mut base: TspathConfig, overrides: &CaseConfig) -> Result<TspathConfig> {
    if let Some(origin) = overrides.origin {
        base.origin = origin;
    }
    if let Some(sentinel) = overrides.sentinel {
        base.sentinel = sentinel;
    }
    if let Some(equivalence) = &overrides.equivalence {
        base.equivalence = equivalence.clone();
    }
    base.validate()?;
    Ok(base)
}
