use serde::{Deserialize, Serialize};
use tspath::core::path::TonalPath;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Resolved path equals the gold path.
    Exact,
    /// Resolved, but the path differs from gold.
    Partial,
    /// The form could not be resolved.
    Error,
}

pub fn classify_outcome(resolved: Option<&TonalPath>, gold: &TonalPath) -> Outcome {
    match resolved {
        Some(path) if path == gold => Outcome::Exact,
        Some(_) => Outcome::Partial,
        None => Outcome::Error,
    }
}
