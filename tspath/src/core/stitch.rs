//! Stitching the paths of successive cadences into one trajectory.
//!
//! Each cadence is resolved independently; the joins are then made right to
//! left, shifting every cadence's path to the equivalent representation whose
//! end lies nearest the start of everything that follows it.

use rayon::prelude::*;
use tracing::debug;

use crate::core::cadence::Cadence;
use crate::core::coordinate::Coordinate;
use crate::core::equivalence::{EquivalencePolicy, Identity};
use crate::core::error::ResolveError;
use crate::core::path::TonalPath;
use crate::core::resolve::resolve;

/// Resolve and stitch `forms` with no equivalence shifting, anchoring the
/// last cadence at the origin.
pub fn stitch<const N: usize>(forms: &[Cadence<N>]) -> Result<TonalPath<N>, ResolveError> {
    Stitcher::new(Identity).stitch(forms)
}

/// Stitches logical forms under an equivalence policy.
#[derive(Clone, Debug)]
pub struct Stitcher<const N: usize, P> {
    policy: P,
    origin: Coordinate<N>,
    sentinel: Coordinate<N>,
}

impl<const N: usize, P: EquivalencePolicy<N>> Stitcher<N, P> {
    pub fn new(policy: P) -> Self {
        Self {
            policy,
            origin: Coordinate::origin(),
            sentinel: Coordinate::origin(),
        }
    }

    /// Anchor for the final cadence.
    pub fn with_origin(mut self, origin: Coordinate<N>) -> Self {
        self.origin = origin;
        self
    }

    /// Fallback resolution for placeholders outside any coordination.
    pub fn with_sentinel(mut self, sentinel: Coordinate<N>) -> Self {
        self.sentinel = sentinel;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Resolve every cadence of `forms` independently, in order.
    ///
    /// On failure, the error of the lowest failing cadence is returned.
    pub fn cadence_paths(&self, forms: &[Cadence<N>]) -> Result<Vec<TonalPath<N>>, ResolveError> {
        let results: Vec<Result<TonalPath<N>, ResolveError>> = forms
            .par_iter()
            .enumerate()
            .map(|(index, cadence)| {
                resolve(cadence, self.sentinel).map_err(|err| err.within(format!("cadence[{index}]")))
            })
            .collect();
        results.into_iter().collect()
    }

    pub fn stitch(&self, forms: &[Cadence<N>]) -> Result<TonalPath<N>, ResolveError> {
        if !self.origin.in_range() {
            return Err(ResolveError::out_of_range(self.origin).within("origin"));
        }
        let paths = self.cadence_paths(forms)?;
        Ok(self.join(&paths))
    }

    /// Join already resolved cadence paths, last to first.
    pub fn join(&self, paths: &[TonalPath<N>]) -> TonalPath<N> {
        let mut segments = Vec::with_capacity(paths.len());
        let mut anchor = self.origin;
        for (index, path) in paths.iter().enumerate().rev() {
            let shifted = self.policy.nearest_to(path, anchor);
            debug!(cadence = index, %anchor, len = shifted.len(), "joined cadence path");
            if let Some(first) = shifted.first() {
                anchor = *first;
            }
            segments.push(shifted);
        }
        segments.into_iter().rev().flatten().collect()
    }
}
