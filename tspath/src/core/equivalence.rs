//! Equivalence-shift policies used when stitching cadence paths together.
//!
//! A policy picks, among the representations of a path that are equivalent
//! under some lattice translation, the one whose final point lies nearest a
//! target anchor. The whole path moves rigidly by the chosen translation.

use serde::{Deserialize, Serialize};

use crate::core::coordinate::Coordinate;
use crate::core::path::TonalPath;

/// Chooses the translation that moves a path next to an anchor.
pub trait EquivalencePolicy<const N: usize>: Sync {
    /// Translation taking `end` to its equivalent point nearest `anchor`.
    fn shift(&self, end: Coordinate<N>, anchor: Coordinate<N>) -> Coordinate<N>;

    /// `path` translated so that its final point is the equivalent point
    /// nearest `anchor`. Empty paths are returned unchanged.
    fn nearest_to(&self, path: &TonalPath<N>, anchor: Coordinate<N>) -> TonalPath<N> {
        match path.last() {
            Some(end) => path.shifted(self.shift(*end, anchor)),
            None => path.clone(),
        }
    }
}

impl<const N: usize, P: EquivalencePolicy<N> + ?Sized> EquivalencePolicy<N> for Box<P> {
    fn shift(&self, end: Coordinate<N>, anchor: Coordinate<N>) -> Coordinate<N> {
        (**self).shift(end, anchor)
    }
}

/// Every point is only equivalent to itself; paths are never moved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<const N: usize> EquivalencePolicy<N> for Identity {
    fn shift(&self, _end: Coordinate<N>, _anchor: Coordinate<N>) -> Coordinate<N> {
        Coordinate::origin()
    }
}

/// Distance between lattice points.
///
/// Every metric is at least the Chebyshev distance, which bounds the
/// nearest-point search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Manhattan,
    Chebyshev,
    SquaredEuclidean,
}

impl Metric {
    pub fn distance<const N: usize>(self, a: &Coordinate<N>, b: &Coordinate<N>) -> u64 {
        let gaps = a
            .values()
            .iter()
            .zip(b.values().iter())
            .map(|(p, q)| p.abs_diff(*q));
        match self {
            Metric::Manhattan => gaps.fold(0, u64::saturating_add),
            Metric::Chebyshev => gaps.max().unwrap_or(0),
            Metric::SquaredEuclidean => gaps
                .map(|gap| gap.saturating_mul(gap))
                .fold(0, u64::saturating_add),
        }
    }
}

/// Points are equivalent when their weighted component sums agree modulo
/// `modulus`, e.g. when they denote the same equal-tempered pitch class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PitchClassEquivalence<const N: usize = 2> {
    weights: [i64; N],
    modulus: i64,
    metric: Metric,
}

/// Largest supported modulus (cent resolution of the octave). The nearest
/// member search visits up to `(2 * modulus + 1)^N` points.
pub const MAX_MODULUS: i64 = 1200;

impl<const N: usize> PitchClassEquivalence<N> {
    /// `None` unless `modulus` lies in `1..=MAX_MODULUS`.
    pub fn new(weights: [i64; N], modulus: i64, metric: Metric) -> Option<Self> {
        (1..=MAX_MODULUS).contains(&modulus).then_some(Self {
            weights,
            modulus,
            metric,
        })
    }

    /// Class of `point`, in `0..modulus`.
    pub fn class_of(&self, point: &Coordinate<N>) -> i64 {
        let modulus = i128::from(self.modulus);
        let class = point
            .values()
            .iter()
            .zip(self.weights.iter())
            .map(|(value, weight)| (i128::from(*value) * i128::from(*weight)).rem_euclid(modulus))
            .fold(0, |sum, term| (sum + term) % modulus);
        // Below `modulus`, which is an i64.
        class as i64
    }

    /// The member of `class` nearest `anchor`.
    ///
    /// Scans Chebyshev shells around `anchor` in lexicographic order, so ties
    /// go to the smaller shell and then the lexicographically smaller offset.
    pub fn nearest_member(&self, class: i64, anchor: Coordinate<N>) -> Option<Coordinate<N>> {
        let class = class.rem_euclid(self.modulus);
        let mut best: Option<(u64, Coordinate<N>)> = None;
        // Each class recurs every `modulus` steps along every axis, so a
        // member lies within this radius of any anchor.
        let max_radius = self.modulus;
        for radius in 0..=max_radius {
            if let Some((distance, _)) = best
                && distance <= radius.unsigned_abs()
            {
                break;
            }
            for offset in shell::<N>(radius) {
                let candidate = anchor + offset;
                if self.class_of(&candidate) != class {
                    continue;
                }
                let distance = self.metric.distance(&candidate, &anchor);
                if best.is_none_or(|(current, _)| distance < current) {
                    best = Some((distance, candidate));
                }
            }
        }
        best.map(|(_, point)| point)
    }
}

impl PitchClassEquivalence<2> {
    /// Twelve-tone equal temperament on the 2-D space: a step right is a
    /// fifth (7 semitones), a step up a major third (4 semitones).
    pub fn equal_temperament(metric: Metric) -> Self {
        Self {
            weights: [7, 4],
            modulus: 12,
            metric,
        }
    }
}

impl<const N: usize> EquivalencePolicy<N> for PitchClassEquivalence<N> {
    fn shift(&self, end: Coordinate<N>, anchor: Coordinate<N>) -> Coordinate<N> {
        match self.nearest_member(self.class_of(&end), anchor) {
            Some(target) => target - end,
            None => Coordinate::origin(),
        }
    }
}

/// Offsets whose largest absolute component is exactly `radius`, in
/// lexicographic order.
fn shell<const N: usize>(radius: i64) -> Vec<Coordinate<N>> {
    let mut offsets = Vec::new();
    let mut offset = [-radius; N];
    loop {
        if N == 0 || offset.iter().any(|value| value.abs() == radius) {
            offsets.push(Coordinate::new(offset));
        }
        let mut axis = N;
        loop {
            if axis == 0 {
                return offsets;
            }
            axis -= 1;
            if offset[axis] < radius {
                offset[axis] += 1;
                break;
            }
            offset[axis] = -radius;
        }
    }
}
