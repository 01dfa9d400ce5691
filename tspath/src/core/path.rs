//! Ordered sequences of tonal-space points.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::core::coordinate::Coordinate;

/// A path through the tonal space, earliest harmonic event first.
///
/// Paths produced by resolution are never empty; only stitching an empty
/// logical form yields an empty path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonalPath<const N: usize = 2>(Vec<Coordinate<N>>);

impl<const N: usize> TonalPath<N> {
    pub fn new(points: Vec<Coordinate<N>>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn points(&self) -> &[Coordinate<N>] {
        &self.0
    }

    pub fn into_points(self) -> Vec<Coordinate<N>> {
        self.0
    }

    /// Copy of this path with every point translated by `offset`.
    pub fn shifted(&self, offset: Coordinate<N>) -> Self {
        if offset == Coordinate::origin() {
            return self.clone();
        }
        Self(self.0.iter().map(|point| *point + offset).collect())
    }
}

impl<const N: usize> Deref for TonalPath<N> {
    type Target = [Coordinate<N>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> From<Vec<Coordinate<N>>> for TonalPath<N> {
    fn from(points: Vec<Coordinate<N>>) -> Self {
        Self(points)
    }
}

impl<const N: usize> FromIterator<Coordinate<N>> for TonalPath<N> {
    fn from_iter<I: IntoIterator<Item = Coordinate<N>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> IntoIterator for TonalPath<N> {
    type Item = Coordinate<N>;
    type IntoIter = std::vec::IntoIter<Coordinate<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, const N: usize> IntoIterator for &'a TonalPath<N> {
    type Item = &'a Coordinate<N>;
    type IntoIter = std::slice::Iter<'a, Coordinate<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<const N: usize> fmt::Display for TonalPath<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, point) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{point}")?;
        }
        f.write_str("]")
    }
}
