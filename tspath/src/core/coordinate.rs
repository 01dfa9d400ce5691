//! Points of the tonal-space lattice.
//!
//! A coordinate is a fixed-arity tuple of integers. The first axis counts
//! steps of a fifth ("left"/"right"), the second steps of a major third. The
//! algorithms in this crate never look past the arity, so higher-dimensional
//! spaces (e.g. with an octave axis) work unchanged.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use serde::de::{self, Deserializer};
use serde::ser::{SerializeTuple, Serializer};
use serde::{Deserialize, Serialize};

/// Largest absolute component accepted from notation, files and configs.
///
/// Resolution keeps every point within this bound, so translations between
/// points of a path never overflow.
pub const COORDINATE_LIMIT: i64 = 1_000_000;

/// A point in an `N`-dimensional tonal space. Defaults to the 2-D space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate<const N: usize = 2>([i64; N]);

impl<const N: usize> Coordinate<N> {
    pub const fn new(values: [i64; N]) -> Self {
        Self(values)
    }

    /// The zero point.
    pub const fn origin() -> Self {
        Self([0; N])
    }

    /// One step along the first axis, by `delta`.
    pub fn step(delta: i64) -> Self {
        let mut values = [0; N];
        if let Some(first) = values.first_mut() {
            *first = delta;
        }
        Self(values)
    }

    /// Offset applied by `leftonto`: `(-1, 0, ...)`.
    pub fn left_step() -> Self {
        Self::step(-1)
    }

    /// Offset applied by `rightonto`: `(+1, 0, ...)`.
    pub fn right_step() -> Self {
        Self::step(1)
    }

    pub fn values(&self) -> &[i64; N] {
        &self.0
    }

    pub fn into_values(self) -> [i64; N] {
        self.0
    }

    /// Whether every component lies within [`COORDINATE_LIMIT`].
    pub fn in_range(&self) -> bool {
        self.0
            .iter()
            .all(|value| value.unsigned_abs() <= COORDINATE_LIMIT.unsigned_abs())
    }

    /// Largest absolute component difference.
    pub fn chebyshev(&self, other: &Self) -> u64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.abs_diff(*b))
            .max()
            .unwrap_or(0)
    }
}

impl Coordinate<2> {
    pub fn x(&self) -> i64 {
        self.0[0]
    }

    pub fn y(&self) -> i64 {
        self.0[1]
    }
}

impl<const N: usize> Default for Coordinate<N> {
    fn default() -> Self {
        Self::origin()
    }
}

impl<const N: usize> From<[i64; N]> for Coordinate<N> {
    fn from(values: [i64; N]) -> Self {
        Self(values)
    }
}

impl<const N: usize> Add for Coordinate<N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const N: usize> Sub for Coordinate<N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const N: usize> Neg for Coordinate<N> {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.map(|value| -value))
    }
}

impl<const N: usize> fmt::Display for Coordinate<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (index, value) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

// Serialized as a bare integer array: `[x, y]`.
impl<const N: usize> Serialize for Coordinate<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(N)?;
        for value in &self.0 {
            tuple.serialize_element(value)?;
        }
        tuple.end()
    }
}

impl<'de, const N: usize> Deserialize<'de> for Coordinate<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<i64>::deserialize(deserializer)?;
        let len = values.len();
        let values: [i64; N] = values.try_into().map_err(|_| {
            let expected = format!("an array of {N} integers");
            <D::Error as de::Error>::invalid_length(len, &expected.as_str())
        })?;
        let point = Self(values);
        if !point.in_range() {
            return Err(<D::Error as de::Error>::custom(format!(
                "coordinate {point} exceeds the limit of ±{COORDINATE_LIMIT}"
            )));
        }
        Ok(point)
    }
}
