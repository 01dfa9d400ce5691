//! The cadence algebra and logical forms built from it.
//!
//! Values are produced by an upstream grammar and read once by the resolver.
//! `Display` renders the textual notation accepted by [`crate::core::notation`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::coordinate::Coordinate;

/// A recursive description of how a harmonic unit resolves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence<const N: usize = 2> {
    /// A concrete, already resolved point.
    Point(Coordinate<N>),
    /// Step left onto wherever the inner cadence resolves.
    Leftonto(Box<Cadence<N>>),
    /// Step right onto wherever the inner cadence resolves.
    Rightonto(Box<Cadence<N>>),
    /// Several partial cadences that all resolve onto `resolution`.
    Coord {
        parts: Vec<Cadence<N>>,
        resolution: Box<Cadence<N>>,
    },
    /// The resolution point of the nearest enclosing coordination.
    CoordRes,
}

impl<const N: usize> Cadence<N> {
    pub fn point(values: [i64; N]) -> Self {
        Cadence::Point(Coordinate::new(values))
    }

    pub fn leftonto(inner: Cadence<N>) -> Self {
        Cadence::Leftonto(Box::new(inner))
    }

    pub fn rightonto(inner: Cadence<N>) -> Self {
        Cadence::Rightonto(Box::new(inner))
    }

    pub fn coord(parts: Vec<Cadence<N>>, resolution: Cadence<N>) -> Self {
        Cadence::Coord {
            parts,
            resolution: Box::new(resolution),
        }
    }

    /// Number of nodes in the cadence tree.
    pub fn size(&self) -> usize {
        match self {
            Cadence::Point(_) | Cadence::CoordRes => 1,
            Cadence::Leftonto(inner) | Cadence::Rightonto(inner) => 1 + inner.size(),
            Cadence::Coord { parts, resolution } => {
                1 + resolution.size() + parts.iter().map(Cadence::size).sum::<usize>()
            }
        }
    }
}

impl<const N: usize> fmt::Display for Cadence<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Point(point) => {
                f.write_str("<")?;
                for (index, value) in point.values().iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(">")
            }
            Cadence::Leftonto(inner) => write!(f, "leftonto({inner})"),
            Cadence::Rightonto(inner) => write!(f, "rightonto({inner})"),
            Cadence::Coord { parts, resolution } => {
                f.write_str("(")?;
                for (index, part) in parts.iter().enumerate() {
                    if index > 0 {
                        f.write_str(" & ")?;
                    }
                    write!(f, "{part}")?;
                }
                write!(f, ")({resolution})")
            }
            Cadence::CoordRes => f.write_str("coordres"),
        }
    }
}

/// Successive cadential units of a phrase, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalForm<const N: usize = 2> {
    pub cadences: Vec<Cadence<N>>,
}

impl<const N: usize> LogicalForm<N> {
    pub fn new(cadences: Vec<Cadence<N>>) -> Self {
        Self { cadences }
    }

    pub fn is_empty(&self) -> bool {
        self.cadences.is_empty()
    }
}

impl<const N: usize> fmt::Display for LogicalForm<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, cadence) in self.cadences.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cadence}")?;
        }
        f.write_str("]")
    }
}
