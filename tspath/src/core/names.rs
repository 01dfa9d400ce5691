//! Human-readable names for points of the 2-D tonal space.
//!
//! The space is tiled by key regions, each holding the seven degrees of one
//! major scale. A point's name is its degree within its region, sharpened or
//! flattened by the region's vertical index and marked `+`/`-` once for every
//! syntonic comma it lies away from the central column of regions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::coordinate::Coordinate;
use crate::core::path::TonalPath;

const ROMAN: [[&str; 4]; 2] = [["IV", "I", "V", "II"], ["VI", "III", "VII", ""]];
const ALPHA: [[&str; 4]; 2] = [["F", "C", "G", "D"], ["A", "E", "B", ""]];

/// Identifier of the key region containing `point`. Region `(0,0)` holds the
/// degrees of the key whose tonic is the origin.
pub fn key_region(point: &Coordinate<2>) -> (i64, i64) {
    let (x, y) = (point.x(), point.y());
    ((y + 2 * x + 2).div_euclid(7), (4 * y + x + 1).div_euclid(7))
}

/// Position of `point` relative to the bottom-left corner of its key region:
/// one of `(0,0)..=(3,0)` or `(0,1)..=(2,1)`.
pub fn within_region(point: &Coordinate<2>) -> (i64, i64) {
    let (rx, ry) = key_region(point);
    (point.x() - 4 * rx + ry + 1, point.y() - 2 * ry + rx)
}

/// Roman numeral name relative to a tonic at the origin, e.g. `bII` or `VI+`.
pub fn roman_name(point: &Coordinate<2>) -> String {
    let (accidentals, degree, commas) = parts(point, &ROMAN);
    format!("{accidentals}{degree}{commas}")
}

/// Note name with C at the origin, e.g. `Db` or `A+`.
pub fn alpha_name(point: &Coordinate<2>) -> String {
    let (accidentals, degree, commas) = parts(point, &ALPHA);
    format!("{degree}{accidentals}{commas}")
}

fn parts(point: &Coordinate<2>, table: &[[&'static str; 4]; 2]) -> (String, &'static str, String) {
    let (_, region_y) = key_region(point);
    let (local_x, local_y) = within_region(point);
    let degree = usize::try_from(local_y)
        .ok()
        .and_then(|row| table.get(row))
        .zip(usize::try_from(local_x).ok())
        .and_then(|(row, column)| row.get(column))
        .copied()
        .unwrap_or("?");

    let accidental = if region_y > 0 { "#" } else { "b" };
    let accidentals = accidental.repeat(region_y.unsigned_abs() as usize);

    let comma_count = (point.x() + 1).div_euclid(4);
    let comma = if comma_count > 0 { "+" } else { "-" };
    let commas = comma.repeat(comma_count.unsigned_abs() as usize);

    (accidentals, degree, commas)
}

/// How points of a path are rendered for output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathFormat {
    /// `[(x,y), ...]`
    #[default]
    Xy,
    /// `I IV V`
    Roman,
    /// `C F G`
    Alpha,
    /// `[[x,y], ...]`
    Json,
}

impl PathFormat {
    pub const ALL: [PathFormat; 4] = [
        PathFormat::Xy,
        PathFormat::Roman,
        PathFormat::Alpha,
        PathFormat::Json,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PathFormat::Xy => "xy",
            PathFormat::Roman => "roman",
            PathFormat::Alpha => "alpha",
            PathFormat::Json => "json",
        }
    }

    pub fn render(self, path: &TonalPath<2>) -> String {
        match self {
            PathFormat::Xy => path.to_string(),
            PathFormat::Roman => join_names(path, roman_name),
            PathFormat::Alpha => join_names(path, alpha_name),
            PathFormat::Json => {
                serde_json::to_string(path).unwrap_or_else(|_| path.to_string())
            }
        }
    }
}

fn join_names(path: &TonalPath<2>, name: fn(&Coordinate<2>) -> String) -> String {
    path.iter().map(name).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for PathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PathFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PathFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = PathFormat::ALL.iter().map(|f| f.as_str()).collect();
                format!("unknown format '{s}' (expected one of {})", known.join(", "))
            })
    }
}
