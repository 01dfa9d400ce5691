//! Resolution of a single cadence into a tonal-space path.
//!
//! The resolution point of the nearest enclosing coordination is threaded
//! through every recursive call as an explicit parameter. A `coordres`
//! reached with no enclosing coordination falls back to the supplied
//! resolution and is reported with a warning.
//!
//! Every point of a resolved path lies within [`COORDINATE_LIMIT`]; a point
//! or step that would leave it fails with [`ResolveError::OutOfRange`].

use tracing::warn;

use crate::core::cadence::Cadence;
use crate::core::coordinate::{COORDINATE_LIMIT, Coordinate};
use crate::core::error::ResolveError;
use crate::core::path::TonalPath;

/// Whether a coordination encloses the node being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scope {
    Outer,
    Coordination,
}

/// Resolve `cadence` using the sentinel origin for stray placeholders.
pub fn cadence_path<const N: usize>(cadence: &Cadence<N>) -> Result<TonalPath<N>, ResolveError> {
    resolve(cadence, Coordinate::origin())
}

/// Resolve `cadence` with `resolution` standing in for any `coordres` that
/// no coordination encloses.
///
/// The result is never empty.
pub fn resolve<const N: usize>(
    cadence: &Cadence<N>,
    resolution: Coordinate<N>,
) -> Result<TonalPath<N>, ResolveError> {
    resolve_in(cadence, resolution, Scope::Outer).map(TonalPath::new)
}

fn resolve_in<const N: usize>(
    cadence: &Cadence<N>,
    resolution: Coordinate<N>,
    scope: Scope,
) -> Result<Vec<Coordinate<N>>, ResolveError> {
    match cadence {
        Cadence::Point(point) => Ok(vec![bounded(*point)?]),
        Cadence::Leftonto(inner) => {
            step_onto(inner, resolution, scope, Coordinate::left_step())
                .map_err(|err| err.within("leftonto"))
        }
        Cadence::Rightonto(inner) => {
            step_onto(inner, resolution, scope, Coordinate::right_step())
                .map_err(|err| err.within("rightonto"))
        }
        Cadence::Coord {
            parts,
            resolution: shared,
        } => {
            if parts.is_empty() {
                return Err(ResolveError::empty_coordination());
            }
            let respath = resolve_in(shared, resolution, scope)
                .map_err(|err| err.within("resolution"))?;
            let anchor = respath[0];

            let mut path = Vec::new();
            for (index, part) in parts.iter().enumerate() {
                let mut part_path = resolve_in(part, anchor, Scope::Coordination)
                    .map_err(|err| err.within(format!("parts[{index}]")))?;
                // The final point of each part is the shared anchor.
                part_path.pop();
                path.extend(part_path);
            }
            path.extend(respath);
            Ok(path)
        }
        Cadence::CoordRes => {
            if scope == Scope::Outer {
                warn!(
                    substituted = %resolution,
                    "coordres outside any coordination; using fallback resolution"
                );
            }
            Ok(vec![bounded(resolution)?])
        }
    }
}

fn bounded<const N: usize>(point: Coordinate<N>) -> Result<Coordinate<N>, ResolveError> {
    if point.in_range() {
        Ok(point)
    } else {
        Err(ResolveError::out_of_range(point))
    }
}

fn step_onto<const N: usize>(
    inner: &Cadence<N>,
    resolution: Coordinate<N>,
    scope: Scope,
    offset: Coordinate<N>,
) -> Result<Vec<Coordinate<N>>, ResolveError> {
    let respath = resolve_in(inner, resolution, scope)?;
    let mut path = Vec::with_capacity(respath.len() + 1);
    // `respath[0]` is in range and `offset` is a unit step, so this cannot overflow.
    path.push(bounded(respath[0] + offset)?);
    path.extend(respath);
    Ok(path)
}
