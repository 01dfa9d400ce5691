//! Errors raised by cadence resolution.

use thiserror::Error;

use crate::core::coordinate::COORDINATE_LIMIT;

/// Structural violations that make a cadence unresolvable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A coordination with nothing to coordinate: an upstream construction bug.
    #[error("coordination at {} has no parts", render_location(.location))]
    EmptyCoordination { location: Vec<String> },
    /// A point of the path would leave the supported coordinate range.
    #[error(
        "point {point} at {} exceeds the coordinate limit of ±{COORDINATE_LIMIT}",
        render_location(.location)
    )]
    OutOfRange {
        point: String,
        location: Vec<String>,
    },
}

impl ResolveError {
    pub(crate) fn empty_coordination() -> Self {
        ResolveError::EmptyCoordination {
            location: Vec::new(),
        }
    }

    pub(crate) fn out_of_range(point: impl ToString) -> Self {
        ResolveError::OutOfRange {
            point: point.to_string(),
            location: Vec::new(),
        }
    }

    /// Prefix the error location with the segment of the enclosing node.
    pub(crate) fn within(mut self, segment: impl Into<String>) -> Self {
        match &mut self {
            ResolveError::EmptyCoordination { location }
            | ResolveError::OutOfRange { location, .. } => location.insert(0, segment.into()),
        }
        self
    }

    /// `/`-separated route from the root to the failing node.
    pub fn location(&self) -> String {
        match self {
            ResolveError::EmptyCoordination { location }
            | ResolveError::OutOfRange { location, .. } => render_location(location),
        }
    }
}

fn render_location(location: &[String]) -> String {
    let mut rendered = String::from("root");
    for segment in location {
        rendered.push('/');
        rendered.push_str(segment);
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_built_outside_in() {
        let err = ResolveError::empty_coordination()
            .within("parts[1]")
            .within("leftonto")
            .within("cadence[2]");
        assert_eq!(err.location(), "root/cadence[2]/leftonto/parts[1]");
        assert_eq!(
            err.to_string(),
            "coordination at root/cadence[2]/leftonto/parts[1] has no parts"
        );
    }

    #[test]
    fn out_of_range_names_the_point() {
        let err = ResolveError::out_of_range("(1000001,0)").within("leftonto");
        assert_eq!(
            err.to_string(),
            "point (1000001,0) at root/leftonto exceeds the coordinate limit of ±1000000"
        );
    }
}
