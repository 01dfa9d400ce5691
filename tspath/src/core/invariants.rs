//! Structural checks on logical forms, run before resolution.

use crate::core::cadence::{Cadence, LogicalForm};

/// Violations that make a form unresolvable:
/// - Coordinations with no parts
pub fn validate_invariants<const N: usize>(form: &LogicalForm<N>) -> Vec<String> {
    let mut errors = Vec::new();
    for (index, cadence) in form.cadences.iter().enumerate() {
        visit(cadence, &format!("root/cadence[{index}]"), false, &mut |node, path, _| {
            if let Cadence::Coord { parts, .. } = node
                && parts.is_empty()
            {
                errors.push(format!("{path}: coordination has no parts"));
            }
        });
    }
    errors
}

/// Legal but suspicious constructs:
/// - `coordres` with no enclosing coordination
pub fn placeholder_warnings<const N: usize>(form: &LogicalForm<N>) -> Vec<String> {
    let mut warnings = Vec::new();
    for (index, cadence) in form.cadences.iter().enumerate() {
        visit(cadence, &format!("root/cadence[{index}]"), false, &mut |node, path, enclosed| {
            if matches!(node, Cadence::CoordRes) && !enclosed {
                warnings.push(format!(
                    "{path}: coordres outside any coordination resolves to the sentinel"
                ));
            }
        });
    }
    warnings
}

/// Pre-order walk. `enclosed` is true inside the parts of some coordination;
/// a coordination's own resolution inherits the enclosing scope.
fn visit<const N: usize>(
    cadence: &Cadence<N>,
    path: &str,
    enclosed: bool,
    f: &mut dyn FnMut(&Cadence<N>, &str, bool),
) {
    f(cadence, path, enclosed);
    match cadence {
        Cadence::Point(_) | Cadence::CoordRes => {}
        Cadence::Leftonto(inner) => visit(inner, &format!("{path}/leftonto"), enclosed, f),
        Cadence::Rightonto(inner) => visit(inner, &format!("{path}/rightonto"), enclosed, f),
        Cadence::Coord { parts, resolution } => {
            visit(resolution, &format!("{path}/resolution"), enclosed, f);
            for (index, part) in parts.iter().enumerate() {
                visit(part, &format!("{path}/parts[{index}]"), true, f);
            }
        }
    }
}
