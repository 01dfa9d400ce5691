//! Validation of logical-form files for `tspath validate`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::invariants::{placeholder_warnings, validate_invariants};
use crate::exit_codes;
use crate::io::form_store::read_form;

/// Findings for one form file that passed schema validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    pub cadences: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl FormReport {
    pub fn exit_code(&self) -> i32 {
        if !self.errors.is_empty() {
            exit_codes::INVALID
        } else if !self.warnings.is_empty() {
            exit_codes::WARNINGS
        } else {
            exit_codes::OK
        }
    }
}

/// Check a form file against the schema, then collect invariant errors and
/// placeholder warnings. Schema and parse failures are returned as `Err`.
pub fn validate_form_file(path: &Path) -> Result<FormReport> {
    let form = read_form(path).with_context(|| "load form for validation")?;
    Ok(FormReport {
        cadences: form.cadences.len(),
        errors: validate_invariants(&form),
        warnings: placeholder_warnings(&form),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn clean_form_exits_ok() {
        let dir = TestDir::new();
        let path = dir.write(
            "form.json",
            r#"{"cadences": [{"leftonto": {"point": [0, 0]}}]}"#,
        );
        let report = validate_form_file(&path).expect("validate");
        assert_eq!(report.cadences, 1);
        assert_eq!(report.exit_code(), exit_codes::OK);
    }

    #[test]
    fn stray_placeholder_is_a_warning() {
        let dir = TestDir::new();
        let path = dir.write("form.json", r#"{"cadences": [{"rightonto": "coord_res"}]}"#);
        let report = validate_form_file(&path).expect("validate");
        assert!(report.errors.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.exit_code(), exit_codes::WARNINGS);
    }

    #[test]
    fn errors_outrank_warnings() {
        let dir = TestDir::new();
        let path = dir.write(
            "form.json",
            r#"{"cadences": ["coord_res", {"coord": {"parts": [], "resolution": "coord_res"}}]}"#,
        );
        let report = validate_form_file(&path).expect("validate");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 2);
        assert_eq!(report.exit_code(), exit_codes::INVALID);
    }

    #[test]
    fn schema_failure_is_an_error() {
        let dir = TestDir::new();
        let path = dir.write("form.json", r#"{"cadences": [{"point": [0]}]}"#);
        assert!(validate_form_file(&path).is_err());
    }
}
