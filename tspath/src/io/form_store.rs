//! Logical-form load/save helpers with schema + invariant validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use jsonschema::Draft;
use serde_json::Value;

use crate::core::cadence::LogicalForm;
use crate::core::invariants::validate_invariants;

pub const LOGICAL_FORM_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/schemas/logical_form/v1.schema.json"
));

/// Load a logical form and check it against the schema only.
pub fn read_form(path: &Path) -> Result<LogicalForm> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read form {}", path.display()))?;
    let value: Value = serde_json::from_str(&contents)
        .with_context(|| format!("parse form {}", path.display()))?;
    validate_schema(&value).with_context(|| format!("validate form {}", path.display()))?;
    let form: LogicalForm = serde_json::from_value(value)
        .with_context(|| format!("deserialize form {}", path.display()))?;
    Ok(form)
}

/// Load and validate a logical form (schema + invariants).
pub fn load_form(path: &Path) -> Result<LogicalForm> {
    let form = read_form(path)?;
    let errors = validate_invariants(&form);
    if !errors.is_empty() {
        bail!(
            "invariant violations in {}:\n- {}",
            path.display(),
            errors.join("\n- ")
        );
    }
    Ok(form)
}

/// Write a logical form as pretty-printed JSON with trailing newline.
pub fn write_form(path: &Path, form: &LogicalForm) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(form).context("serialize form json")?;
    buf.push('\n');
    fs::write(path, buf).with_context(|| format!("write form {}", path.display()))
}

/// Validate a JSON instance against the logical-form schema (Draft 2020-12).
pub fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value =
        serde_json::from_str(LOGICAL_FORM_SCHEMA).context("parse logical form schema")?;
    let compiled = jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .context("compile json schema")?;
    let messages: Vec<String> = compiled
        .iter_errors(instance)
        .map(|err| err.to_string())
        .collect();
    if !messages.is_empty() {
        bail!("schema validation failed:\n- {}", messages.join("\n- "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coord, coord_res, left, point};
    use serde_json::json;

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("form.json");
        let form = LogicalForm::new(vec![
            left(point(0, 0)),
            coord(vec![left(coord_res()), left(left(coord_res()))], point(0, 0)),
        ]);
        write_form(&path, &form).expect("write");
        assert_eq!(load_form(&path).expect("load"), form);
    }

    #[test]
    fn schema_accepts_every_variant() {
        let value = json!({
            "cadences": [
                {"point": [0, 0]},
                {"rightonto": "coord_res"},
                {"coord": {"parts": [{"leftonto": "coord_res"}], "resolution": {"point": [1, -1]}}}
            ]
        });
        validate_schema(&value).expect("valid");
    }

    #[test]
    fn schema_rejects_wrong_arity_and_unknown_tags() {
        let wrong_arity = json!({"cadences": [{"point": [0, 0, 0]}]});
        assert!(validate_schema(&wrong_arity).is_err());
        let unknown = json!({"cadences": [{"downonto": {"point": [0, 0]}}]});
        let err = validate_schema(&unknown).expect_err("unknown tag");
        assert!(err.to_string().contains("schema validation failed"));
    }

    #[test]
    fn schema_bounds_coordinates() {
        let far = json!({"cadences": [{"leftonto": {"point": [i64::MIN, 0]}}]});
        assert!(validate_schema(&far).is_err());
        let edge = json!({"cadences": [{"point": [-1_000_000, 1_000_000]}]});
        validate_schema(&edge).expect("limit is inclusive");
    }

    #[test]
    fn load_rejects_empty_coordination() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("form.json");
        fs::write(
            &path,
            r#"{"cadences": [{"coord": {"parts": [], "resolution": {"point": [0, 0]}}}]}"#,
        )
        .expect("write");
        assert!(read_form(&path).is_ok());
        let err = load_form(&path).expect_err("empty coordination");
        assert!(format!("{err:#}").contains("root/cadence[0]: coordination has no parts"));
    }
}
