//! Stable exit codes for `tspath` CLI commands.

/// Command succeeded; `validate` found nothing to report.
pub const OK: i32 = 0;
/// Invalid input, config, or form, or any other error.
pub const INVALID: i32 = 1;
/// `tspath validate` found warnings but no errors.
pub const WARNINGS: i32 = 2;
