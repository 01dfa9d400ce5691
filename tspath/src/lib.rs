//! Tonal-space cadence resolution.
//!
//! Turns a logical form (a sequence of cadences built from `leftonto`,
//! `rightonto` and coordination operators) into one continuous path through
//! the tonal space.
//!
//! - **[`core`]**: Pure, deterministic logic (resolution, stitching, notation,
//!   naming, path comparison). No I/O.
//! - **[`io`]**: Configuration and logical-form files.
//!
//! Orchestration modules ([`analyze`], [`validate`]) combine the two to
//! implement CLI commands.

/// Crate version, recorded with evaluation results.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod analyze;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;
