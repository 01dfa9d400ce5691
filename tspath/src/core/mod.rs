//! Deterministic, pure logic for cadence resolution.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod cadence;
pub mod coordinate;
pub mod distance;
pub mod equivalence;
pub mod error;
pub mod invariants;
pub mod names;
pub mod notation;
pub mod path;
pub mod resolve;
pub mod stitch;
