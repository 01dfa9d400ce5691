//! I/O helpers for tspath commands.

pub mod config;
pub mod form_store;
