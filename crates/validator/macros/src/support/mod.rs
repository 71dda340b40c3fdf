//! Internal support utilities for the derive.
//!
//! Attribute parsing, diagnostics, and type inspection.

pub mod attrs;
pub mod diag;
pub mod utils;
