//! Subcommand handlers.
//!
//! Each handler returns the process exit code on success. Errors bubble up
//! to `main`, which reports them and exits with 1.

pub mod check;
pub mod generate;
pub mod validate;

pub use check::{CheckArgs, run_check};
pub use generate::{GenerateArgs, run_generate};
pub use validate::{ValidateArgs, run_validate};
