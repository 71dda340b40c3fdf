//! # tagval-validator
//!
//! Runtime support for tag-driven validators.
//!
//! Records declare their rules as compact tags (`"req,email"`, `"min(3),max(11)"`).
//! The `tagval-codegen` compiler turns those tags into validation plans and either
//! emits Rust source that calls the primitives in [`validators`], or interprets the
//! plans directly. Both paths report through [`ValidationResult`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tagval_macros::Validate;
//! use tagval_validator::prelude::*;
//!
//! #[derive(Validate)]
//! struct Signup {
//!     #[tagval("req,email")]
//!     email: String,
//!     #[tagval("min(18),max(65)")]
//!     age: u32,
//! }
//!
//! let result = Signup { email: "a@b.co".into(), age: 30 }.validate();
//! assert!(result.pass());
//! ```
//!
//! ## Primitives
//!
//! - **Content**: [`is_not_empty`](validators::is_not_empty),
//!   [`is_email`](validators::is_email), [`is_url`](validators::is_url),
//!   [`is_ip`](validators::is_ip)
//! - **Length**: [`is_length_greater_than`](validators::is_length_greater_than),
//!   [`is_length_less_than`](validators::is_length_less_than)
//! - **Range**: [`is_greater_than`](validators::is_greater_than),
//!   [`is_less_than`](validators::is_less_than)
//! - **Equality**: [`is_equal_to`](validators::is_equal_to)
//! - **Pattern**: [`satisfies_regex`](validators::satisfies_regex)

pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;

pub use foundation::{
    Validate, ValidationError, ValidationMessage, ValidationOutcome, ValidationResult,
};
