//! Core validation types and traits
//!
//! - **Messages**: [`ValidationMessage`], one failed check attributed to a field
//! - **Results**: [`ValidationResult`], the accumulated outcome for one record
//! - **Errors**: [`ValidationError`], the aggregated error projection
//! - **Traits**: [`Validate`], implemented by every validated record
//!
//! A primitive check returns a [`ValidationOutcome`]. Generated validators push
//! each outcome into a [`ValidationResult`] and append the results of nested
//! records:
//!
//! ```rust
//! use tagval_validator::foundation::ValidationResult;
//! use tagval_validator::validators::{is_email, is_not_empty};
//!
//! let mut result = ValidationResult::success();
//! result.push(is_not_empty("Name", ""));
//! result.push(is_email("Email", "jane@example.com"));
//!
//! assert!(!result.pass());
//! assert_eq!(result.messages().len(), 1);
//! ```

pub mod error;
pub mod result;
pub mod traits;

pub use error::ValidationError;
pub use result::{ValidationMessage, ValidationOutcome, ValidationResult};
pub use traits::Validate;
