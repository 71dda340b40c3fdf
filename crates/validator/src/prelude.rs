//! Prelude module for convenient imports.
//!
//! `use tagval_validator::prelude::*;` brings in the result model, the
//! [`Validate`] trait, and every primitive.

pub use crate::foundation::{
    Validate, ValidationError, ValidationMessage, ValidationOutcome, ValidationResult,
};

pub use crate::validators::{
    is_email, is_equal_to, is_greater_than, is_ip, is_length_greater_than, is_length_less_than,
    is_less_than, is_not_empty, is_url, satisfies_regex,
};
