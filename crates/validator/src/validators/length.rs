//! Length validators for text fields (`min(N)` / `max(N)` on text).
//!
//! Length is counted in Unicode scalar values, and both bounds are strict.

use crate::macros::primitive;

primitive! {
    /// Passes iff the input has strictly more than `target` characters.
    pub fn is_length_greater_than(input: &str, target: usize) as "min";
    rule { input.chars().count() > target }
    message { format!("string length is less than {target}") }
}

primitive! {
    /// Passes iff the input has strictly fewer than `target` characters.
    pub fn is_length_less_than(input: &str, target: usize) as "max";
    rule { input.chars().count() < target }
    message { format!("string length is greater than {target}") }
}
