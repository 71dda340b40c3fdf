//! Numeric bound validators (`min(N)` / `max(N)` on integers). Both bounds are strict.

use std::fmt::Display;

use crate::macros::primitive;

primitive! {
    /// Passes iff `input > target`.
    pub fn is_greater_than<T: PartialOrd + Display>(input: T, target: T) as "min";
    rule { input > target }
    message { format!("number is less than allowed ({target})") }
}

primitive! {
    /// Passes iff `input < target`.
    pub fn is_less_than<T: PartialOrd + Display>(input: T, target: T) as "max";
    rule { input < target }
    message { format!("number is greater than allowed ({target})") }
}
