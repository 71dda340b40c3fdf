//! Cross-field equality (`equals(Other)`).

use crate::foundation::{ValidationMessage, ValidationOutcome};

/// Passes iff `input == other`.
///
/// `field` is the field carrying the rule and `other_field` the sibling it
/// is compared with. The failure message names both.
///
/// ```rust
/// use tagval_validator::validators::is_equal_to;
///
/// let message = is_equal_to("ConfirmPass", "Password", "abc", "abcd").unwrap_err();
/// assert_eq!(message.message(), "field values are not equal (ConfirmPass, Password)");
/// ```
#[must_use = "the outcome must be recorded in a ValidationResult"]
pub fn is_equal_to<T: PartialEq + ?Sized>(
    field: &str,
    other_field: &str,
    input: &T,
    other: &T,
) -> ValidationOutcome {
    if input == other {
        Ok(())
    } else {
        Err(ValidationMessage::new(
            field,
            "equals",
            format!("field values are not equal ({field}, {other_field})"),
        ))
    }
}
