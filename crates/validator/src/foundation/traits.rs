//! The [`Validate`] trait implemented by validated records.

use super::result::ValidationResult;

// ============================================================================
// CORE TRAIT
// ============================================================================

/// A record that can check its own fields.
///
/// Implementations are normally produced by `#[derive(Validate)]` or by the
/// `tagval` code generator. Each tagged field contributes its checks in field
/// order; nested records contribute their own result through
/// [`ValidationResult::append`].
///
/// # Examples
///
/// ```rust
/// use tagval_validator::{Validate, ValidationResult};
/// use tagval_validator::validators::is_ip;
///
/// struct Endpoint {
///     ip: String,
/// }
///
/// impl Validate for Endpoint {
///     fn validate(&self) -> ValidationResult {
///         let mut result = ValidationResult::success();
///         result.push(is_ip("ip", &self.ip));
///         result
///     }
/// }
///
/// assert!(Endpoint { ip: "10.0.0.1".into() }.validate().pass());
/// ```
pub trait Validate {
    /// Runs every declared check and returns the accumulated result.
    fn validate(&self) -> ValidationResult;
}

// ============================================================================
// BLANKET IMPLEMENTATIONS
// ============================================================================

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self) -> ValidationResult {
        (**self).validate()
    }
}

impl<T: Validate + ?Sized> Validate for Box<T> {
    fn validate(&self) -> ValidationResult {
        (**self).validate()
    }
}

/// An absent nested record has nothing to check.
impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> ValidationResult {
        self.as_ref()
            .map_or_else(ValidationResult::success, Validate::validate)
    }
}

/// Every element is validated; results are appended in element order.
impl<T: Validate> Validate for [T] {
    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::success();
        for item in self {
            result.append(item.validate());
        }
        result
    }
}

impl<T: Validate> Validate for Vec<T> {
    fn validate(&self) -> ValidationResult {
        self.as_slice().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidationMessage;

    struct Flag(bool);

    impl Validate for Flag {
        fn validate(&self) -> ValidationResult {
            if self.0 {
                ValidationResult::success()
            } else {
                ValidationResult::failure(ValidationMessage::new("flag", "flag", "flag is off"))
            }
        }
    }

    #[test]
    fn none_passes() {
        let value: Option<Flag> = None;
        assert!(value.validate().pass());
    }

    #[test]
    fn some_delegates() {
        assert!(!Some(Flag(false)).validate().pass());
        assert!(Some(Flag(true)).validate().pass());
    }

    #[test]
    fn vec_appends_each_element() {
        let items = vec![Flag(false), Flag(true), Flag(false)];
        let result = items.validate();
        assert!(!result.pass());
        assert_eq!(result.messages().len(), 2);
    }

    #[test]
    fn boxed_and_borrowed_delegate() {
        let boxed: Box<Flag> = Box::new(Flag(false));
        assert!(!boxed.validate().pass());
        assert!((&Flag(true)).validate().pass());
    }
}
