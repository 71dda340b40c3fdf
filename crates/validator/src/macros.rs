//! Macros for declaring primitive checks with minimal boilerplate.

// ============================================================================
// PRIMITIVE MACRO
// ============================================================================

/// Declares a primitive check: a pure function taking the field name first,
/// returning `Ok(())` when `rule` holds and a [`ValidationMessage`] carrying
/// `code` and `message` otherwise.
///
/// The field name is only copied on failure.
///
/// ```rust,ignore
/// primitive! {
///     /// Passes iff the input is not the empty string.
///     pub fn is_not_empty(input: &str) as "not_empty";
///     rule { !input.is_empty() }
///     message { "input cannot be empty" }
/// }
///
/// primitive! {
///     pub fn is_greater_than<T: PartialOrd + Display>(input: T, target: T) as "greater_than";
///     rule { input > target }
///     message { "number is less than allowed" }
/// }
/// ```
///
/// [`ValidationMessage`]: crate::foundation::ValidationMessage
macro_rules! primitive {
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident $(<$gen:ident: $bound:ident $(+ $more:ident)*>)? ($($arg:ident: $aty:ty),* $(,)?) as $code:literal;
        rule $rule:block
        message $msg:block
    ) => {
        $(#[$meta])*
        #[must_use = "the outcome must be recorded in a ValidationResult"]
        $vis fn $name $(<$gen: $bound $(+ $more)*>)? (
            field: &str,
            $($arg: $aty),*
        ) -> $crate::foundation::ValidationOutcome {
            if $rule {
                Ok(())
            } else {
                Err($crate::foundation::ValidationMessage::new(field, $code, $msg))
            }
        }
    };
}

pub(crate) use primitive;
