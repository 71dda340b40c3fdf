//! Validation messages and the accumulated [`ValidationResult`].

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

// ============================================================================
// VALIDATION MESSAGE
// ============================================================================

/// A single failed check, attributed to the field it was declared on.
///
/// `code` is a stable machine-readable identifier (`"not_empty"`, `"email"`,
/// `"min"`, ...). `message` is the human-readable text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationMessage {
    /// Name of the field the failing rule was declared on.
    pub field: String,
    /// Stable error code.
    pub code: Cow<'static, str>,
    /// Human-readable message.
    pub message: Cow<'static, str>,
}

impl ValidationMessage {
    /// Creates a message for `field`.
    pub fn new(
        field: impl Into<String>,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Returns the field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the error code.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the message text.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a single primitive check.
pub type ValidationOutcome = Result<(), ValidationMessage>;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// The accumulated outcome of validating one record.
///
/// Starts passing with no messages. Recording a failed outcome flips it to
/// failing, and once failing it never passes again. Messages keep the order
/// in which they were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pass: bool,
    messages: Vec<ValidationMessage>,
}

impl ValidationResult {
    /// A passing result with no messages.
    #[must_use]
    pub const fn success() -> Self {
        Self {
            pass: true,
            messages: Vec::new(),
        }
    }

    /// A failing result holding exactly `message`.
    #[must_use]
    pub fn failure(message: ValidationMessage) -> Self {
        Self {
            pass: false,
            messages: vec![message],
        }
    }

    /// Returns `true` if every recorded check passed.
    #[inline]
    pub fn pass(&self) -> bool {
        self.pass
    }

    /// Returns the messages of every failed check, in check order.
    #[inline]
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Consumes the result and returns its messages.
    pub fn into_messages(self) -> Vec<ValidationMessage> {
        self.messages
    }

    /// Records the outcome of one primitive check.
    pub fn push(&mut self, outcome: ValidationOutcome) {
        if let Err(message) = outcome {
            self.pass = false;
            self.messages.push(message);
        }
    }

    /// Folds a nested result into this one.
    ///
    /// The merged result passes only if both passed; `other`'s messages
    /// follow this result's messages.
    pub fn append(&mut self, other: ValidationResult) {
        self.pass &= other.pass;
        self.messages.extend(other.messages);
    }

    /// Projects the result into an aggregated error, if it failed.
    ///
    /// The error text begins with `context` and lists one
    /// `field: message` line per failed check.
    pub fn error(&self, context: impl Into<String>) -> Option<ValidationError> {
        if self.pass {
            None
        } else {
            Some(ValidationError::new(context, self.messages.clone()))
        }
    }

    /// Converts the result into a `Result`, consuming it.
    pub fn into_result(self, context: impl Into<String>) -> Result<(), ValidationError> {
        if self.pass {
            Ok(())
        } else {
            Err(ValidationError::new(context, self.messages))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

impl From<ValidationOutcome> for ValidationResult {
    fn from(outcome: ValidationOutcome) -> Self {
        let mut result = Self::success();
        result.push(outcome);
        result
    }
}

impl Extend<ValidationOutcome> for ValidationResult {
    fn extend<I: IntoIterator<Item = ValidationOutcome>>(&mut self, iter: I) {
        for outcome in iter {
            self.push(outcome);
        }
    }
}

impl FromIterator<ValidationOutcome> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ValidationOutcome>>(iter: I) -> Self {
        let mut result = Self::success();
        result.extend(iter);
        result
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn failed(field: &str) -> ValidationOutcome {
        Err(ValidationMessage::new(field, "test", "failed"))
    }

    #[test]
    fn success_passes_with_no_messages() {
        let result = ValidationResult::success();
        assert!(result.pass());
        assert!(result.messages().is_empty());
        assert_eq!(result, ValidationResult::default());
    }

    #[test]
    fn push_ok_keeps_passing() {
        let mut result = ValidationResult::success();
        result.push(Ok(()));
        result.push(Ok(()));
        assert!(result.pass());
        assert!(result.messages().is_empty());
    }

    #[test]
    fn push_err_flips_to_failing() {
        let mut result = ValidationResult::success();
        result.push(failed("Name"));
        assert!(!result.pass());
        assert_eq!(result.messages().len(), 1);
        assert_eq!(result.messages()[0].field(), "Name");
    }

    #[test]
    fn failing_never_recovers() {
        let mut result = ValidationResult::success();
        result.push(failed("a"));
        result.push(Ok(()));
        result.append(ValidationResult::success());
        assert!(!result.pass());
    }

    #[test]
    fn append_preserves_order() {
        let mut outer = ValidationResult::success();
        outer.push(failed("a"));

        let mut inner = ValidationResult::success();
        inner.push(failed("b"));
        inner.push(failed("c"));

        outer.append(inner);

        let fields: Vec<_> = outer.messages().iter().map(ValidationMessage::field).collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn append_failing_into_passing_fails() {
        let mut outer = ValidationResult::success();
        outer.append(ValidationResult::failure(ValidationMessage::new("x", "c", "m")));
        assert!(!outer.pass());
        assert_eq!(outer.messages().len(), 1);
    }

    #[test]
    fn error_is_none_when_passing() {
        assert!(ValidationResult::success().error("ctx").is_none());
        assert!(ValidationResult::success().into_result("ctx").is_ok());
    }

    #[test]
    fn error_lists_every_message() {
        let mut result = ValidationResult::success();
        result.push(Err(ValidationMessage::new("Name", "not_empty", "input cannot be empty")));
        result.push(Err(ValidationMessage::new("Email", "email", "email is not valid")));

        let error = result.error("signup failed").unwrap();
        assert_eq!(
            error.to_string(),
            "signup failed\nName: input cannot be empty\nEmail: email is not valid"
        );
        assert_eq!(error.messages().len(), 2);
    }

    #[test]
    fn collects_from_outcomes() {
        let result: ValidationResult = vec![Ok(()), failed("a"), Ok(())].into_iter().collect();
        assert!(!result.pass());
        assert_eq!(result.messages().len(), 1);
    }

    #[test]
    fn serializes_pass_and_messages() {
        let result = ValidationResult::from(failed("Age"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["pass"], false);
        assert_eq!(json["messages"][0]["field"], "Age");
        assert_eq!(json["messages"][0]["code"], "test");
    }
}
