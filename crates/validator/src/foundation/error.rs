//! Aggregated validation error.

use std::fmt;

use super::result::ValidationMessage;

/// Error projection of a failed [`ValidationResult`](super::ValidationResult).
///
/// Displays as the context line followed by one `field: message` line per
/// failed check:
///
/// ```text
/// user is invalid
/// Name: input cannot be empty
/// Age: number is less than allowed
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct ValidationError {
    context: String,
    messages: Vec<ValidationMessage>,
}

impl ValidationError {
    /// Creates an error from a context line and the failed messages.
    pub fn new(context: impl Into<String>, messages: Vec<ValidationMessage>) -> Self {
        Self {
            context: context.into(),
            messages,
        }
    }

    /// Returns the context line.
    pub fn context(&self) -> &str {
        &self.context
    }

    /// Returns the failed messages.
    pub fn messages(&self) -> &[ValidationMessage] {
        &self.messages
    }

    /// Returns the distinct error codes, in first-seen order.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = Vec::with_capacity(self.messages.len());
        for message in &self.messages {
            if !codes.contains(&message.code()) {
                codes.push(message.code());
            }
        }
        codes
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = 0usize;
        if !self.context.is_empty() {
            f.write_str(&self.context)?;
            lines += 1;
        }
        for message in &self.messages {
            if lines > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{message}")?;
            lines += 1;
        }
        Ok(())
    }
}
