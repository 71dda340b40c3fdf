//! Regular-expression validator (`regex(pattern)`).
//!
//! Patterns are compiled once and shared through a bounded process-wide
//! cache, so interpreted plans and generated code pay the compile cost
//! only on first use of each pattern.

use std::sync::LazyLock;

use moka::sync::Cache;
use regex::Regex;

use crate::foundation::{ValidationMessage, ValidationOutcome};

/// Maximum number of distinct compiled patterns kept in memory.
pub const PATTERN_CACHE_CAPACITY: u64 = 512;

static PATTERNS: LazyLock<Cache<String, Regex>> =
    LazyLock::new(|| Cache::builder().max_capacity(PATTERN_CACHE_CAPACITY).build());

/// Returns the compiled form of `pattern`, compiling and caching it on first use.
///
/// `Regex` clones share the compiled program, so hits are cheap.
pub fn compiled(pattern: &str) -> Result<Regex, regex::Error> {
    if let Some(regex) = PATTERNS.get(pattern) {
        return Ok(regex);
    }

    tracing::trace!(pattern, "compiling validation pattern");
    let regex = Regex::new(pattern)?;
    PATTERNS.insert(pattern.to_owned(), regex.clone());
    Ok(regex)
}

/// Passes iff the field value matches `pattern`.
///
/// The match is unanchored unless the pattern anchors itself. A pattern that
/// does not compile fails the check rather than panicking.
///
/// ```rust
/// use tagval_validator::validators::satisfies_regex;
///
/// assert!(satisfies_regex("Code", "ABC", "^[A-Z]+$").is_ok());
/// assert!(satisfies_regex("Code", "abc", "^[A-Z]+$").is_err());
/// ```
#[must_use = "the outcome must be recorded in a ValidationResult"]
pub fn satisfies_regex(field: &str, input: &str, pattern: &str) -> ValidationOutcome {
    match compiled(pattern) {
        Ok(regex) => satisfies_compiled(field, input, &regex),
        Err(error) => {
            tracing::debug!(pattern, %error, "validation pattern failed to compile");
            Err(ValidationMessage::new(
                field,
                "regex",
                format!("pattern `{pattern}` is not a valid regex"),
            ))
        }
    }
}

/// Like [`satisfies_regex`], for a pattern that is already compiled.
#[must_use = "the outcome must be recorded in a ValidationResult"]
pub fn satisfies_compiled(field: &str, input: &str, regex: &Regex) -> ValidationOutcome {
    if regex.is_match(input) {
        Ok(())
    } else {
        Err(ValidationMessage::new(field, "regex", "field does not match regex"))
    }
}
