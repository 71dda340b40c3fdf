//! Generation-time errors.
//!
//! Everything here is reported before any code is emitted or any plan runs.
//! Validation failures are never errors: they are data in a
//! [`ValidationResult`](tagval_validator::ValidationResult).

use thiserror::Error;

use crate::descriptor::FieldKind;

// ============================================================================
// MALFORMED TAG
// ============================================================================

/// What is wrong with a tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TagSyntax {
    #[error("empty rule")]
    EmptyToken,
    #[error("missing rule name")]
    MissingKeyword,
    #[error("rule name may only contain ASCII letters, digits and `_`")]
    InvalidKeyword,
    #[error("unclosed `(`")]
    UnclosedParen,
    #[error("unexpected `)`")]
    UnexpectedParen,
    #[error("nested `(`")]
    NestedParen,
    #[error("empty argument")]
    EmptyArgument,
    #[error("text after `)`")]
    TrailingText,
}

/// A tag string that does not follow the rule grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed tag on field `{field}`: {reason} in `{token}` (tag `{tag}`)")]
pub struct MalformedTagError {
    pub field: String,
    pub tag: String,
    pub token: String,
    pub reason: TagSyntax,
}

// ============================================================================
// RULE RESOLUTION
// ============================================================================

/// A parsed rule that cannot be bound to a primitive check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleResolutionError {
    #[error("unknown rule `{keyword}` on {kind} field `{field}`")]
    UnknownKeyword {
        field: String,
        keyword: String,
        kind: FieldKind,
    },

    #[error("rule `{keyword}` does not apply to {kind} field `{field}`")]
    UnsupportedKind {
        field: String,
        keyword: String,
        kind: FieldKind,
    },

    #[error("rule `{keyword}` on field `{field}` requires an argument")]
    MissingArgument { field: String, keyword: String },

    #[error("rule `{keyword}` on field `{field}` takes no argument, got `{argument}`")]
    UnexpectedArgument {
        field: String,
        keyword: String,
        argument: String,
    },

    #[error("rule `{keyword}` on field `{field}` expects {expected}, got `{argument}`")]
    InvalidArgument {
        field: String,
        keyword: String,
        argument: String,
        expected: &'static str,
    },

    #[error("regex on field `{field}` does not compile: {reason}")]
    InvalidPattern {
        field: String,
        pattern: String,
        reason: String,
    },

    #[error("`equals({target})` on field `{field}` names no field of this record")]
    UnknownSibling { field: String, target: String },

    #[error("`equals({target})` on {kind} field `{field}` compares against {target_kind} field")]
    SiblingKindMismatch {
        field: String,
        target: String,
        kind: FieldKind,
        target_kind: FieldKind,
    },

    #[error("field `{field}` descends into unknown record `{record}`")]
    UnknownRecord { field: String, record: String },

    #[error("rule `{keyword}({argument})` on field `{field}` is out of range for `{type_name}`")]
    OutOfRange {
        field: String,
        keyword: String,
        argument: String,
        type_name: String,
    },

    #[error("`equals({target})` on field `{field}` of type `{type_name}` compares against `{target_type}`")]
    SiblingTypeMismatch {
        field: String,
        target: String,
        type_name: String,
        target_type: String,
    },
}

impl RuleResolutionError {
    /// Returns the field the failing rule was declared on.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownKeyword { field, .. }
            | Self::UnsupportedKind { field, .. }
            | Self::MissingArgument { field, .. }
            | Self::UnexpectedArgument { field, .. }
            | Self::InvalidArgument { field, .. }
            | Self::InvalidPattern { field, .. }
            | Self::UnknownSibling { field, .. }
            | Self::SiblingKindMismatch { field, .. }
            | Self::UnknownRecord { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::SiblingTypeMismatch { field, .. } => field,
        }
    }

    /// Returns the error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownKeyword { .. } => "RULE_UNKNOWN",
            Self::UnsupportedKind { .. } => "RULE_UNSUPPORTED_KIND",
            Self::MissingArgument { .. } => "RULE_MISSING_ARGUMENT",
            Self::UnexpectedArgument { .. } => "RULE_UNEXPECTED_ARGUMENT",
            Self::InvalidArgument { .. } => "RULE_INVALID_ARGUMENT",
            Self::InvalidPattern { .. } => "RULE_INVALID_PATTERN",
            Self::UnknownSibling { .. } => "RULE_UNKNOWN_SIBLING",
            Self::SiblingKindMismatch { .. } => "RULE_SIBLING_KIND",
            Self::UnknownRecord { .. } => "RULE_UNKNOWN_RECORD",
            Self::OutOfRange { .. } => "RULE_OUT_OF_RANGE",
            Self::SiblingTypeMismatch { .. } => "RULE_SIBLING_TYPE",
        }
    }
}

// ============================================================================
// CYCLES
// ============================================================================

/// Nested records that contain each other.
///
/// `cycle` lists the record names along the loop, starting and ending with
/// the same record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cyclic record nesting: {}", cycle.join(" -> "))]
pub struct CyclicRecordError {
    pub cycle: Vec<String>,
}

// ============================================================================
// COMPILE ERROR
// ============================================================================

/// Any error raised while compiling a record's plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("record `{record}`: {source}")]
    MalformedTag {
        record: String,
        source: MalformedTagError,
    },

    #[error("record `{record}`: {source}")]
    Resolution {
        record: String,
        source: RuleResolutionError,
    },

    #[error(transparent)]
    Cyclic(#[from] CyclicRecordError),

    #[error("record `{0}` is not in the schema")]
    UnknownRecord(String),

    /// A record or field name that generated code cannot spell.
    #[error("record `{record}`: `{name}` is not a valid Rust identifier")]
    InvalidIdentifier { record: String, name: String },
}

impl CompileError {
    /// Error category for grouping and logging.
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedTag { .. } => "tag",
            Self::Resolution { .. } => "rule",
            Self::Cyclic(_) | Self::UnknownRecord(_) => "record",
            Self::InvalidIdentifier { .. } => "emit",
        }
    }

    /// Returns the error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedTag { .. } => "TAG_MALFORMED",
            Self::Resolution { source, .. } => source.code(),
            Self::Cyclic(_) => "RECORD_CYCLE",
            Self::UnknownRecord(_) => "RECORD_UNKNOWN",
            Self::InvalidIdentifier { .. } => "EMIT_INVALID_IDENT",
        }
    }

    /// Returns the record the error was raised for, if any.
    pub fn record(&self) -> Option<&str> {
        match self {
            Self::MalformedTag { record, .. } | Self::Resolution { record, .. } => Some(record),
            Self::Cyclic(e) => e.cycle.first().map(String::as_str),
            Self::UnknownRecord(name) => Some(name),
            Self::InvalidIdentifier { record, .. } => Some(record),
        }
    }

    /// Returns the field the error points at, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MalformedTag { source, .. } => Some(&source.field),
            Self::Resolution { source, .. } => Some(source.field()),
            Self::InvalidIdentifier { record, name } if name != record => Some(name),
            Self::Cyclic(_) | Self::UnknownRecord(_) | Self::InvalidIdentifier { .. } => None,
        }
    }
}
