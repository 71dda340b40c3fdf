//! Rule registry: binds `(keyword, field kind)` to a primitive check.
//!
//! The table is closed and immutable once built. [`RuleRegistry::builtin`]
//! returns the process-wide registry holding every built-in rule.
//!
//! | keyword | text | integer | nested record |
//! |---|---|---|---|
//! | `req` | not empty | | |
//! | `email` | mail address | | |
//! | `url` | absolute URL | | |
//! | `ip` | IP literal | | |
//! | `regex(P)` | matches `P` | | |
//! | `min(N)` | length > N | value > N | |
//! | `max(N)` | length < N | value < N | |
//! | `equals(F)` | equals sibling `F` | equals sibling `F` | |
//! | `obj` / `validate` | | | descend |

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::descriptor::{FieldDescriptor, FieldKind, RecordDescriptor};
use crate::error::RuleResolutionError;
use crate::tag::Rule;

// ============================================================================
// KEYWORD
// ============================================================================

/// Every rule keyword the registry understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Keyword {
    Req,
    Email,
    Url,
    Ip,
    Regex,
    Min,
    Max,
    Equals,
    /// Descend into a nested record. Spelled `obj` or `validate`.
    Nested,
}

impl Keyword {
    pub const ALL: [Self; 9] = [
        Self::Req,
        Self::Email,
        Self::Url,
        Self::Ip,
        Self::Regex,
        Self::Min,
        Self::Max,
        Self::Equals,
        Self::Nested,
    ];

    /// Looks a keyword up by its tag spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "req" => Self::Req,
            "email" => Self::Email,
            "url" => Self::Url,
            "ip" => Self::Ip,
            "regex" => Self::Regex,
            "min" => Self::Min,
            "max" => Self::Max,
            "equals" => Self::Equals,
            "obj" | "validate" => Self::Nested,
            _ => return None,
        })
    }

    /// Canonical tag spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Req => "req",
            Self::Email => "email",
            Self::Url => "url",
            Self::Ip => "ip",
            Self::Regex => "regex",
            Self::Min => "min",
            Self::Max => "max",
            Self::Equals => "equals",
            Self::Nested => "obj",
        }
    }

    /// Whether the keyword is written `keyword(argument)`.
    pub const fn takes_argument(self) -> bool {
        matches!(self, Self::Regex | Self::Min | Self::Max | Self::Equals)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CHECK
// ============================================================================

/// A compiled regex together with its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

/// A primitive check with its arguments already coerced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    NotEmpty,
    Email,
    Url,
    Ip,
    Regex(Pattern),
    LengthGreaterThan(usize),
    LengthLessThan(usize),
    GreaterThan(i64),
    LessThan(i64),
    /// Equality with the named sibling field.
    EqualsField(String),
}

/// What a rule resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Check(Check),
    /// Run the nested record's own plan.
    Descend,
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Everything a resolver may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub record: &'a RecordDescriptor,
    pub field: &'a FieldDescriptor,
    pub rule: &'a Rule,
    pub keyword: Keyword,
}

impl RuleContext<'_> {
    /// The rule's argument. Only called for keywords that take one, after
    /// the registry has checked it is present.
    fn argument(&self) -> &str {
        self.rule.argument().unwrap_or_default()
    }

    fn invalid_argument(&self, expected: &'static str) -> RuleResolutionError {
        RuleResolutionError::InvalidArgument {
            field: self.field.name.clone(),
            keyword: self.keyword.as_str().to_owned(),
            argument: self.argument().to_owned(),
            expected,
        }
    }
}

/// Binds one `(keyword, kind)` pair to a resolution.
pub type Resolver = fn(&RuleContext<'_>) -> Result<Resolution, RuleResolutionError>;

static BUILTIN: LazyLock<RuleRegistry> = LazyLock::new(RuleRegistry::with_builtins);

/// Table of `(keyword, field kind)` to resolver.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    table: HashMap<(Keyword, FieldKind), Resolver>,
}

impl RuleRegistry {
    /// An empty registry. Every rule is unsupported until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Keyword::Req, FieldKind::Text, |_| check(Check::NotEmpty));
        registry.register(Keyword::Email, FieldKind::Text, |_| check(Check::Email));
        registry.register(Keyword::Url, FieldKind::Text, |_| check(Check::Url));
        registry.register(Keyword::Ip, FieldKind::Text, |_| check(Check::Ip));
        registry.register(Keyword::Regex, FieldKind::Text, resolve_regex);
        registry.register(Keyword::Min, FieldKind::Text, |cx| {
            length_bound(cx).map(|n| Resolution::Check(Check::LengthGreaterThan(n)))
        });
        registry.register(Keyword::Max, FieldKind::Text, |cx| {
            length_bound(cx).map(|n| Resolution::Check(Check::LengthLessThan(n)))
        });
        registry.register(Keyword::Min, FieldKind::Integer, |cx| {
            integer_bound(cx).map(|n| Resolution::Check(Check::GreaterThan(n)))
        });
        registry.register(Keyword::Max, FieldKind::Integer, |cx| {
            integer_bound(cx).map(|n| Resolution::Check(Check::LessThan(n)))
        });
        registry.register(Keyword::Equals, FieldKind::Text, resolve_equals);
        registry.register(Keyword::Equals, FieldKind::Integer, resolve_equals);
        registry.register(Keyword::Nested, FieldKind::NestedRecord, |_| {
            Ok(Resolution::Descend)
        });
        registry
    }

    /// The shared built-in registry.
    pub fn builtin() -> &'static Self {
        &BUILTIN
    }

    /// Registers `resolver` for `(keyword, kind)`, returning the one it replaces.
    pub fn register(
        &mut self,
        keyword: Keyword,
        kind: FieldKind,
        resolver: Resolver,
    ) -> Option<Resolver> {
        self.table.insert((keyword, kind), resolver)
    }

    /// Removes support for `(keyword, kind)`.
    pub fn unregister(&mut self, keyword: Keyword, kind: FieldKind) -> Option<Resolver> {
        self.table.remove(&(keyword, kind))
    }

    pub fn supports(&self, keyword: Keyword, kind: FieldKind) -> bool {
        self.table.contains_key(&(keyword, kind))
    }

    /// Number of registered `(keyword, kind)` pairs.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolves `rule`, declared on `field` of `record`.
    pub fn resolve(
        &self,
        record: &RecordDescriptor,
        field: &FieldDescriptor,
        rule: &Rule,
    ) -> Result<Resolution, RuleResolutionError> {
        let Some(keyword) = Keyword::from_name(rule.keyword()) else {
            return Err(RuleResolutionError::UnknownKeyword {
                field: field.name.clone(),
                keyword: rule.keyword().to_owned(),
                kind: field.kind,
            });
        };

        let Some(resolver) = self.table.get(&(keyword, field.kind)) else {
            return Err(RuleResolutionError::UnsupportedKind {
                field: field.name.clone(),
                keyword: rule.keyword().to_owned(),
                kind: field.kind,
            });
        };

        match (keyword.takes_argument(), rule.argument()) {
            (true, None) => {
                return Err(RuleResolutionError::MissingArgument {
                    field: field.name.clone(),
                    keyword: rule.keyword().to_owned(),
                });
            }
            (false, Some(argument)) => {
                return Err(RuleResolutionError::UnexpectedArgument {
                    field: field.name.clone(),
                    keyword: rule.keyword().to_owned(),
                    argument: argument.to_owned(),
                });
            }
            _ => {}
        }

        let resolution = resolver(&RuleContext {
            record,
            field,
            rule,
            keyword,
        })?;
        tracing::trace!(
            record = %record.name,
            field = %field.name,
            rule = %rule,
            ?resolution,
            "resolved rule"
        );
        Ok(resolution)
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self
            .table
            .keys()
            .map(|(keyword, kind)| format!("{keyword}:{kind}"))
            .collect();
        entries.sort();
        f.debug_struct("RuleRegistry")
            .field("rules", &entries)
            .finish()
    }
}

// ============================================================================
// BUILT-IN RESOLVERS
// ============================================================================

fn check(check: Check) -> Result<Resolution, RuleResolutionError> {
    Ok(Resolution::Check(check))
}

fn resolve_regex(cx: &RuleContext<'_>) -> Result<Resolution, RuleResolutionError> {
    let regex = tagval_validator::validators::compiled(cx.argument()).map_err(|e| {
        RuleResolutionError::InvalidPattern {
            field: cx.field.name.clone(),
            pattern: cx.argument().to_owned(),
            reason: e.to_string(),
        }
    })?;
    check(Check::Regex(Pattern { regex }))
}

fn integer_bound(cx: &RuleContext<'_>) -> Result<i64, RuleResolutionError> {
    let bound: i64 = cx
        .argument()
        .parse()
        .map_err(|_| cx.invalid_argument("an integer"))?;

    if cx.field.kind == FieldKind::Integer {
        let type_name = cx.field.type_name.as_str();
        if let Some((min, max)) = integer_range(type_name) {
            if !(min..=max).contains(&i128::from(bound)) {
                return Err(RuleResolutionError::OutOfRange {
                    field: cx.field.name.clone(),
                    keyword: cx.keyword.as_str().to_owned(),
                    argument: cx.argument().to_owned(),
                    type_name: type_name.to_owned(),
                });
            }
        }
    }
    Ok(bound)
}

/// Value range of a Rust integer type, by name. `None` for anything else,
/// including the empty name of an untyped field.
fn integer_range(type_name: &str) -> Option<(i128, i128)> {
    let name = type_name.rsplit("::").next().unwrap_or(type_name);
    Some(match name {
        "i8" => (i8::MIN.into(), i8::MAX.into()),
        "i16" => (i16::MIN.into(), i16::MAX.into()),
        "i32" => (i32::MIN.into(), i32::MAX.into()),
        "i64" => (i64::MIN.into(), i64::MAX.into()),
        "i128" => (i128::MIN, i128::MAX),
        "isize" => (isize::MIN as i128, isize::MAX as i128),
        "u8" => (0, u8::MAX.into()),
        "u16" => (0, u16::MAX.into()),
        "u32" => (0, u32::MAX.into()),
        "u64" => (0, u64::MAX.into()),
        "u128" => (0, i128::MAX),
        "usize" => (0, usize::MAX as i128),
        _ => return None,
    })
}

fn length_bound(cx: &RuleContext<'_>) -> Result<usize, RuleResolutionError> {
    let bound = integer_bound(cx)?;
    usize::try_from(bound).map_err(|_| cx.invalid_argument("a non-negative length"))
}

fn resolve_equals(cx: &RuleContext<'_>) -> Result<Resolution, RuleResolutionError> {
    let target = cx.argument();
    let Some(sibling) = cx.record.field(target) else {
        return Err(RuleResolutionError::UnknownSibling {
            field: cx.field.name.clone(),
            target: target.to_owned(),
        });
    };
    if sibling.kind != cx.field.kind {
        return Err(RuleResolutionError::SiblingKindMismatch {
            field: cx.field.name.clone(),
            target: target.to_owned(),
            kind: cx.field.kind,
            target_kind: sibling.kind,
        });
    }
    // both sides are passed by reference to one generic comparison
    let (type_name, target_type) = (&cx.field.type_name, &sibling.type_name);
    if !type_name.is_empty() && !target_type.is_empty() && type_name != target_type {
        return Err(RuleResolutionError::SiblingTypeMismatch {
            field: cx.field.name.clone(),
            target: target.to_owned(),
            type_name: type_name.clone(),
            target_type: target_type.clone(),
        });
    }
    check(Check::EqualsField(target.to_owned()))
}
