use std::fmt;

use serde::Serialize;

use super::parser::parse_tag;
use crate::error::MalformedTagError;

/// One rule from a tag: a keyword and an optional argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    keyword: String,
    argument: Option<String>,
}

impl Rule {
    /// A bare rule such as `req`.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            argument: None,
        }
    }

    /// A rule with an argument such as `min(3)`.
    pub fn with_argument(keyword: impl Into<String>, argument: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            argument: Some(argument.into()),
        }
    }

    #[inline]
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    #[inline]
    pub fn argument(&self) -> Option<&str> {
        self.argument.as_deref()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.argument {
            Some(argument) => write!(f, "{}({argument})", self.keyword),
            None => f.write_str(&self.keyword),
        }
    }
}

/// The parsed rules of one field, in declaration order.
///
/// Displays as canonical tag text, which parses back to the same rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tag {
    rules: Vec<Rule>,
}

impl Tag {
    /// Parses `raw`, attributing errors to `field`.
    pub fn parse(field: &str, raw: &str) -> Result<Self, MalformedTagError> {
        parse_tag(field, raw).map(|rules| Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for Tag {
    fn from(rules: Vec<Rule>) -> Self {
        Self { rules }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{rule}")?;
        }
        Ok(())
    }
}
