use crate::error::{MalformedTagError, TagSyntax};

use super::rule::Rule;

/// Parses a raw tag into its rules, preserving order and duplicates.
///
/// An empty or all-whitespace tag yields no rules. Whitespace around
/// tokens, keywords and arguments is ignored.
///
/// ```rust
/// use tagval_codegen::tag::{parse_tag, Rule};
///
/// let rules = parse_tag("Age", "min(18), max(65)").unwrap();
/// assert_eq!(rules, vec![Rule::with_argument("min", "18"), Rule::with_argument("max", "65")]);
/// ```
pub fn parse_tag(field: &str, tag: &str) -> Result<Vec<Rule>, MalformedTagError> {
    if tag.trim().is_empty() {
        return Ok(Vec::new());
    }

    tag.split(',')
        .map(|token| {
            parse_token(token.trim()).map_err(|reason| MalformedTagError {
                field: field.to_owned(),
                tag: tag.to_owned(),
                token: token.trim().to_owned(),
                reason,
            })
        })
        .collect()
}

fn parse_token(token: &str) -> Result<Rule, TagSyntax> {
    if token.is_empty() {
        return Err(TagSyntax::EmptyToken);
    }

    let Some(open) = token.find('(') else {
        if token.contains(')') {
            return Err(TagSyntax::UnexpectedParen);
        }
        return keyword(token).map(Rule::new);
    };

    let name = keyword(token[..open].trim())?;
    let rest = &token[open + 1..];

    let Some(close) = rest.find(')') else {
        return Err(if rest.contains('(') {
            TagSyntax::NestedParen
        } else {
            TagSyntax::UnclosedParen
        });
    };

    let argument = &rest[..close];
    if argument.contains('(') {
        return Err(TagSyntax::NestedParen);
    }

    let trailing = rest[close + 1..].trim();
    if !trailing.is_empty() {
        return Err(if trailing.contains(')') {
            TagSyntax::UnexpectedParen
        } else {
            TagSyntax::TrailingText
        });
    }

    let argument = argument.trim();
    if argument.is_empty() {
        return Err(TagSyntax::EmptyArgument);
    }

    Ok(Rule::with_argument(name, argument))
}

fn keyword(name: &str) -> Result<&str, TagSyntax> {
    if name.is_empty() {
        Err(TagSyntax::MissingKeyword)
    } else if name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(TagSyntax::InvalidKeyword)
    }
}
