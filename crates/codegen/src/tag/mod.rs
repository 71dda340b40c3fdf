//! Tag grammar.
//!
//! A tag is a comma-separated list of rules. Each rule is a bare keyword
//! (`req`) or a keyword with one argument (`min(3)`, `equals(Password)`).
//! Arguments cannot contain commas or parentheses.

mod parser;
mod rule;

pub use parser::parse_tag;
pub use rule::{Rule, Tag};
