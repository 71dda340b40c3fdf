//! Primitive validators
//!
//! Every primitive is a pure function taking the field name first and
//! returning a [`ValidationOutcome`](crate::foundation::ValidationOutcome).
//! Generated validators call these by path, so their names and argument
//! order are part of the crate's public contract.
//!
//! | tag | text field | integer field |
//! |---|---|---|
//! | `req` | [`is_not_empty`] | |
//! | `email` | [`is_email`] | |
//! | `url` | [`is_url`] | |
//! | `ip` | [`is_ip`] | |
//! | `regex(P)` | [`satisfies_regex`] | |
//! | `min(N)` | [`is_length_greater_than`] | [`is_greater_than`] |
//! | `max(N)` | [`is_length_less_than`] | [`is_less_than`] |
//! | `equals(F)` | [`is_equal_to`] | [`is_equal_to`] |

pub mod content;
pub mod equality;
pub mod length;
pub mod pattern;
pub mod range;

pub use content::{is_email, is_ip, is_not_empty, is_url};
pub use equality::is_equal_to;
pub use length::{is_length_greater_than, is_length_less_than};
pub use pattern::{compiled, satisfies_compiled, satisfies_regex};
pub use range::{is_greater_than, is_less_than};
