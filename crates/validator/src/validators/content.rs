//! String content validators
//!
//! Presence and syntax checks for text fields: `req`, `email`, `url`, `ip`.

use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;

use crate::macros::primitive;

// ============================================================================
// NOT EMPTY
// ============================================================================

primitive! {
    /// Passes iff the input is not the empty string.
    ///
    /// Whitespace counts as content.
    pub fn is_not_empty(input: &str) as "not_empty";
    rule { !input.is_empty() }
    message { "input cannot be empty" }
}

// ============================================================================
// EMAIL
// ============================================================================

/// An RFC 5322 mailbox: a dot-atom address, bare or in angle brackets after
/// an optional display name of atoms and quoted strings.
static MAILBOX: LazyLock<Regex> = LazyLock::new(|| {
    let atom = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";
    let label = r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?";
    let address = format!(r"{atom}(?:\.{atom})*@{label}(?:\.{label})*");
    let word = format!(r#"(?:{atom}|"(?:[^"\\]|\\.)*")"#);
    Regex::new(&format!(
        r"^(?:(?:{word}(?:\s+{word})*\s*)?<(?P<angle>{address})>|(?P<bare>{address}))$"
    ))
    .expect("mailbox pattern is valid")
});

const MAX_DOMAIN_LEN: usize = 253;

primitive! {
    /// Passes iff the input is a mail address.
    ///
    /// Accepts a bare `local@domain` address or a `Display Name <local@domain>`
    /// mailbox.
    pub fn is_email(input: &str) as "email";
    rule { mailbox_address(input).is_some() }
    message { "email is not valid" }
}

/// The address part of a mailbox.
fn mailbox_address(input: &str) -> Option<&str> {
    let captures = MAILBOX.captures(input.trim())?;
    let address = captures
        .name("angle")
        .or_else(|| captures.name("bare"))?
        .as_str();
    let (_, domain) = address.rsplit_once('@')?;
    (domain.len() <= MAX_DOMAIN_LEN).then_some(address)
}

// ============================================================================
// URL
// ============================================================================

primitive! {
    /// Passes iff the input parses as an absolute URL (scheme required).
    pub fn is_url(input: &str) as "url";
    rule { url::Url::parse(input).is_ok() }
    message { "web address is not valid" }
}

// ============================================================================
// IP
// ============================================================================

primitive! {
    /// Passes iff the input is an IPv4 or IPv6 literal.
    pub fn is_ip(input: &str) as "ip";
    rule { input.parse::<IpAddr>().is_ok() }
    message { "IP is not valid" }
}

// ============================================================================
// TESTS
// ============================================================================
