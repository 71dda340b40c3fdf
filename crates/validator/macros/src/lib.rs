//! # tagval-macros
//!
//! `#[derive(Validate)]` for structs whose fields carry validation tags.
//!
//! ```ignore
//! use tagval_macros::Validate;
//! use tagval_validator::Validate as _;
//!
//! #[derive(Validate)]
//! pub struct Signup {
//!     #[tagval("req")]
//!     name: String,
//!     #[tagval("req,email")]
//!     email: String,
//!     #[tagval("min(7),max(64)")]
//!     password: String,
//!     #[tagval("req,equals(password)")]
//!     confirm: String,
//!     #[tagval("min(17)")]
//!     age: u8,
//!     #[tagval("obj")]
//!     address: Address,
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod support;
mod validate;

/// Derive macro for the `tagval_validator::Validate` trait.
///
/// # Field attributes
///
/// - `#[tagval("rules")]` - Comma-separated rules, applied in order
/// - `#[tagval(tag = "rules")]` - Same, in key-value form
/// - `#[tagval(skip)]` - Leave the field out entirely
///
/// Several `#[tagval]` attributes on one field are joined in order.
///
/// # Rules
///
/// | rule | `String` / `&str` | integers | other types |
/// |------|-------------------|----------|-------------|
/// | `req` | not empty | | |
/// | `email`, `url`, `ip` | syntax check | | |
/// | `regex(P)` | matches `P` | | |
/// | `min(N)` / `max(N)` | length `>` / `<` N | value `>` / `<` N | |
/// | `equals(F)` | equals field `F` | equals field `F` | |
/// | `obj` / `validate` | | | calls the field's own `Validate` |
///
/// `bool`, `char` and floats accept no rules. Any type that is not a string,
/// integer or one of those primitives is treated as a nested record; it must
/// implement `Validate` itself when tagged `obj`. `Option<T>`, `Box<T>` and
/// `Vec<T>` of such records work through the runtime's blanket impls.
///
/// Invalid tags are compile errors pointing at the tag.
///
/// # Example
///
/// ```ignore
/// #[derive(Validate)]
/// struct BarSubStruct {
///     #[tagval("req,ip")]
///     ip: String,
///     port: u16,
/// }
/// ```
#[proc_macro_derive(Validate, attributes(tagval))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    validate::derive(input)
}
