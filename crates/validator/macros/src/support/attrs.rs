use proc_macro2::Span;
use syn::{
    Attribute, Ident, LitStr, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Parsed contents of every `#[tagval(...)]` on one field.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single item inside `#[tagval(...)]`.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// The tag itself: `#[tagval("req,email")]`.
    Tag(LitStr),
    /// Key-value pair like `tag = "req"`.
    KeyValue { key: Ident, value: LitStr },
    /// A flag like `skip`.
    Flag(Ident),
}

impl AttrArgs {
    /// The field's tag text, joining every tag item in attribute order.
    ///
    /// Returns the span of the first tag literal alongside.
    pub fn tag(&self) -> Option<(String, Span)> {
        let mut parts = self.items.iter().filter_map(|item| match item {
            AttrItem::Tag(lit) => Some(lit),
            AttrItem::KeyValue { key, value } if key == "tag" => Some(value),
            _ => None,
        });
        let first = parts.next()?;
        let mut text = first.value();
        for lit in parts {
            text.push(',');
            text.push_str(&lit.value());
        }
        Some((text, first.span()))
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Reject flags and keys other than the ones listed.
    pub fn allow_only(&self, flags: &[&str], keys: &[&str]) -> Result<()> {
        for item in &self.items {
            match item {
                AttrItem::Flag(f) if !flags.iter().any(|allowed| f == allowed) => {
                    return Err(diag::error_spanned(f, format!("unknown flag `{f}`")));
                }
                AttrItem::KeyValue { key, .. } if !keys.iter().any(|allowed| key == allowed) => {
                    return Err(diag::error_spanned(key, format!("unknown key `{key}`")));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Parse one attribute if it is `#[expected(...)]`.
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::Path(_) | Meta::NameValue(_) => Err(diag::error_spanned(
            attr,
            format!("expected #[{expected}(\"...\")]"),
        )),
    }
}

/// Parse all attributes of a given name and merge them in order.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
            .into_iter()
            .map(|x| x.0)
            .collect();
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self(AttrItem::Tag(input.parse()?)));
        }

        let key: Ident = input.parse()?;
        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}
