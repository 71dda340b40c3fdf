use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, Type};
use tagval_codegen::FieldKind;

const TEXT: &[&str] = &["String", "str"];

const INTEGERS: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
];

const OTHER_PRIMITIVES: &[&str] = &["bool", "char", "f32", "f64"];

/// Return named fields if the input is a struct with them; otherwise error.
pub fn require_named_fields(input: &DeriveInput) -> syn::Result<&syn::FieldsNamed> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Validate)] can only be used on structs",
        ));
    };
    match &data.fields {
        Fields::Named(named) => Ok(named),
        fields @ (Fields::Unnamed(_) | Fields::Unit) => Err(syn::Error::new(
            fields.span(),
            "#[derive(Validate)] requires a struct with named fields",
        )),
    }
}

/// Infer a field's value kind from its Rust type.
///
/// Strings are text, integer primitives are integers, other primitives have
/// no rules, and everything else is treated as a nested record.
pub fn infer_kind(ty: &Type) -> FieldKind {
    if is_type(ty, TEXT) {
        FieldKind::Text
    } else if is_type(ty, INTEGERS) {
        FieldKind::Integer
    } else if is_type(ty, OTHER_PRIMITIVES) {
        FieldKind::Other
    } else {
        FieldKind::NestedRecord
    }
}

/// The type as written, without whitespace between tokens.
pub fn type_name(ty: &Type) -> String {
    quote::quote!(#ty).to_string().replace(' ', "")
}

fn is_type(ty: &Type, names: &[&str]) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| {
                segment.arguments.is_empty() && names.iter().any(|name| segment.ident == *name)
            }),
        Type::Reference(reference) => is_type(&reference.elem, names),
        Type::Paren(paren) => is_type(&paren.elem, names),
        Type::Group(group) => is_type(&group.elem, names),
        _ => false,
    }
}
