use proc_macro::TokenStream;
use proc_macro2::Span;
use tagval_codegen::CompileError;

/// Convert `syn::Error` into a TokenStream that emits a compiler error.
pub fn to_compile_error(err: syn::Error) -> TokenStream {
    err.to_compile_error().into()
}

/// Create a `syn::Error` spanned on `tokens`.
pub fn error_spanned<T: quote::ToTokens>(tokens: &T, msg: impl Into<String>) -> syn::Error {
    syn::Error::new_spanned(tokens, msg.into())
}

/// Turn a plan compile error into a diagnostic.
///
/// `locate` maps a field name to the span of its tag, falling back to
/// `fallback` when the error names no field or the field is unknown.
pub fn compile_error(
    err: &CompileError,
    locate: impl Fn(&str) -> Option<Span>,
    fallback: Span,
) -> syn::Error {
    let span = err.field().and_then(locate).unwrap_or(fallback);
    syn::Error::new(span, err.to_string())
}
