use std::collections::HashMap;

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Type, WherePredicate, parse_macro_input, parse_quote};
use tagval_codegen::plan::Action;
use tagval_codegen::{
    FieldDescriptor, GeneratorConfig, NestingMode, PlanCompiler, RecordDescriptor, RustEmitter,
    Schema,
};

use crate::support::{attrs, diag, utils};

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let Described {
        record,
        spans,
        types,
    } = describe(input)?;

    // nested types are not visible to a derive; they validate themselves
    let schema = Schema::default();
    let locate = |field: &str| spans.get(field).copied();
    let plan = PlanCompiler::new(&schema)
        .with_nesting(NestingMode::Defer)
        .compile_record(&record)
        .map_err(|e| diag::compile_error(&e, locate, struct_name.span()))?;

    let mut generics = input.generics.clone();
    let body = match plan {
        Some(plan) => {
            if !generics.params.is_empty() {
                // generic nested fields must validate themselves
                let bounds: Vec<WherePredicate> = plan
                    .steps()
                    .iter()
                    .filter(|step| matches!(step.action, Action::Nested(_)))
                    .filter_map(|step| types.get(&step.field))
                    .map(|ty| parse_quote!(#ty: ::tagval_validator::Validate))
                    .collect();
                generics.make_where_clause().predicates.extend(bounds);
            }

            let config = GeneratorConfig::default();
            RustEmitter::new(&config)
                .emit_body(&plan)
                .map_err(|e| diag::compile_error(&e, locate, struct_name.span()))?
                .parse::<TokenStream2>()
                .map_err(|e| {
                    syn::Error::new(struct_name.span(), format!("generated validator: {e}"))
                })?
        }
        None => quote! { ::tagval_validator::ValidationResult::success() },
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::tagval_validator::Validate for #struct_name #ty_generics #where_clause {
            fn validate(&self) -> ::tagval_validator::ValidationResult {
                #body
            }
        }
    })
}

/// A struct as the plan compiler sees it.
struct Described {
    record: RecordDescriptor,
    /// Span of each field's tag, for diagnostics.
    spans: HashMap<String, Span>,
    types: HashMap<String, Type>,
}

fn describe(input: &DeriveInput) -> syn::Result<Described> {
    let fields = utils::require_named_fields(input)?;
    let mut record = RecordDescriptor::new(input.ident.unraw().to_string(), "");
    let mut spans = HashMap::new();
    let mut types = HashMap::new();

    for field in &fields.named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let args = attrs::parse_attrs(&field.attrs, "tagval")?;
        args.allow_only(&["skip"], &["tag"])?;
        if args.has_flag("skip") {
            continue;
        }

        let name = ident.unraw().to_string();
        let tag = match args.tag() {
            Some((tag, span)) => {
                spans.insert(name.clone(), span);
                tag
            }
            None => {
                spans.insert(name.clone(), ident.span());
                String::new()
            }
        };

        types.insert(name.clone(), field.ty.clone());
        record.fields.push(
            FieldDescriptor::new(name, utils::infer_kind(&field.ty), tag)
                .with_type_name(utils::type_name(&field.ty)),
        );
    }

    Ok(Described {
        record,
        spans,
        types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tagval_codegen::FieldKind;

    fn foo() -> DeriveInput {
        parse_quote! {
            struct FooStruct {
                #[tagval("req")]
                name: String,
                #[tagval("req,email")]
                email: String,
                #[tagval("min(3),max(11)")]
                password: String,
                #[tagval("req,equals(password)")]
                confirm_pass: String,
                #[tagval("min(18),max(65)")]
                age: i32,
                #[tagval("obj")]
                sub: BarSubStruct,
                note: String,
            }
        }
    }

    #[test]
    fn describes_fields_in_order() {
        let record = describe(&foo()).unwrap().record;
        let summary: Vec<(&str, FieldKind, &str)> = record
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.kind, f.tag.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("name", FieldKind::Text, "req"),
                ("email", FieldKind::Text, "req,email"),
                ("password", FieldKind::Text, "min(3),max(11)"),
                ("confirm_pass", FieldKind::Text, "req,equals(password)"),
                ("age", FieldKind::Integer, "min(18),max(65)"),
                ("sub", FieldKind::NestedRecord, "obj"),
                ("note", FieldKind::Text, ""),
            ]
        );
        assert_eq!(record.fields[5].type_name, "BarSubStruct");
    }

    #[test]
    fn body_matches_manifest_generation() {
        let derived = expand(&foo()).unwrap();

        // the same record described by a manifest, with its nested record resolved
        let schema = Schema::new([
            RecordDescriptor::new("FooStruct", "tests")
                .with_field(FieldDescriptor::new("name", FieldKind::Text, "req"))
                .with_field(FieldDescriptor::new("email", FieldKind::Text, "req,email"))
                .with_field(FieldDescriptor::new(
                    "password",
                    FieldKind::Text,
                    "min(3),max(11)",
                ))
                .with_field(FieldDescriptor::new(
                    "confirm_pass",
                    FieldKind::Text,
                    "req,equals(password)",
                ))
                .with_field(FieldDescriptor::new("age", FieldKind::Integer, "min(18),max(65)"))
                .with_field(FieldDescriptor::nested("sub", "BarSubStruct", "obj")),
            RecordDescriptor::new("BarSubStruct", "tests")
                .with_field(FieldDescriptor::new("ip", FieldKind::Text, "req,ip")),
        ]);
        let plan = PlanCompiler::new(&schema)
            .compile("FooStruct")
            .unwrap()
            .unwrap();
        let config = GeneratorConfig::default();
        let body: TokenStream2 = RustEmitter::new(&config)
            .emit_body(&plan)
            .unwrap()
            .parse()
            .unwrap();

        let expected = quote! {
            #[automatically_derived]
            impl ::tagval_validator::Validate for FooStruct {
                fn validate(&self) -> ::tagval_validator::ValidationResult {
                    #body
                }
            }
        };
        assert_eq!(derived.to_string(), expected.to_string());
    }

    #[test]
    fn untagged_struct_always_passes() {
        let input: DeriveInput = parse_quote! {
            struct Plain {
                note: String,
            }
        };
        let derived = expand(&input).unwrap().to_string();
        assert!(derived.contains("ValidationResult :: success ()"), "{derived}");
        assert!(!derived.contains("result"), "{derived}");
    }

    #[test]
    fn skipped_fields_are_not_described() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval(skip)]
                cache: String,
                #[tagval("req")]
                name: String,
            }
        };
        let record = describe(&input).unwrap().record;
        assert_eq!(record.fields.len(), 1);
        assert_eq!(record.fields[0].name, "name");
    }

    #[test]
    fn raw_identifiers_are_unescaped() {
        let input: DeriveInput = parse_quote! {
            struct Item {
                #[tagval("req")]
                r#type: String,
            }
        };
        let record = describe(&input).unwrap().record;
        assert_eq!(record.fields[0].name, "type");
        let derived = expand(&input).unwrap().to_string();
        assert!(derived.contains("r#type"), "{derived}");
    }

    #[test]
    fn generics_are_carried_over() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T: Clone> {
                #[tagval("obj")]
                inner: T,
            }
        };
        let derived = expand(&input).unwrap().to_string();
        assert!(derived.contains("impl < T : Clone >"), "{derived}");
        assert!(derived.contains("for Wrapper < T >"), "{derived}");
        assert!(
            derived.contains("where T : :: tagval_validator :: Validate"),
            "{derived}"
        );
    }

    #[test]
    fn malformed_tag_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("min(")]
                age: u32,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("malformed tag on field `age`"), "{error}");
    }

    #[test]
    fn unsupported_rule_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("email")]
                age: u32,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("`email`") && error.contains("integer"), "{error}");
    }

    #[test]
    fn equals_needs_an_existing_sibling() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("equals(missing)")]
                confirm: String,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("names no field"), "{error}");
    }

    #[test]
    fn non_numeric_bound_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("min(ten)")]
                count: u8,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("expects an integer"), "{error}");
    }

    #[test]
    fn bound_outside_the_field_type_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("min(-1)")]
                age: u8,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("`min(-1)`") && error.contains("`u8`"), "{error}");

        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("max(300)")]
                age: u8,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("out of range for `u8`"), "{error}");
    }

    #[test]
    fn bound_at_the_type_limit_is_accepted() {
        let input: DeriveInput = parse_quote! {
            struct S {
                #[tagval("min(0),max(255)")]
                age: u8,
            }
        };
        let derived = expand(&input).unwrap().to_string();
        assert!(derived.contains("is_less_than (\"age\" , self . age , 255)"), "{derived}");
    }

    #[test]
    fn equals_across_integer_widths_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S {
                age: u8,
                #[tagval("equals(age)")]
                other: u16,
            }
        };
        let error = expand(&input).unwrap_err().to_string();
        assert!(error.contains("`u16`") && error.contains("`u8`"), "{error}");
    }

    #[test]
    fn equals_between_string_and_str_is_reported() {
        let input: DeriveInput = parse_quote! {
            struct S<'a> {
                name: &'a str,
                #[tagval("equals(name)")]
                copy: String,
            }
        };
        assert!(expand(&input).is_err());
    }

    #[test]
    fn enums_are_rejected() {
        let input: DeriveInput = parse_quote! {
            enum E { A }
        };
        assert!(expand(&input).is_err());
    }
}
