//! Generation mode: rendering plans as Rust source.
//!
//! Each plan becomes one `Validate` impl that builds a successful result,
//! pushes every primitive call in plan order and appends nested results.

use std::fmt::Write as _;

use crate::config::GeneratorConfig;
use crate::descriptor::Schema;
use crate::error::CompileError;
use crate::plan::{Action, PlanCompiler, PlanStep, ValidationPlan};
use crate::registry::Check;

// ============================================================================
// FILES
// ============================================================================

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub namespace: String,
    pub file_name: String,
    pub contents: String,
}

/// Compiles every record of `schema` and renders one file per namespace.
///
/// Namespaces without any plan get no file, so an untagged schema yields an
/// empty list.
pub fn generate(
    schema: &Schema,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedFile>, CompileError> {
    let plans = PlanCompiler::new(schema).compile_all()?;
    let emitter = RustEmitter::new(config);

    let files: Vec<GeneratedFile> = plans
        .by_namespace()
        .into_iter()
        .map(|(namespace, group)| {
            Ok(GeneratedFile {
                namespace: namespace.to_owned(),
                file_name: config.file_name(namespace),
                contents: emitter
                    .emit_file(namespace, group.into_iter().map(|plan| plan.as_ref()))?,
            })
        })
        .collect::<Result<_, CompileError>>()?;

    tracing::debug!(files = files.len(), records = plans.len(), "generated validators");
    Ok(files)
}

// ============================================================================
// EMITTER
// ============================================================================

/// Renders plans as Rust source.
#[derive(Debug, Clone, Copy)]
pub struct RustEmitter<'c> {
    config: &'c GeneratorConfig,
}

impl<'c> RustEmitter<'c> {
    pub fn new(config: &'c GeneratorConfig) -> Self {
        Self { config }
    }

    /// The statements of the `validate` method, without indentation.
    ///
    /// Fails when a field name cannot be written as a Rust identifier.
    pub fn emit_body(&self, plan: &ValidationPlan) -> Result<String, CompileError> {
        let rt = &self.config.runtime_path;
        let mut out = format!("let mut result = {rt}::ValidationResult::success();\n");

        let mut current: Option<&str> = None;
        for step in plan.steps() {
            if current != Some(step.field.as_str()) {
                let _ = write!(out, "\n// Field: {}\n", step.field);
                current = Some(step.field.as_str());
            }
            out.push_str(&self.statement(plan, step)?);
            out.push('\n');
        }

        out.push_str("\nresult\n");
        Ok(out)
    }

    /// A complete `Validate` impl for the plan's record.
    pub fn emit_impl(&self, plan: &ValidationPlan) -> Result<String, CompileError> {
        let rt = &self.config.runtime_path;
        let record = identifier(plan.record(), plan.record())?;
        let mut out = String::new();
        let _ = writeln!(out, "impl {rt}::Validate for {record} {{");
        let _ = writeln!(out, "    fn validate(&self) -> {rt}::ValidationResult {{");
        for line in self.emit_body(plan)?.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                let _ = writeln!(out, "        {line}");
            }
        }
        out.push_str("    }\n}\n");
        Ok(out)
    }

    /// One generated file holding the impls of `plans`.
    pub fn emit_file<'p, I>(&self, namespace: &str, plans: I) -> Result<String, CompileError>
    where
        I: IntoIterator<Item = &'p ValidationPlan>,
    {
        let mut out = String::new();
        if self.config.header {
            out.push_str("// Code generated by tagval. DO NOT EDIT.\n");
            if !namespace.is_empty() {
                let _ = writeln!(out, "// Namespace: {namespace}");
            }
            out.push('\n');
        }
        for (i, plan) in plans.into_iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&self.emit_impl(plan)?);
        }
        Ok(out)
    }

    fn statement(&self, plan: &ValidationPlan, step: &PlanStep) -> Result<String, CompileError> {
        let rt = &self.config.runtime_path;
        let name = &step.field;
        let value = format!("self.{}", identifier(plan.record(), name)?);

        let check = match &step.action {
            Action::Nested(_) => {
                return Ok(format!("result.append({rt}::Validate::validate(&{value}));"));
            }
            Action::Check(check) => check,
        };

        let call = match check {
            Check::NotEmpty => format!("is_not_empty({name:?}, &{value})"),
            Check::Email => format!("is_email({name:?}, &{value})"),
            Check::Url => format!("is_url({name:?}, &{value})"),
            Check::Ip => format!("is_ip({name:?}, &{value})"),
            Check::Regex(pattern) => {
                format!("satisfies_regex({name:?}, &{value}, {:?})", pattern.as_str())
            }
            Check::LengthGreaterThan(n) => format!("is_length_greater_than({name:?}, &{value}, {n})"),
            Check::LengthLessThan(n) => format!("is_length_less_than({name:?}, &{value}, {n})"),
            Check::GreaterThan(n) => format!("is_greater_than({name:?}, {value}, {n})"),
            Check::LessThan(n) => format!("is_less_than({name:?}, {value}, {n})"),
            Check::EqualsField(other) => format!(
                "is_equal_to({name:?}, {other:?}, &{value}, &self.{})",
                identifier(plan.record(), other)?
            ),
        };
        Ok(format!("result.push({rt}::validators::{call});"))
    }
}

/// `name` as Rust source, raw-escaped when it is a keyword.
///
/// Names that are not identifiers, and the keywords that cannot be raw
/// (`self`, `Self`, `super`, `crate`, `_`), are rejected.
fn identifier(record: &str, name: &str) -> Result<String, CompileError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first == '_' || first.is_alphabetic())
        && chars.all(|c| c == '_' || c.is_alphanumeric())
        && !matches!(name, "_" | "self" | "Self" | "super" | "crate");

    if !valid {
        return Err(CompileError::InvalidIdentifier {
            record: record.to_owned(),
            name: name.to_owned(),
        });
    }
    if is_keyword(name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(name.to_owned())
    }
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "as" | "break"
            | "const"
            | "continue"
            | "else"
            | "enum"
            | "extern"
            | "false"
            | "fn"
            | "for"
            | "if"
            | "impl"
            | "in"
            | "let"
            | "loop"
            | "match"
            | "mod"
            | "move"
            | "mut"
            | "pub"
            | "ref"
            | "return"
            | "static"
            | "struct"
            | "trait"
            | "true"
            | "type"
            | "unsafe"
            | "use"
            | "where"
            | "while"
            | "async"
            | "await"
            | "dyn"
            | "abstract"
            | "become"
            | "box"
            | "do"
            | "final"
            | "macro"
            | "override"
            | "priv"
            | "typeof"
            | "unsized"
            | "virtual"
            | "yield"
            | "try"
            | "gen"
    )
}
