//! Interpretation mode: running a plan against a live [`Record`].

use tagval_validator::validators::{
    is_email, is_equal_to, is_greater_than, is_ip, is_length_greater_than, is_length_less_than,
    is_less_than, is_not_empty, is_url, satisfies_compiled,
};
use tagval_validator::{ValidationMessage, ValidationOutcome, ValidationResult};

use super::{Action, NestedPlan, PlanStep, ValidationPlan};
use crate::descriptor::FieldKind;
use crate::record::{FieldValue, Record};
use crate::registry::Check;

impl ValidationPlan {
    /// Runs every step against `record` and returns the accumulated result.
    ///
    /// Every step runs even after earlier ones fail. Missing fields and
    /// values of the wrong shape are reported as failures, never panics.
    pub fn execute(&self, record: &dyn Record) -> ValidationResult {
        let mut result = ValidationResult::success();
        for step in &self.steps {
            match &step.action {
                Action::Check(check) => result.push(run_check(step, check, record)),
                Action::Nested(nested) => run_nested(step, nested, record, &mut result),
            }
        }
        result
    }
}

fn run_check(step: &PlanStep, check: &Check, record: &dyn Record) -> ValidationOutcome {
    let field = step.field.as_str();
    let value = record.field(field).ok_or_else(|| missing_field(field))?;

    match check {
        Check::NotEmpty => is_not_empty(field, text(field, value)?),
        Check::Email => is_email(field, text(field, value)?),
        Check::Url => is_url(field, text(field, value)?),
        Check::Ip => is_ip(field, text(field, value)?),
        Check::Regex(pattern) => satisfies_compiled(field, text(field, value)?, pattern.regex()),
        Check::LengthGreaterThan(n) => is_length_greater_than(field, text(field, value)?, *n),
        Check::LengthLessThan(n) => is_length_less_than(field, text(field, value)?, *n),
        Check::GreaterThan(n) => is_greater_than(field, integer(field, value)?, i128::from(*n)),
        Check::LessThan(n) => is_less_than(field, integer(field, value)?, i128::from(*n)),
        Check::EqualsField(other) => {
            let other_value = record.field(other).ok_or_else(|| missing_field(other))?;
            if step.kind == FieldKind::Integer {
                is_equal_to(
                    field,
                    other,
                    &integer(field, value)?,
                    &integer(other, other_value)?,
                )
            } else {
                is_equal_to(field, other, text(field, value)?, text(other, other_value)?)
            }
        }
    }
}

fn run_nested(
    step: &PlanStep,
    nested: &NestedPlan,
    record: &dyn Record,
    result: &mut ValidationResult,
) {
    let field = step.field.as_str();
    match nested {
        NestedPlan::Resolved(plan) => match record.field(field) {
            Some(FieldValue::Record(inner)) => result.append(plan.execute(inner)),
            // an absent nested record has nothing to check
            Some(FieldValue::Null) => {}
            Some(other) => result.push(Err(type_mismatch(field, FieldKind::NestedRecord, other))),
            None => result.push(Err(missing_field(field))),
        },
        NestedPlan::Deferred { type_name } => result.push(Err(ValidationMessage::new(
            field,
            "unresolved_record",
            format!("no plan is available for nested record `{type_name}`"),
        ))),
    }
}

fn text<'a>(field: &str, value: FieldValue<'a>) -> Result<&'a str, ValidationMessage> {
    match value {
        FieldValue::Text(s) => Ok(s),
        other => Err(type_mismatch(field, FieldKind::Text, other)),
    }
}

fn integer(field: &str, value: FieldValue<'_>) -> Result<i128, ValidationMessage> {
    match value {
        FieldValue::Integer(n) => Ok(n),
        other => Err(type_mismatch(field, FieldKind::Integer, other)),
    }
}

fn missing_field(field: &str) -> ValidationMessage {
    ValidationMessage::new(field, "missing_field", "field is missing")
}

fn type_mismatch(field: &str, expected: FieldKind, found: FieldValue<'_>) -> ValidationMessage {
    ValidationMessage::new(
        field,
        "type_mismatch",
        format!("expected a {expected} value, found {}", found.shape()),
    )
}
