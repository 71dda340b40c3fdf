//! Validation plans: the compiled, ordered checks for one record shape.
//!
//! A plan is built once per record and reused for every instance. It can be
//! executed directly against a [`Record`](crate::record::Record) or rendered
//! to Rust source by the [`emit`](crate::emit) module.

mod compiler;
mod exec;

use std::sync::Arc;

pub use compiler::{NestingMode, PlanCompiler, PlanSet};

use crate::descriptor::FieldKind;
use crate::registry::Check;
use crate::tag::Rule;

// ============================================================================
// PLAN
// ============================================================================

/// The ordered checks for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPlan {
    record: String,
    namespace: String,
    steps: Vec<PlanStep>,
}

impl ValidationPlan {
    pub(crate) fn new(record: String, namespace: String, steps: Vec<PlanStep>) -> Self {
        Self {
            record,
            namespace,
            steps,
        }
    }

    /// Name of the record this plan validates.
    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Steps in field declaration order, then tag order within a field.
    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

// ============================================================================
// STEPS
// ============================================================================

/// One bound invocation: a field, the rule it came from, and what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanStep {
    pub field: String,
    pub kind: FieldKind,
    pub rule: Rule,
    pub action: Action,
}

/// What a step runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A primitive check on the field's value.
    Check(Check),
    /// The nested record's own validation, folded into the parent result.
    Nested(NestedPlan),
}

/// How a nested step reaches the nested record's checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedPlan {
    /// The nested record's plan, compiled and shared.
    Resolved(Arc<ValidationPlan>),
    /// The nested type validates itself through its own `Validate` impl.
    Deferred { type_name: String },
}
