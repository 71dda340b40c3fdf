//! Plan compiler: descriptors in, shared [`ValidationPlan`]s out.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{Action, NestedPlan, PlanStep, ValidationPlan};
use crate::descriptor::{FieldDescriptor, RecordDescriptor, Schema};
use crate::error::{CompileError, CyclicRecordError, RuleResolutionError};
use crate::registry::{Resolution, RuleRegistry};
use crate::tag::parse_tag;

/// How `obj` steps reach the nested record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingMode {
    /// Compile the nested record from the schema and share its plan.
    #[default]
    Resolve,
    /// Leave the nested record to its own `Validate` impl.
    Defer,
}

/// Compiles records of a [`Schema`] into validation plans.
///
/// ```rust
/// use tagval_codegen::descriptor::{FieldDescriptor, FieldKind, RecordDescriptor, Schema};
/// use tagval_codegen::plan::PlanCompiler;
///
/// let schema = Schema::new([RecordDescriptor::new("User", "app")
///     .with_field(FieldDescriptor::new("Age", FieldKind::Integer, "min(18),max(65)"))]);
///
/// let plan = PlanCompiler::new(&schema).compile("User").unwrap().unwrap();
/// assert_eq!(plan.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PlanCompiler<'s> {
    schema: &'s Schema,
    registry: &'s RuleRegistry,
    nesting: NestingMode,
}

#[derive(Default)]
struct CompileState {
    done: HashMap<String, Option<Arc<ValidationPlan>>>,
    visiting: Vec<String>,
}

impl<'s> PlanCompiler<'s> {
    /// A compiler using the built-in registry and [`NestingMode::Resolve`].
    pub fn new(schema: &'s Schema) -> Self {
        Self {
            schema,
            registry: RuleRegistry::builtin(),
            nesting: NestingMode::Resolve,
        }
    }

    pub fn with_registry(mut self, registry: &'s RuleRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_nesting(mut self, nesting: NestingMode) -> Self {
        self.nesting = nesting;
        self
    }

    /// Compiles the named record.
    ///
    /// Returns `Ok(None)` when the record has nothing to check.
    pub fn compile(&self, name: &str) -> Result<Option<Arc<ValidationPlan>>, CompileError> {
        let record = self
            .schema
            .get(name)
            .ok_or_else(|| CompileError::UnknownRecord(name.to_owned()))?;
        self.build(record, &mut CompileState::default())
    }

    /// Compiles a record that need not be part of the schema.
    ///
    /// Nested records are still looked up in the schema under
    /// [`NestingMode::Resolve`].
    pub fn compile_record(
        &self,
        record: &RecordDescriptor,
    ) -> Result<Option<Arc<ValidationPlan>>, CompileError> {
        self.build(record, &mut CompileState::default())
    }

    /// Compiles every record in the schema, in schema order.
    ///
    /// Nested plans are compiled once and shared. The first error aborts.
    pub fn compile_all(&self) -> Result<PlanSet, CompileError> {
        let mut state = CompileState::default();
        let mut seen = HashSet::new();
        let mut plans = Vec::new();

        for record in self.schema.records() {
            if !seen.insert(record.name.as_str()) {
                continue;
            }
            if let Some(plan) = self.build(record, &mut state)? {
                plans.push(plan);
            }
        }

        Ok(PlanSet { plans })
    }

    fn build(
        &self,
        record: &RecordDescriptor,
        state: &mut CompileState,
    ) -> Result<Option<Arc<ValidationPlan>>, CompileError> {
        if let Some(plan) = state.done.get(&record.name) {
            return Ok(plan.clone());
        }
        if let Some(start) = state.visiting.iter().position(|name| *name == record.name) {
            let mut cycle = state.visiting[start..].to_vec();
            cycle.push(record.name.clone());
            return Err(CyclicRecordError { cycle }.into());
        }

        state.visiting.push(record.name.clone());
        let steps = self.steps(record, state);
        state.visiting.pop();
        let steps = steps?;

        let plan = if steps.is_empty() {
            tracing::debug!(record = %record.name, "record has no checks, no plan");
            None
        } else {
            tracing::debug!(record = %record.name, steps = steps.len(), "compiled validation plan");
            Some(Arc::new(ValidationPlan::new(
                record.name.clone(),
                record.namespace.clone(),
                steps,
            )))
        };

        state.done.insert(record.name.clone(), plan.clone());
        Ok(plan)
    }

    fn steps(
        &self,
        record: &RecordDescriptor,
        state: &mut CompileState,
    ) -> Result<Vec<PlanStep>, CompileError> {
        let mut steps = Vec::new();

        for field in &record.fields {
            let rules =
                parse_tag(&field.name, &field.tag).map_err(|source| CompileError::MalformedTag {
                    record: record.name.clone(),
                    source,
                })?;

            for rule in rules {
                let resolution = self.registry.resolve(record, field, &rule).map_err(|source| {
                    CompileError::Resolution {
                        record: record.name.clone(),
                        source,
                    }
                })?;

                let action = match resolution {
                    Resolution::Check(check) => Action::Check(check),
                    Resolution::Descend => match self.nested(record, field, state)? {
                        Some(nested) => Action::Nested(nested),
                        None => continue,
                    },
                };

                steps.push(PlanStep {
                    field: field.name.clone(),
                    kind: field.kind,
                    rule,
                    action,
                });
            }
        }

        Ok(steps)
    }

    fn nested(
        &self,
        record: &RecordDescriptor,
        field: &FieldDescriptor,
        state: &mut CompileState,
    ) -> Result<Option<NestedPlan>, CompileError> {
        match self.nesting {
            NestingMode::Defer => Ok(Some(NestedPlan::Deferred {
                type_name: field.type_name.clone(),
            })),
            NestingMode::Resolve => {
                let Some(target) = self.schema.get(&field.type_name) else {
                    return Err(CompileError::Resolution {
                        record: record.name.clone(),
                        source: RuleResolutionError::UnknownRecord {
                            field: field.name.clone(),
                            record: field.type_name.clone(),
                        },
                    });
                };
                // a nested record without checks contributes nothing
                Ok(self.build(target, state)?.map(NestedPlan::Resolved))
            }
        }
    }
}

// ============================================================================
// PLAN SET
// ============================================================================

/// The plans of every record that has one, in schema order.
#[derive(Debug, Clone, Default)]
pub struct PlanSet {
    plans: Vec<Arc<ValidationPlan>>,
}

impl PlanSet {
    pub fn get(&self, record: &str) -> Option<&Arc<ValidationPlan>> {
        self.plans.iter().find(|plan| plan.record() == record)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Arc<ValidationPlan>> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    /// `true` when no record has anything to check; drivers skip writing output.
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    /// Plans grouped by namespace, namespaces in first-seen order.
    pub fn by_namespace(&self) -> Vec<(&str, Vec<&Arc<ValidationPlan>>)> {
        let mut groups: Vec<(&str, Vec<&Arc<ValidationPlan>>)> = Vec::new();
        for plan in &self.plans {
            match groups.iter_mut().find(|(ns, _)| *ns == plan.namespace()) {
                Some((_, group)) => group.push(plan),
                None => groups.push((plan.namespace(), vec![plan])),
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a PlanSet {
    type Item = &'a Arc<ValidationPlan>;
    type IntoIter = std::slice::Iter<'a, Arc<ValidationPlan>>;

    fn into_iter(self) -> Self::IntoIter {
        self.plans.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldKind;
    use crate::error::TagSyntax;
    use crate::registry::Check;
    use pretty_assertions::assert_eq;

    fn bar() -> RecordDescriptor {
        RecordDescriptor::new("BarSubStruct", "tests")
            .with_field(FieldDescriptor::new("IP", FieldKind::Text, "req,ip"))
            .with_field(FieldDescriptor::new("Port", FieldKind::Integer, ""))
    }

    fn foo() -> RecordDescriptor {
        RecordDescriptor::new("FooStruct", "tests")
            .with_field(FieldDescriptor::new("Name", FieldKind::Text, "req"))
            .with_field(FieldDescriptor::new("Email", FieldKind::Text, "req,email"))
            .with_field(FieldDescriptor::new("Password", FieldKind::Text, "min(3),max(11)"))
            .with_field(FieldDescriptor::new(
                "ConfirmPass",
                FieldKind::Text,
                "req,equals(Password)",
            ))
            .with_field(FieldDescriptor::new("Age", FieldKind::Integer, "min(18),max(65)"))
            .with_field(FieldDescriptor::nested("Sub", "BarSubStruct", "obj"))
    }

    fn summary(plan: &ValidationPlan) -> Vec<String> {
        plan.steps()
            .iter()
            .map(|step| format!("{}:{}", step.field, step.rule))
            .collect()
    }

    #[test]
    fn steps_follow_field_then_tag_order() {
        let schema = Schema::new([foo(), bar()]);
        let plan = PlanCompiler::new(&schema).compile("FooStruct").unwrap().unwrap();
        assert_eq!(
            summary(&plan),
            vec![
                "Name:req",
                "Email:req",
                "Email:email",
                "Password:min(3)",
                "Password:max(11)",
                "ConfirmPass:req",
                "ConfirmPass:equals(Password)",
                "Age:min(18)",
                "Age:max(65)",
                "Sub:obj",
            ]
        );
    }

    #[test]
    fn nested_plans_are_shared() {
        let schema = Schema::new([foo(), bar()]);
        let plans = PlanCompiler::new(&schema).compile_all().unwrap();
        assert_eq!(plans.len(), 2);

        let foo = plans.get("FooStruct").unwrap();
        let bar = plans.get("BarSubStruct").unwrap();
        let Some(Action::Nested(NestedPlan::Resolved(inner))) =
            foo.steps().last().map(|step| &step.action)
        else {
            panic!("last step should descend into BarSubStruct");
        };
        assert!(Arc::ptr_eq(inner, bar));
    }

    #[test]
    fn untagged_record_has_no_plan() {
        let record = RecordDescriptor::new("Plain", "tests")
            .with_field(FieldDescriptor::new("Note", FieldKind::Text, ""));
        let schema = Schema::new([record]);
        assert_eq!(PlanCompiler::new(&schema).compile("Plain").unwrap(), None);
        assert!(PlanCompiler::new(&schema).compile_all().unwrap().is_empty());
        assert!(!schema.has_tags());
    }

    #[test]
    fn nested_record_without_checks_is_omitted() {
        let empty = RecordDescriptor::new("Empty", "tests")
            .with_field(FieldDescriptor::new("x", FieldKind::Text, ""));
        let outer = RecordDescriptor::new("Outer", "tests")
            .with_field(FieldDescriptor::new("Name", FieldKind::Text, "req"))
            .with_field(FieldDescriptor::nested("Inner", "Empty", "obj"));
        let schema = Schema::new([outer, empty]);

        let plan = PlanCompiler::new(&schema).compile("Outer").unwrap().unwrap();
        assert_eq!(summary(&plan), vec!["Name:req"]);
    }

    #[test]
    fn malformed_tag_aborts_the_record() {
        let record = RecordDescriptor::new("Broken", "tests")
            .with_field(FieldDescriptor::new("Name", FieldKind::Text, "req"))
            .with_field(FieldDescriptor::new("Age", FieldKind::Integer, "min("));
        let schema = Schema::new([record]);

        let error = PlanCompiler::new(&schema).compile("Broken").unwrap_err();
        let CompileError::MalformedTag { record, source } = error else {
            panic!("expected a malformed tag error");
        };
        assert_eq!(record, "Broken");
        assert_eq!(source.field, "Age");
        assert_eq!(source.reason, TagSyntax::UnclosedParen);
    }

    #[test]
    fn unknown_nested_record() {
        let schema = Schema::new([foo()]);
        let error = PlanCompiler::new(&schema).compile("FooStruct").unwrap_err();
        assert_eq!(error.code(), "RULE_UNKNOWN_RECORD");
        assert_eq!(error.field(), Some("Sub"));
    }

    #[test]
    fn unknown_root_record() {
        let schema = Schema::default();
        let error = PlanCompiler::new(&schema).compile("Missing").unwrap_err();
        assert_eq!(error, CompileError::UnknownRecord("Missing".into()));
    }

    #[test]
    fn cycles_are_reported_with_their_path() {
        let a = RecordDescriptor::new("A", "tests")
            .with_field(FieldDescriptor::new("Name", FieldKind::Text, "req"))
            .with_field(FieldDescriptor::nested("B", "B", "obj"));
        let b = RecordDescriptor::new("B", "tests")
            .with_field(FieldDescriptor::nested("A", "A", "obj"));
        let schema = Schema::new([a, b]);

        let error = PlanCompiler::new(&schema).compile_all().unwrap_err();
        assert_eq!(
            error,
            CompileError::Cyclic(CyclicRecordError {
                cycle: vec!["A".into(), "B".into(), "A".into()],
            })
        );
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let node = RecordDescriptor::new("Node", "tests")
            .with_field(FieldDescriptor::nested("Next", "Node", "obj"));
        let schema = Schema::new([node]);
        let error = PlanCompiler::new(&schema).compile("Node").unwrap_err();
        assert_eq!(error.code(), "RECORD_CYCLE");
    }

    #[test]
    fn defer_mode_does_not_need_nested_descriptors() {
        let schema = Schema::default();
        let plan = PlanCompiler::new(&schema)
            .with_nesting(NestingMode::Defer)
            .compile_record(&foo())
            .unwrap()
            .unwrap();
        assert_eq!(
            plan.steps().last().map(|step| &step.action),
            Some(&Action::Nested(NestedPlan::Deferred {
                type_name: "BarSubStruct".into()
            }))
        );
    }

    #[test]
    fn deep_nesting_compiles() {
        let depth = 64;
        let mut records = vec![
            RecordDescriptor::new("R0", "deep")
                .with_field(FieldDescriptor::new("v", FieldKind::Integer, "min(0)")),
        ];
        for i in 1..depth {
            records.push(
                RecordDescriptor::new(format!("R{i}"), "deep").with_field(FieldDescriptor::nested(
                    "child",
                    format!("R{}", i - 1),
                    "obj",
                )),
            );
        }
        let schema = Schema::new(records);
        let plans = PlanCompiler::new(&schema).compile_all().unwrap();
        assert_eq!(plans.len(), depth);
    }

    #[test]
    fn namespaces_group_in_first_seen_order() {
        let a = RecordDescriptor::new("A", "one")
            .with_field(FieldDescriptor::new("x", FieldKind::Text, "req"));
        let b = RecordDescriptor::new("B", "two")
            .with_field(FieldDescriptor::new("x", FieldKind::Text, "req"));
        let c = RecordDescriptor::new("C", "one")
            .with_field(FieldDescriptor::new("x", FieldKind::Text, "req"));
        let schema = Schema::new([a, b, c]);
        let plans = PlanCompiler::new(&schema).compile_all().unwrap();

        let groups: Vec<(&str, Vec<&str>)> = plans
            .by_namespace()
            .into_iter()
            .map(|(ns, group)| (ns, group.iter().map(|p| p.record()).collect()))
            .collect();
        assert_eq!(groups, vec![("one", vec!["A", "C"]), ("two", vec!["B"])]);
    }

    #[test]
    fn resolved_checks_are_bound() {
        let schema = Schema::new([foo(), bar()]);
        let plan = PlanCompiler::new(&schema).compile("FooStruct").unwrap().unwrap();
        assert_eq!(plan.steps()[3].action, Action::Check(Check::LengthGreaterThan(3)));
        assert_eq!(plan.namespace(), "tests");
    }
}
