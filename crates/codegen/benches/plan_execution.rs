// Benchmarks for compiling and interpreting validation plans
// Run with: cargo bench --bench plan_execution

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use serde_json::json;
use tagval_codegen::{FieldDescriptor, FieldKind, PlanCompiler, RecordDescriptor, Schema};

fn schema() -> Schema {
    Schema::new([
        RecordDescriptor::new("FooStruct", "bench")
            .with_field(FieldDescriptor::new("Name", FieldKind::Text, "req"))
            .with_field(FieldDescriptor::new("Email", FieldKind::Text, "req,email"))
            .with_field(FieldDescriptor::new("Password", FieldKind::Text, "min(3),max(11)"))
            .with_field(FieldDescriptor::new(
                "ConfirmPass",
                FieldKind::Text,
                "req,equals(Password)",
            ))
            .with_field(FieldDescriptor::new("Age", FieldKind::Integer, "min(18),max(65)"))
            .with_field(FieldDescriptor::nested("Sub", "BarSubStruct", "obj")),
        RecordDescriptor::new("BarSubStruct", "bench")
            .with_field(FieldDescriptor::new("IP", FieldKind::Text, "req,ip")),
    ])
}

fn benchmark_compile(c: &mut Criterion) {
    let schema = schema();
    c.bench_function("plan/compile_all", |b| {
        b.iter(|| PlanCompiler::new(black_box(&schema)).compile_all())
    });
}

fn benchmark_execute(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan/execute");

    let schema = schema();
    let Ok(Some(plan)) = PlanCompiler::new(&schema).compile("FooStruct") else {
        return;
    };

    let valid = json!({
        "Name": "Jane",
        "Email": "jane@example.com",
        "Password": "hunter22",
        "ConfirmPass": "hunter22",
        "Age": 30,
        "Sub": { "IP": "10.0.0.1" },
    });
    let invalid = json!({
        "Name": "",
        "Email": "nope",
        "Password": "ab",
        "ConfirmPass": "abc",
        "Age": 12,
        "Sub": { "IP": "" },
    });

    group.bench_function("passing", |b| b.iter(|| plan.execute(black_box(&valid))));
    group.bench_function("failing", |b| b.iter(|| plan.execute(black_box(&invalid))));

    group.finish();
}

criterion_group!(benches, benchmark_compile, benchmark_execute);
criterion_main!(benches);
