//! # tagval-codegen
//!
//! Compiles tag-annotated record descriptors into validation plans.
//!
//! ```text
//! RecordDescriptor ─► tag::parse_tag ─► RuleRegistry::resolve ─► PlanCompiler
//!                                                                    │
//!                                  ┌─────────────────────────────────┤
//!                                  ▼                                 ▼
//!                    emit::RustEmitter (source)       ValidationPlan::execute
//! ```
//!
//! - [`tag`]: the tag grammar (`"req,min(3),equals(Password)"`)
//! - [`registry`]: `(keyword, field kind)` to primitive check
//! - [`plan`]: ordered, shareable plans and the compiler that builds them
//! - [`emit`]: Rust source for generation mode
//! - [`record`]: field access for interpretation mode
//!
//! ## Interpretation mode
//!
//! ```rust
//! use serde_json::json;
//! use tagval_codegen::descriptor::{FieldDescriptor, FieldKind, RecordDescriptor, Schema};
//! use tagval_codegen::plan::PlanCompiler;
//!
//! let schema = Schema::new([RecordDescriptor::new("User", "app")
//!     .with_field(FieldDescriptor::new("Email", FieldKind::Text, "req,email"))]);
//! let plan = PlanCompiler::new(&schema).compile("User").unwrap().unwrap();
//!
//! let result = plan.execute(&json!({ "Email": "" }));
//! assert!(!result.pass());
//! assert_eq!(result.messages().len(), 2);
//! ```

pub mod config;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod plan;
pub mod record;
pub mod registry;
pub mod tag;

pub use config::GeneratorConfig;
pub use descriptor::{FieldDescriptor, FieldKind, RecordDescriptor, Schema};
pub use emit::{GeneratedFile, RustEmitter, generate};
pub use error::{CompileError, CyclicRecordError, MalformedTagError, RuleResolutionError};
pub use plan::{NestingMode, PlanCompiler, PlanSet, ValidationPlan};
pub use record::{FieldValue, Record};
pub use registry::{Check, Keyword, RuleRegistry};
pub use tag::{Rule, Tag};
