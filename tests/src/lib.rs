//! Concrete integration tests.
//!
//! Scenario support for validating whole models: sample metamodels, a
//! name-based model builder, a harness wiring the model to a constraint
//! checker, and expectations on the problems of individual nodes.

mod error;
mod fixtures;

pub use assertion::Expect;
pub use error::{ScenarioError, ScenarioResult};
pub use fixtures::{orders, state_machine, ModelBuilder};
pub use harness::{Harness, DEFAULT_IDENTIFIER_FEATURE};

/// Route `tracing` output of the engine to the test writer.
///
/// Controlled by `RUST_LOG`; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Prelude for test files.
pub mod prelude {
    pub use crate::{
        init_tracing, orders, state_machine, Expect, Harness, ModelBuilder, ScenarioError,
        ScenarioResult,
    };
    pub use concrete_constraint::{
        AttributeDomain, CheckerOptions, ConstraintChecker, ConstraintValue, ElementRef,
        FeatureValueConstraint, ProblemKind, ProblemSink, ProblemTable, ReportedLimit,
    };
    pub use concrete_core::{messages, NodeId};
    pub use concrete_metamodel::{Metamodel, MetamodelBuilder, MetamodelQuery, Multiplicity, TypeRef};
    pub use concrete_model::{
        IdentifierIndex, IdentifierProvider, ModelChangeListener, ModelTree, Resolution,
    };
}
