//! Concrete Constraint
//!
//! Model validation. On every commit the checker walks the model tree and
//! recomputes the problems of each element and feature slot: structural
//! conformance to the metamodel, multiplicity, reference resolution, attribute
//! value domains and user-registered feature value constraints.

mod checker;
mod constraint;
mod domain;
mod error;
mod problem;
mod registry;
mod sink;

pub use checker::{CheckerOptions, ConstraintChecker, ReportedLimit};
pub use constraint::{ConstraintMessage, ConstraintValue, ElementRef, FeatureValueConstraint};
pub use domain::{AttributeDomain, BOOLEAN_LITERALS, INTEGER_PATTERN};
pub use error::{ConstraintError, ConstraintResult};
pub use problem::{Problem, ProblemKind, Problems};
pub use registry::ConstraintRegistry;
pub use sink::{ProblemReport, ProblemSink, ProblemTable};
