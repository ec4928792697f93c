//! Constraint checker setup errors.

use thiserror::Error;

/// Result type for constraint checker setup.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur while configuring a constraint checker.
///
/// Validation itself never fails; problems are reported as annotations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Unknown root class: {name}")]
    UnknownRootClass { name: String },
}

impl ConstraintError {
    pub fn unknown_root_class(name: impl Into<String>) -> Self {
        Self::UnknownRootClass { name: name.into() }
    }
}
