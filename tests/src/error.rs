//! Error types for test scenarios.

use concrete_constraint::ConstraintError;
use concrete_core::{ModelError, NodeId};
use concrete_metamodel::MetamodelError;
use thiserror::Error;

/// Result type for scenario setup and assertions.
pub type ScenarioResult<T> = Result<T, ScenarioError>;

/// Errors that can occur while building or checking a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Metamodel error: {0}")]
    Metamodel(#[from] MetamodelError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Checker error: {0}")]
    Checker(#[from] ConstraintError),

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Class '{class}' has no feature '{feature}'")]
    UnknownFeature { class: String, feature: String },

    #[error("Assertion failed on {node}: {message}")]
    AssertionFailed { node: NodeId, message: String },
}

impl ScenarioError {
    pub fn unknown_feature(class: impl Into<String>, feature: impl Into<String>) -> Self {
        Self::UnknownFeature {
            class: class.into(),
            feature: feature.into(),
        }
    }

    pub fn assertion_failed(node: NodeId, message: impl Into<String>) -> Self {
        Self::AssertionFailed {
            node,
            message: message.into(),
        }
    }
}
