//! Common error types for model tree edits.

use crate::{FeatureId, NodeId};
use thiserror::Error;

/// Errors that can occur while editing the model tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Children can only be added under the root container or a feature slot.
    #[error("Node {0} cannot hold children")]
    NotAContainer(NodeId),

    /// Values can only be added to feature slots.
    #[error("Node {0} is not a feature slot")]
    NotASlot(NodeId),

    /// Elements can only be added under the root container or a containment slot.
    #[error("Slot {0} holds values, not elements")]
    NotAContainmentSlot(NodeId),

    /// Values can only be added to reference and attribute slots.
    #[error("Slot {0} holds elements, not values")]
    NotAValueSlot(NodeId),

    /// Text can only be set on value nodes.
    #[error("Node {0} is not a value")]
    NotAValue(NodeId),

    /// An element has no slot for the requested feature.
    #[error("Element {element} has no slot for feature {feature}")]
    SlotNotFound { element: NodeId, feature: FeatureId },

    /// The root container lives as long as the tree.
    #[error("The root container cannot be removed")]
    CannotRemoveRoot,
}

/// Result type for model tree edits.
pub type ModelResult<T> = Result<T, ModelError>;
