//! Change notifications from the editing layer.

use crate::{IdentifierProvider, ModelTree};
use concrete_core::{FeatureId, NodeId};

/// Receives model change notifications.
///
/// Listeners run in batch-commit mode: the per-edit hooks only observe, and all
/// work happens in [`ModelChangeListener::commit_changes`] once the editor has
/// finished a batch of edits. Incremental listeners would need their own
/// dirty-set tracking rather than reacting in these hooks.
pub trait ModelChangeListener {
    /// An element was inserted into the tree.
    fn element_added(&mut self, _element: NodeId) {}

    /// A feature slot of an element changed.
    fn element_changed(&mut self, _element: NodeId, _feature: FeatureId) {}

    /// An element was removed from the tree.
    fn element_removed(&mut self, _element: NodeId) {}

    /// The model root was replaced.
    fn root_changed(&mut self, _root: NodeId) {}

    /// A batch of edits is complete.
    fn commit_changes(&mut self, tree: &ModelTree, identifiers: &dyn IdentifierProvider);
}
