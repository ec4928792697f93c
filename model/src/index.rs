//! Identifier index: identifier string -> owning element.

use crate::ModelTree;
use concrete_core::NodeId;
use concrete_metamodel::Metamodel;
use std::collections::HashMap;

/// Result of looking up an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one element claims the identifier.
    Element(NodeId),
    /// More than one element claims the identifier.
    Duplicate,
    NotFound,
}

impl Resolution {
    /// The unique target, if resolution succeeded.
    pub fn element(&self) -> Option<NodeId> {
        match self {
            Resolution::Element(id) => Some(*id),
            Resolution::Duplicate | Resolution::NotFound => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Resolution::Duplicate)
    }
}

/// Maps elements to identifiers and back.
pub trait IdentifierProvider {
    /// The canonical identifier of an element, if it has one.
    fn identifier_of(&self, element: NodeId) -> Option<String>;

    /// Resolve an identifier to the element claiming it.
    fn resolve(&self, identifier: &str) -> Resolution;
}

/// Registration based identifier index.
#[derive(Debug, Default)]
pub struct IdentifierIndex {
    /// Identifier -> elements claiming it, in registration order.
    by_identifier: HashMap<String, Vec<NodeId>>,
    /// Element -> its identifier.
    by_element: HashMap<NodeId, String>,
}

impl IdentifierIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from an identifying attribute such as `name`.
    ///
    /// Every element whose slot for `feature_name` holds a value registers
    /// that value. Elements without the feature, or with an empty slot, have
    /// no identifier.
    pub fn from_attribute(tree: &ModelTree, metamodel: &Metamodel, feature_name: &str) -> Self {
        let mut index = Self::new();
        for element in tree.elements() {
            let Some(class) = tree.class_of(element) else {
                continue;
            };
            let Some(feature) = metamodel.find_feature(class, feature_name) else {
                continue;
            };
            let identifier = tree
                .slot(element, feature.id)
                .and_then(|slot| tree.filled_children(slot).first().copied())
                .and_then(|value| tree.text(value));
            if let Some(identifier) = identifier {
                index.register(element, identifier);
            }
        }
        tracing::debug!(
            identifiers = index.by_identifier.len(),
            elements = index.by_element.len(),
            "Built identifier index"
        );
        index
    }

    /// Register an element under an identifier, replacing any previous one.
    pub fn register(&mut self, element: NodeId, identifier: impl Into<String>) {
        self.unregister(element);
        let identifier = identifier.into();
        self.by_identifier
            .entry(identifier.clone())
            .or_default()
            .push(element);
        self.by_element.insert(element, identifier);
    }

    /// Remove an element from the index.
    pub fn unregister(&mut self, element: NodeId) {
        if let Some(identifier) = self.by_element.remove(&element) {
            if let Some(elements) = self.by_identifier.get_mut(&identifier) {
                elements.retain(|&e| e != element);
                if elements.is_empty() {
                    self.by_identifier.remove(&identifier);
                }
            }
        }
    }

    /// All elements claiming an identifier.
    pub fn elements_for(&self, identifier: &str) -> &[NodeId] {
        self.by_identifier
            .get(identifier)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.by_element.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_element.is_empty()
    }
}

impl IdentifierProvider for IdentifierIndex {
    fn identifier_of(&self, element: NodeId) -> Option<String> {
        self.by_element.get(&element).cloned()
    }

    fn resolve(&self, identifier: &str) -> Resolution {
        match self.elements_for(identifier) {
            [] => Resolution::NotFound,
            [single] => Resolution::Element(*single),
            _ => Resolution::Duplicate,
        }
    }
}
