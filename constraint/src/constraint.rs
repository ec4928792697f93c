//! User-defined feature value constraints.

use concrete_core::{ClassId, NodeId};
use concrete_metamodel::MetamodelQuery;
use concrete_model::ModelTree;
use std::fmt;

/// Read access to an element for constraint predicates and messages.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    tree: &'a ModelTree,
    metamodel: &'a dyn MetamodelQuery,
    id: NodeId,
}

impl<'a> ElementRef<'a> {
    pub fn new(tree: &'a ModelTree, metamodel: &'a dyn MetamodelQuery, id: NodeId) -> Self {
        Self {
            tree,
            metamodel,
            id,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a ModelTree {
        self.tree
    }

    pub fn class_id(&self) -> Option<ClassId> {
        self.tree.class_of(self.id)
    }

    /// Name of the element's class, empty if the node is not an element.
    pub fn class_name(&self) -> String {
        self.class_id()
            .map(|c| self.metamodel.class_name(c))
            .unwrap_or_default()
    }

    /// The slot bound to the feature with this name.
    pub fn slot(&self, feature_name: &str) -> Option<NodeId> {
        self.tree.slots(self.id).iter().copied().find(|&slot| {
            self.tree
                .slot_feature(slot)
                .and_then(|f| self.metamodel.feature(f))
                .is_some_and(|f| f.name == feature_name)
        })
    }

    /// Text values of a reference or attribute feature, placeholders skipped.
    pub fn values(&self, feature_name: &str) -> Vec<&'a str> {
        let tree = self.tree;
        self.slot(feature_name)
            .map(|slot| {
                tree.filled_children(slot)
                    .into_iter()
                    .filter_map(|v| tree.text(v))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First text value of a feature.
    pub fn value(&self, feature_name: &str) -> Option<&'a str> {
        self.values(feature_name).into_iter().next()
    }

    /// Contained elements of a containment feature, placeholders skipped.
    pub fn children(&self, feature_name: &str) -> Vec<ElementRef<'a>> {
        let tree = self.tree;
        self.slot(feature_name)
            .map(|slot| {
                tree.filled_children(slot)
                    .into_iter()
                    .filter(|&c| tree.is_element(c))
                    .map(|c| ElementRef::new(tree, self.metamodel, c))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("class", &self.class_id())
            .finish()
    }
}

/// The value a constraint is checked against.
#[derive(Debug, Clone, Copy)]
pub enum ConstraintValue<'a> {
    /// A contained child, or the resolved target of a reference.
    Element(ElementRef<'a>),
    /// The text of an attribute value.
    Literal(&'a str),
}

impl<'a> ConstraintValue<'a> {
    pub fn as_element(&self) -> Option<&ElementRef<'a>> {
        match self {
            ConstraintValue::Element(element) => Some(element),
            ConstraintValue::Literal(_) => None,
        }
    }

    pub fn as_literal(&self) -> Option<&'a str> {
        match self {
            ConstraintValue::Literal(text) => Some(text),
            ConstraintValue::Element(_) => None,
        }
    }
}

type CheckFn = dyn Fn(&ElementRef<'_>, &ConstraintValue<'_>) -> bool;
type MessageFn = dyn Fn(&ElementRef<'_>) -> String;

/// Message reported when a constraint fails.
pub enum ConstraintMessage {
    Text(String),
    /// Computed from the element owning the feature.
    Computed(Box<MessageFn>),
}

impl fmt::Debug for ConstraintMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintMessage::Text(text) => f.debug_tuple("Text").field(text).finish(),
            ConstraintMessage::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A predicate over the values of one feature of one class.
///
/// The predicate receives the element owning the feature and one value: the
/// contained child, the resolved reference target, or the attribute literal.
/// Values that already fail a structural check (unresolvable references,
/// out-of-domain literals) are never passed to it.
pub struct FeatureValueConstraint {
    class_name: String,
    feature_name: String,
    check: Box<CheckFn>,
    message: ConstraintMessage,
}

impl FeatureValueConstraint {
    /// Create a constraint with a fixed message.
    pub fn new<F>(
        class_name: impl Into<String>,
        feature_name: impl Into<String>,
        check: F,
        message: impl Into<String>,
    ) -> Self
    where
        F: Fn(&ElementRef<'_>, &ConstraintValue<'_>) -> bool + 'static,
    {
        Self {
            class_name: class_name.into(),
            feature_name: feature_name.into(),
            check: Box::new(check),
            message: ConstraintMessage::Text(message.into()),
        }
    }

    /// Create a constraint whose message is computed from the owning element.
    pub fn with_computed_message<F, M>(
        class_name: impl Into<String>,
        feature_name: impl Into<String>,
        check: F,
        message: M,
    ) -> Self
    where
        F: Fn(&ElementRef<'_>, &ConstraintValue<'_>) -> bool + 'static,
        M: Fn(&ElementRef<'_>) -> String + 'static,
    {
        Self {
            class_name: class_name.into(),
            feature_name: feature_name.into(),
            check: Box::new(check),
            message: ConstraintMessage::Computed(Box::new(message)),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn feature_name(&self) -> &str {
        &self.feature_name
    }

    /// Returns true if the value satisfies the constraint.
    pub fn check(&self, element: &ElementRef<'_>, value: &ConstraintValue<'_>) -> bool {
        (self.check)(element, value)
    }

    /// The fixed failure message, `None` when it is computed.
    pub fn message_text(&self) -> Option<&str> {
        match &self.message {
            ConstraintMessage::Text(text) => Some(text),
            ConstraintMessage::Computed(_) => None,
        }
    }

    /// The failure message for an element.
    pub fn message(&self, element: &ElementRef<'_>) -> String {
        match &self.message {
            ConstraintMessage::Text(text) => text.clone(),
            ConstraintMessage::Computed(message) => message(element),
        }
    }
}

impl fmt::Debug for FeatureValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureValueConstraint")
            .field("class_name", &self.class_name)
            .field("feature_name", &self.feature_name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
