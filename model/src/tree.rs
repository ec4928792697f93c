//! Core model tree storage.
//!
//! The tree mirrors what an editor displays: a root container holding root
//! elements, each element holding one slot per feature, and each slot holding
//! child elements (containment) or text values (references and attributes).
//! Placeholders stand in for not yet filled slots and are ignored by validation.

use concrete_core::{ClassId, FeatureId, ModelError, ModelResult, NodeId};
use concrete_metamodel::FeatureDef;
use std::collections::HashMap;

/// Payload of an element node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Class this element instantiates.
    pub class: ClassId,
}

/// What a feature slot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotContent {
    /// Contained elements.
    Elements,
    /// Reference identifiers or attribute literals.
    Values,
}

/// Payload of a feature slot node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotData {
    /// Feature this slot binds.
    pub feature: FeatureId,
    pub content: SlotContent,
}

impl SlotData {
    pub fn new(feature: FeatureId, content: SlotContent) -> Self {
        Self { feature, content }
    }
}

impl From<&FeatureDef> for SlotData {
    fn from(feature: &FeatureDef) -> Self {
        let content = if feature.is_containment() {
            SlotContent::Elements
        } else {
            SlotContent::Values
        };
        Self::new(feature.id, content)
    }
}

/// What a node of the tree is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The single top-level container of root elements.
    RootContainer,
    Element(ElementData),
    Slot(SlotData),
    /// Literal text of an attribute value or a reference identifier.
    Value(String),
    /// Editor affordance for an empty slot position.
    Placeholder,
}

/// A node in the model tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for this node.
    pub id: NodeId,
    pub kind: NodeKind,
    /// Parent node, `None` only for the root container.
    pub parent: Option<NodeId>,
    /// Ordered children.
    pub children: Vec<NodeId>,
}

impl Node {
    fn new(id: NodeId, kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            id,
            kind,
            parent,
            children: Vec::new(),
        }
    }

    /// Returns true if children may be added under this node.
    fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::RootContainer | NodeKind::Slot(_))
    }
}

/// ID allocator for nodes. IDs are never reused.
#[derive(Debug)]
struct IdAllocator {
    next_node_id: u64,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_node_id: 1 }
    }

    fn alloc_node_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }
}

/// The in-memory model tree.
#[derive(Debug)]
pub struct ModelTree {
    /// Node storage
    nodes: HashMap<NodeId, Node>,
    /// The root container
    root: NodeId,
    /// ID allocator
    id_alloc: IdAllocator,
}

impl Default for ModelTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelTree {
    /// Create a new tree holding only the root container.
    pub fn new() -> Self {
        let mut id_alloc = IdAllocator::new();
        let root = id_alloc.alloc_node_id();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(root, NodeKind::RootContainer, None));

        Self {
            nodes,
            root,
            id_alloc,
        }
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    // ==================== Edits ====================

    /// Add an element under the root container or a containment slot.
    ///
    /// One slot is created per feature, in the order given.
    pub fn add_element<I>(
        &mut self,
        parent: NodeId,
        class: ClassId,
        slots: I,
    ) -> ModelResult<NodeId>
    where
        I: IntoIterator,
        I::Item: Into<SlotData>,
    {
        match self.kind(parent) {
            Some(NodeKind::RootContainer)
            | Some(NodeKind::Slot(SlotData {
                content: SlotContent::Elements,
                ..
            })) => {}
            Some(NodeKind::Slot(_)) => return Err(ModelError::NotAContainmentSlot(parent)),
            Some(_) => return Err(ModelError::NotAContainer(parent)),
            None => return Err(ModelError::NodeNotFound(parent)),
        }

        let id = self.insert_child(parent, NodeKind::Element(ElementData { class }));
        for slot in slots {
            self.insert_child(id, NodeKind::Slot(slot.into()));
        }
        Ok(id)
    }

    /// Add a text value to a reference or attribute slot.
    pub fn add_value(&mut self, slot: NodeId, text: impl Into<String>) -> ModelResult<NodeId> {
        match self.kind(slot) {
            Some(NodeKind::Slot(SlotData {
                content: SlotContent::Values,
                ..
            })) => Ok(self.insert_child(slot, NodeKind::Value(text.into()))),
            Some(NodeKind::Slot(_)) => Err(ModelError::NotAValueSlot(slot)),
            Some(_) => Err(ModelError::NotASlot(slot)),
            None => Err(ModelError::NodeNotFound(slot)),
        }
    }

    /// Add an empty placeholder under the root container or a slot.
    pub fn add_placeholder(&mut self, parent: NodeId) -> ModelResult<NodeId> {
        self.check_container(parent)?;
        Ok(self.insert_child(parent, NodeKind::Placeholder))
    }

    /// Replace the text of a value node.
    pub fn set_text(&mut self, value: NodeId, text: impl Into<String>) -> ModelResult<()> {
        let node = self
            .nodes
            .get_mut(&value)
            .ok_or(ModelError::NodeNotFound(value))?;
        match &mut node.kind {
            NodeKind::Value(current) => {
                *current = text.into();
                Ok(())
            }
            _ => Err(ModelError::NotAValue(value)),
        }
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> ModelResult<()> {
        if id == self.root {
            return Err(ModelError::CannotRemoveRoot);
        }
        let parent = self
            .nodes
            .get(&id)
            .ok_or(ModelError::NodeNotFound(id))?
            .parent;

        if let Some(parent_node) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent_node.children.retain(|&c| c != id);
        }
        for node_id in self.descendants(id) {
            self.nodes.remove(&node_id);
        }
        Ok(())
    }

    fn check_container(&self, parent: NodeId) -> ModelResult<()> {
        match self.nodes.get(&parent) {
            Some(node) if node.is_container() => Ok(()),
            Some(_) => Err(ModelError::NotAContainer(parent)),
            None => Err(ModelError::NodeNotFound(parent)),
        }
    }

    fn insert_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.id_alloc.alloc_node_id();
        self.nodes.insert(id, Node::new(id, kind, Some(parent)));
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
        }
        id
    }

    // ==================== Accessors ====================

    /// Get a node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get the kind of a node.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    /// Check if a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Get the number of nodes, including the root container.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds only the root container.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the ordered children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Element(_)))
    }

    pub fn is_placeholder(&self, id: NodeId) -> bool {
        matches!(self.kind(id), Some(NodeKind::Placeholder))
    }

    pub fn is_root_container(&self, id: NodeId) -> bool {
        id == self.root
    }

    /// Get the class of an element.
    pub fn class_of(&self, id: NodeId) -> Option<ClassId> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data.class),
            _ => None,
        }
    }

    /// Get the slots of an element, in feature order.
    pub fn slots(&self, element: NodeId) -> &[NodeId] {
        if self.is_element(element) {
            self.children(element)
        } else {
            &[]
        }
    }

    /// Find the slot of an element bound to a feature.
    pub fn slot(&self, element: NodeId, feature: FeatureId) -> Option<NodeId> {
        self.slots(element)
            .iter()
            .copied()
            .find(|&s| self.slot_feature(s) == Some(feature))
    }

    /// Like [`ModelTree::slot`], as an error for editing code.
    pub fn require_slot(&self, element: NodeId, feature: FeatureId) -> ModelResult<NodeId> {
        self.slot(element, feature)
            .ok_or(ModelError::SlotNotFound { element, feature })
    }

    /// What a slot holds.
    pub fn slot_content(&self, slot: NodeId) -> Option<SlotContent> {
        match self.kind(slot)? {
            NodeKind::Slot(data) => Some(data.content),
            _ => None,
        }
    }

    /// Get the feature a slot binds.
    pub fn slot_feature(&self, slot: NodeId) -> Option<FeatureId> {
        match self.kind(slot)? {
            NodeKind::Slot(data) => Some(data.feature),
            _ => None,
        }
    }

    /// The containment feature an element sits in, `None` for root elements.
    pub fn containing_feature(&self, element: NodeId) -> Option<FeatureId> {
        self.parent(element).and_then(|p| self.slot_feature(p))
    }

    /// Children of a slot that are not placeholders.
    pub fn filled_children(&self, slot: NodeId) -> Vec<NodeId> {
        self.children(slot)
            .iter()
            .copied()
            .filter(|&c| !self.is_placeholder(c))
            .collect()
    }

    /// Raw text of a value node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Value(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// A node followed by all of its descendants, depth-first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.get(&current) {
                result.push(current);
                stack.extend(node.children.iter().rev());
            }
        }
        result
    }

    /// All elements of the tree, depth-first in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|&id| self.is_element(id))
            .collect()
    }
}
