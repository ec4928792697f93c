//! Sample metamodels and a name-based model builder.

use concrete_core::NodeId;
use concrete_metamodel::{Metamodel, MetamodelBuilder, MetamodelQuery, Multiplicity};
use concrete_model::ModelTree;

use crate::error::{ScenarioError, ScenarioResult};

/// State machines with abstract states and transitions referencing them.
///
/// ```text
/// Statemachine { name: String[1], priority: Integer[0..1], states: AbstractState[0..*] }
/// abstract AbstractState { name: String[1] }
/// State : AbstractState { kind: Kind[0..1], transitions: Transition[0..*] }
/// FinalState : AbstractState {}
/// Transition { event: String[0..1], enabled: Boolean[0..1], target: -> AbstractState[1] }
/// Note { text: String[0..1] }
/// enum Kind { NORMAL, INITIAL }
/// ```
pub fn state_machine() -> ScenarioResult<Metamodel> {
    let mut builder = MetamodelBuilder::new();
    builder.add_enum("Kind", ["NORMAL", "INITIAL"])?;

    builder
        .add_class("Statemachine")
        .attribute("name", "String", Multiplicity::required())
        .attribute("priority", "Integer", Multiplicity::optional())
        .containment("states", "AbstractState", Multiplicity::many())
        .done()?;
    builder
        .add_class("AbstractState")
        .abstract_class()
        .attribute("name", "String", Multiplicity::required())
        .done()?;
    builder
        .add_class("State")
        .extends("AbstractState")
        .attribute("kind", "Kind", Multiplicity::optional())
        .containment("transitions", "Transition", Multiplicity::many())
        .done()?;
    builder
        .add_class("FinalState")
        .extends("AbstractState")
        .done()?;
    builder
        .add_class("Transition")
        .attribute("event", "String", Multiplicity::optional())
        .attribute("enabled", "Boolean", Multiplicity::optional())
        .reference("target", "AbstractState", Multiplicity::required())
        .done()?;
    builder
        .add_class("Note")
        .attribute("text", "String", Multiplicity::optional())
        .done()?;

    Ok(builder.build()?)
}

/// Customers placing orders.
///
/// ```text
/// Customer { name: String[1], code: String[0..1], orders: Order[0..*] }
/// Order { name: String[1], total: Integer[0..1], lines: Line[1..3], buyer: -> Customer[0..1] }
/// Line { quantity: Integer[1] }
/// Invoice { name: String[1], total: Integer[0..1] }
/// ```
pub fn orders() -> ScenarioResult<Metamodel> {
    let mut builder = MetamodelBuilder::new();

    builder
        .add_class("Customer")
        .attribute("name", "String", Multiplicity::required())
        .attribute("code", "String", Multiplicity::optional())
        .containment("orders", "Order", Multiplicity::many())
        .done()?;
    builder
        .add_class("Order")
        .attribute("name", "String", Multiplicity::required())
        .attribute("total", "Integer", Multiplicity::optional())
        .containment("lines", "Line", Multiplicity::new(1, Some(3)))
        .reference("buyer", "Customer", Multiplicity::optional())
        .done()?;
    builder
        .add_class("Line")
        .attribute("quantity", "Integer", Multiplicity::required())
        .done()?;
    builder
        .add_class("Invoice")
        .attribute("name", "String", Multiplicity::required())
        .attribute("total", "Integer", Multiplicity::optional())
        .done()?;

    Ok(builder.build()?)
}

/// Builds model trees by class and feature name.
#[derive(Debug)]
pub struct ModelBuilder<'m> {
    metamodel: &'m Metamodel,
    tree: ModelTree,
}

impl<'m> ModelBuilder<'m> {
    pub fn new(metamodel: &'m Metamodel) -> Self {
        Self {
            metamodel,
            tree: ModelTree::new(),
        }
    }

    pub fn metamodel(&self) -> &'m Metamodel {
        self.metamodel
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn tree(&self) -> &ModelTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ModelTree {
        &mut self.tree
    }

    pub fn into_tree(self) -> ModelTree {
        self.tree
    }

    /// Add an element directly under the root container.
    pub fn root_element(&mut self, class: &str) -> ScenarioResult<NodeId> {
        let root = self.tree.root();
        self.spawn(root, class)
    }

    /// Add an element into a containment feature of `parent`.
    pub fn child(&mut self, parent: NodeId, feature: &str, class: &str) -> ScenarioResult<NodeId> {
        let slot = self.slot(parent, feature)?;
        self.spawn(slot, class)
    }

    /// Add a root element and set its `name`.
    pub fn named_root(&mut self, class: &str, name: &str) -> ScenarioResult<NodeId> {
        let element = self.root_element(class)?;
        self.value(element, "name", name)?;
        Ok(element)
    }

    /// Add a child element and set its `name`.
    pub fn named_child(
        &mut self,
        parent: NodeId,
        feature: &str,
        class: &str,
        name: &str,
    ) -> ScenarioResult<NodeId> {
        let element = self.child(parent, feature, class)?;
        self.value(element, "name", name)?;
        Ok(element)
    }

    /// Add a text value to a reference or attribute feature.
    pub fn value(&mut self, element: NodeId, feature: &str, text: &str) -> ScenarioResult<NodeId> {
        let slot = self.slot(element, feature)?;
        Ok(self.tree.add_value(slot, text)?)
    }

    /// Add an empty placeholder to a feature.
    pub fn placeholder(&mut self, element: NodeId, feature: &str) -> ScenarioResult<NodeId> {
        let slot = self.slot(element, feature)?;
        Ok(self.tree.add_placeholder(slot)?)
    }

    /// The slot of an element's feature.
    pub fn slot(&self, element: NodeId, feature: &str) -> ScenarioResult<NodeId> {
        let feature_def = self
            .tree
            .class_of(element)
            .and_then(|class| self.metamodel.find_feature(class, feature))
            .ok_or_else(|| ScenarioError::unknown_feature(self.class_name(element), feature))?;
        Ok(self.tree.require_slot(element, feature_def.id)?)
    }

    fn spawn(&mut self, container: NodeId, class: &str) -> ScenarioResult<NodeId> {
        let metamodel = self.metamodel;
        let class_id = metamodel
            .get_class_id(class)
            .ok_or_else(|| ScenarioError::UnknownClass(class.to_string()))?;
        Ok(self
            .tree
            .add_element(container, class_id, metamodel.all_features(class_id))?)
    }

    fn class_name(&self, element: NodeId) -> String {
        self.tree
            .class_of(element)
            .map(|class| self.metamodel.class_name(class))
            .unwrap_or_else(|| element.to_string())
    }
}
