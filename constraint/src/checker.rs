//! Model validation against the metamodel and registered constraints.

use concrete_core::{messages, ClassId, NodeId};
use concrete_metamodel::{FeatureDef, FeatureKind, MetamodelQuery, TypeRef};
use concrete_model::{IdentifierProvider, ModelChangeListener, ModelTree};

use crate::constraint::{ConstraintValue, ElementRef, FeatureValueConstraint};
use crate::domain::AttributeDomain;
use crate::error::{ConstraintError, ConstraintResult};
use crate::problem::{Problem, Problems};
use crate::registry::ConstraintRegistry;
use crate::sink::{ProblemSink, ProblemTable};

/// Which limit the "below lower limit" message reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportedLimit {
    /// The feature's upper limit (established wording, kept for compatibility).
    #[default]
    Upper,
    /// The feature's lower limit.
    Lower,
}

/// Engine behaviour switches.
#[derive(Debug, Clone, Default)]
pub struct CheckerOptions {
    pub below_lower_limit: ReportedLimit,
}

/// Counters for one validation walk.
#[derive(Debug, Default)]
struct WalkStats {
    elements: usize,
    slots: usize,
    problems: usize,
}

/// Constraint checker.
///
/// Recomputes the complete problem set of a model tree on every commit and
/// keeps it in a problem sink, a [`ProblemTable`] unless another is supplied.
pub struct ConstraintChecker<'m, S: ProblemSink = ProblemTable> {
    metamodel: &'m dyn MetamodelQuery,
    root_classes: Vec<ClassId>,
    registry: ConstraintRegistry,
    options: CheckerOptions,
    sink: S,
}

impl<'m> ConstraintChecker<'m, ProblemTable> {
    /// Create a new constraint checker.
    ///
    /// `root_classes` whitelists the classes allowed directly under the root
    /// container.
    pub fn new(
        metamodel: &'m dyn MetamodelQuery,
        root_classes: impl IntoIterator<Item = ClassId>,
    ) -> Self {
        Self {
            metamodel,
            root_classes: root_classes.into_iter().collect(),
            registry: ConstraintRegistry::new(),
            options: CheckerOptions::default(),
            sink: ProblemTable::new(),
        }
    }

    /// Create a checker whose root classes are given by name.
    pub fn with_root_class_names<'n>(
        metamodel: &'m dyn MetamodelQuery,
        names: impl IntoIterator<Item = &'n str>,
    ) -> ConstraintResult<Self> {
        let mut root_classes = Vec::new();
        for name in names {
            match metamodel.class_by_name(name) {
                Some(class) => root_classes.push(class.id),
                None => return Err(ConstraintError::unknown_root_class(name)),
            }
        }
        Ok(Self::new(metamodel, root_classes))
    }
}

impl<'m, S: ProblemSink> ConstraintChecker<'m, S> {
    /// Replace the problem sink.
    pub fn with_sink<T: ProblemSink>(self, sink: T) -> ConstraintChecker<'m, T> {
        ConstraintChecker {
            metamodel: self.metamodel,
            root_classes: self.root_classes,
            registry: self.registry,
            options: self.options,
            sink,
        }
    }

    pub fn with_options(mut self, options: CheckerOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a feature value constraint.
    pub fn register(&mut self, constraint: FeatureValueConstraint) {
        self.registry.register(constraint);
    }

    pub fn registry(&self) -> &ConstraintRegistry {
        &self.registry
    }

    /// The problem sink holding the annotations of the last commit.
    pub fn problems(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn root_classes(&self) -> &[ClassId] {
        &self.root_classes
    }

    // ========== Type and value predicates ==========

    /// Check if `class` is the class of `type_ref` or one of its subclasses.
    ///
    /// Abstractness is not considered here; abstract instances are reported
    /// separately during validation.
    pub fn is_valid_instance(&self, type_ref: TypeRef, class: ClassId) -> bool {
        match type_ref {
            TypeRef::Class(expected) => self.metamodel.subtypes_and_self(expected).contains(&class),
            TypeRef::Datatype(_) => false,
        }
    }

    /// Check if a literal is allowed for an attribute feature.
    pub fn is_valid_value(&self, feature: &FeatureDef, value: &str) -> bool {
        self.attribute_domain(feature).allows(value)
    }

    /// The values an attribute feature accepts.
    pub fn attribute_domain(&self, feature: &FeatureDef) -> AttributeDomain {
        AttributeDomain::of(self.metamodel, feature)
    }

    /// Names of the classes that may be inserted at `node`.
    ///
    /// For the root container these are the non-abstract root classes in
    /// whitelist order; for a slot, the non-abstract subclasses of its
    /// feature type followed by the type itself. Any other node offers
    /// nothing.
    pub fn allowed_class_names(&self, tree: &ModelTree, node: NodeId) -> Vec<String> {
        let candidates = if tree.is_root_container(node) {
            self.root_classes.clone()
        } else {
            match tree
                .slot_feature(node)
                .and_then(|f| self.metamodel.feature(f))
                .and_then(|f| f.type_ref.as_class())
            {
                Some(class) => self
                    .metamodel
                    .subtypes_and_self(class)
                    .into_iter()
                    .filter(|&c| c != class)
                    .chain(std::iter::once(class))
                    .collect(),
                None => Vec::new(),
            }
        };

        candidates
            .into_iter()
            .filter(|&c| !self.metamodel.is_abstract(c))
            .map(|c| self.metamodel.class_name(c))
            .collect()
    }

    // ========== Validation walk ==========

    fn update_all_problems(&mut self, tree: &ModelTree, identifiers: &dyn IdentifierProvider) {
        // Annotations of nodes removed since the last commit go with them
        self.sink.retain(&|node| tree.contains(node));

        let mut stats = WalkStats::default();
        for &child in tree.children(tree.root()) {
            self.update_element_problems(tree, identifiers, child, &mut stats);
        }

        tracing::debug!(
            elements = stats.elements,
            slots = stats.slots,
            problems = stats.problems,
            "Revalidated model"
        );
    }

    fn update_element_problems(
        &mut self,
        tree: &ModelTree,
        identifiers: &dyn IdentifierProvider,
        element: NodeId,
        stats: &mut WalkStats,
    ) {
        // Placeholders and non-element nodes are not validated
        let Some(class) = tree.class_of(element) else {
            return;
        };
        let metamodel = self.metamodel;
        stats.elements += 1;

        self.sink.clear(element);
        let problems = self.check_element(tree, identifiers, element, class);
        self.attach_all(element, problems, stats);

        let class_name = metamodel.class_name(class);
        for &slot in tree.slots(element) {
            stats.slots += 1;
            self.sink.clear(slot);

            let Some(feature) = tree.slot_feature(slot).and_then(|f| metamodel.feature(f)) else {
                tracing::warn!(%slot, %element, "Slot feature missing from metamodel");
                continue;
            };

            let problems = self.check_feature(tree, identifiers, element, &class_name, slot, feature);
            self.attach_all(slot, problems, stats);

            if feature.is_containment() {
                for &child in tree.children(slot) {
                    self.update_element_problems(tree, identifiers, child, stats);
                }
            }
        }
    }

    fn attach_all(&mut self, node: NodeId, problems: Problems, stats: &mut WalkStats) {
        for problem in problems {
            tracing::trace!(%node, message = %problem.message, "Problem");
            stats.problems += 1;
            self.sink.attach(node, problem);
        }
    }

    /// Structural problems of an element.
    fn check_element(
        &self,
        tree: &ModelTree,
        identifiers: &dyn IdentifierProvider,
        element: NodeId,
        class: ClassId,
    ) -> Problems {
        let mut problems = Problems::new();
        let class_name = self.metamodel.class_name(class);

        let at_root = tree
            .parent(element)
            .is_some_and(|parent| tree.is_root_container(parent));
        if at_root {
            if !self.root_classes.contains(&class) {
                problems.push(Problem::structural(messages::class_not_allowed(&class_name)));
            }
        } else {
            match tree
                .containing_feature(element)
                .and_then(|f| self.metamodel.feature(f))
            {
                Some(feature) => {
                    if !self.is_valid_instance(feature.type_ref, class) {
                        problems
                            .push(Problem::structural(messages::class_not_allowed(&class_name)));
                    }
                }
                None => tracing::warn!(%element, "Containment feature missing from metamodel"),
            }
        }

        if self.metamodel.is_abstract(class) {
            problems.push(Problem::structural(messages::abstract_class(&class_name)));
        }

        if let Some(identifier) = identifiers.identifier_of(element) {
            if identifiers.resolve(&identifier).is_duplicate() {
                problems.push(Problem::structural(messages::duplicate_identifier(
                    &identifier,
                )));
            }
        }

        problems
    }

    /// Multiplicity, reference, value and custom problems of a feature slot.
    fn check_feature(
        &self,
        tree: &ModelTree,
        identifiers: &dyn IdentifierProvider,
        element: NodeId,
        class_name: &str,
        slot: NodeId,
        feature: &FeatureDef,
    ) -> Problems {
        let mut problems = Problems::new();
        let metamodel = self.metamodel;
        let values = tree.filled_children(slot);
        let count = values.len();
        let multiplicity = feature.multiplicity;

        if multiplicity.exceeded_by(count) {
            if multiplicity.upper == Some(1) {
                let message = if feature.is_containment() {
                    messages::only_one_element(&feature.name)
                } else {
                    messages::only_one_value(&feature.name)
                };
                problems.push(Problem::multiplicity(message));
            }
            problems.push(Problem::multiplicity(messages::above_upper_limit(
                multiplicity.upper_limit_value(),
            )));
        }

        if multiplicity.unmet_by(count) {
            if multiplicity.lower == 1 {
                problems.push(Problem::multiplicity(messages::must_be_specified(
                    &feature.name,
                )));
            } else {
                let limit = match self.options.below_lower_limit {
                    ReportedLimit::Upper => multiplicity.upper_limit_value(),
                    ReportedLimit::Lower => i64::from(multiplicity.lower),
                };
                problems.push(Problem::multiplicity(messages::below_lower_limit(limit)));
            }
        }

        let constraints = self.registry.constraints_for(class_name, &feature.name);
        let owner = ElementRef::new(tree, metamodel, element);

        match feature.kind {
            FeatureKind::Containment => {
                // The child's own class is checked when the child is visited
                for &child in &values {
                    let value = ConstraintValue::Element(ElementRef::new(tree, metamodel, child));
                    Self::check_feature_constraints(&constraints, &owner, &value, &mut problems);
                }
            }
            FeatureKind::Reference => {
                for &child in &values {
                    let identifier = tree.text(child).unwrap_or_default();
                    let target = identifiers
                        .resolve(identifier)
                        .element()
                        .and_then(|t| tree.class_of(t).map(|c| (t, c)));

                    match target {
                        Some((target, target_class)) => {
                            if !self.is_valid_instance(feature.type_ref, target_class) {
                                problems.push(Problem::reference(messages::reference_not_allowed(
                                    &metamodel.class_name(target_class),
                                )));
                            } else {
                                let value =
                                    ConstraintValue::Element(ElementRef::new(tree, metamodel, target));
                                Self::check_feature_constraints(
                                    &constraints,
                                    &owner,
                                    &value,
                                    &mut problems,
                                );
                            }
                        }
                        None => {
                            problems.push(Problem::reference(messages::CAN_NOT_RESOLVE_REFERENCE));
                        }
                    }
                }
            }
            FeatureKind::Attribute => {
                let domain = self.attribute_domain(feature);
                for &child in &values {
                    let text = tree.text(child).unwrap_or_default();
                    if !domain.allows(text) {
                        problems.push(Problem::value_domain(messages::VALUE_NOT_ALLOWED));
                    } else {
                        let value = ConstraintValue::Literal(text);
                        Self::check_feature_constraints(&constraints, &owner, &value, &mut problems);
                    }
                }
            }
        }

        problems.dedup();
        problems
    }

    fn check_feature_constraints(
        constraints: &[&FeatureValueConstraint],
        element: &ElementRef<'_>,
        value: &ConstraintValue<'_>,
        problems: &mut Problems,
    ) {
        for constraint in constraints {
            if !constraint.check(element, value) {
                problems.push(Problem::custom(constraint.message(element)));
            }
        }
    }
}

impl<'m, S: ProblemSink> ModelChangeListener for ConstraintChecker<'m, S> {
    fn commit_changes(&mut self, tree: &ModelTree, identifiers: &dyn IdentifierProvider) {
        self.update_all_problems(tree, identifiers);
    }
}
