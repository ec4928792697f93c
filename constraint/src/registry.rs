//! The ConstraintRegistry - feature value constraints by class and feature.

use crate::FeatureValueConstraint;
use std::collections::HashMap;

/// Stores feature value constraints keyed by (class name, feature name).
///
/// Constraints are registered once before validation and read-only afterwards.
/// Within a bucket, registration order is evaluation and message order.
#[derive(Debug, Default)]
pub struct ConstraintRegistry {
    /// Constraint definitions.
    constraints: Vec<FeatureValueConstraint>,
    /// Constraint indices by class name, then feature name.
    by_feature: HashMap<String, HashMap<String, Vec<usize>>>,
}

impl ConstraintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint to its (class, feature) bucket.
    pub fn register(&mut self, constraint: FeatureValueConstraint) {
        let index = self.constraints.len();
        self.by_feature
            .entry(constraint.class_name().to_string())
            .or_default()
            .entry(constraint.feature_name().to_string())
            .or_default()
            .push(index);
        self.constraints.push(constraint);
    }

    /// Constraints for a class and feature, in registration order.
    ///
    /// The class is matched by exact name: constraints registered for a
    /// superclass do not apply to instances of its subclasses.
    pub fn constraints_for(&self, class_name: &str, feature_name: &str) -> Vec<&FeatureValueConstraint> {
        self.by_feature
            .get(class_name)
            .and_then(|by_feature| by_feature.get(feature_name))
            .map(|indices| indices.iter().map(|&i| &self.constraints[i]).collect())
            .unwrap_or_default()
    }

    /// Get all constraints.
    pub fn all(&self) -> impl Iterator<Item = &FeatureValueConstraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}
