//! The Metamodel - immutable schema lookup.

use crate::{ClassDef, DatatypeDef, FeatureDef, SubtypeIndex, TypeRef};
use concrete_core::{ClassId, DatatypeId, FeatureId};
use std::collections::{HashMap, HashSet};

/// The Metamodel provides runtime lookup of classes, datatypes and features.
/// It is immutable after construction.
#[derive(Debug, Default)]
pub struct Metamodel {
    /// Class definitions by ID.
    classes: HashMap<ClassId, ClassDef>,
    /// Datatype definitions by ID.
    datatypes: HashMap<DatatypeId, DatatypeDef>,
    /// Type lookup by name (classes and datatypes share one namespace).
    type_names: HashMap<String, TypeRef>,

    /// Feature definitions by ID.
    features: HashMap<FeatureId, FeatureDef>,

    /// Precomputed subtype relationships.
    subtype_index: SubtypeIndex,
}

impl Metamodel {
    /// Create a metamodel (use MetamodelBuilder for construction).
    pub(crate) fn new(
        classes: HashMap<ClassId, ClassDef>,
        datatypes: HashMap<DatatypeId, DatatypeDef>,
        type_names: HashMap<String, TypeRef>,
        features: HashMap<FeatureId, FeatureDef>,
        subtype_index: SubtypeIndex,
    ) -> Self {
        Self {
            classes,
            datatypes,
            type_names,
            features,
            subtype_index,
        }
    }

    // ==================== Type Lookups ====================

    /// Get a type reference by name.
    pub fn get_type_ref(&self, name: &str) -> Option<TypeRef> {
        self.type_names.get(name).copied()
    }

    /// Get a class definition by name.
    pub fn get_class_by_name(&self, name: &str) -> Option<&ClassDef> {
        match self.type_names.get(name)? {
            TypeRef::Class(id) => self.classes.get(id),
            TypeRef::Datatype(_) => None,
        }
    }

    /// Get a class ID by name.
    pub fn get_class_id(&self, name: &str) -> Option<ClassId> {
        self.get_class_by_name(name).map(|c| c.id)
    }

    /// Get a class definition by ID.
    pub fn get_class(&self, id: ClassId) -> Option<&ClassDef> {
        self.classes.get(&id)
    }

    /// Get all class definitions, in declaration order.
    pub fn all_classes(&self) -> Vec<&ClassDef> {
        let mut classes: Vec<&ClassDef> = self.classes.values().collect();
        classes.sort_by_key(|c| c.id);
        classes
    }

    /// Get the number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Get a datatype definition by ID.
    pub fn get_datatype(&self, id: DatatypeId) -> Option<&DatatypeDef> {
        self.datatypes.get(&id)
    }

    /// Get a datatype definition by name.
    pub fn get_datatype_by_name(&self, name: &str) -> Option<&DatatypeDef> {
        match self.type_names.get(name)? {
            TypeRef::Datatype(id) => self.datatypes.get(id),
            TypeRef::Class(_) => None,
        }
    }

    // ==================== Feature Lookups ====================

    /// Get a feature definition by ID.
    pub fn get_feature(&self, id: FeatureId) -> Option<&FeatureDef> {
        self.features.get(&id)
    }

    /// Find a feature of a class by name, including inherited features.
    pub fn find_feature(&self, class_id: ClassId, name: &str) -> Option<&FeatureDef> {
        let class_def = self.classes.get(&class_id)?;
        for feature_id in &class_def.feature_ids {
            if let Some(feature) = self.features.get(feature_id) {
                if feature.name == name {
                    return Some(feature);
                }
            }
        }
        for &parent_id in &class_def.parent_ids {
            if let Some(feature) = self.find_feature(parent_id, name) {
                return Some(feature);
            }
        }
        None
    }

    /// Get all features of a class including inherited ones.
    ///
    /// Inherited features come first, then the class's own, each in
    /// declaration order. This is the slot order of a new element.
    pub fn all_features(&self, class_id: ClassId) -> Vec<&FeatureDef> {
        let mut result = Vec::new();
        let mut seen = HashSet::new();

        self.collect_features(class_id, &mut result, &mut seen);
        result
    }

    /// Helper to collect features from a class and its parents.
    fn collect_features<'a>(
        &'a self,
        class_id: ClassId,
        result: &mut Vec<&'a FeatureDef>,
        seen: &mut HashSet<FeatureId>,
    ) {
        if let Some(class_def) = self.classes.get(&class_id) {
            for &parent_id in &class_def.parent_ids {
                self.collect_features(parent_id, result, seen);
            }
            for feature_id in &class_def.feature_ids {
                if let Some(feature) = self.features.get(feature_id) {
                    // Diamond inheritance reaches the same feature twice
                    if seen.insert(*feature_id) {
                        result.push(feature);
                    }
                }
            }
        }
    }

    // ==================== Subtype Queries ====================

    /// Check if `sub` is `super_class` or one of its subclasses.
    pub fn is_subtype(&self, sub: ClassId, super_class: ClassId) -> bool {
        self.subtype_index.is_subtype(sub, super_class)
    }

    /// Get all subclasses of a class (not including the class itself).
    pub fn get_subtypes(&self, class_id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.subtype_index.get_subtypes(class_id)
    }

    /// Get all superclasses of a class (not including the class itself).
    pub fn get_supertypes(&self, class_id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.subtype_index.get_supertypes(class_id)
    }
}
