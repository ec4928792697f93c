//! Metamodel definition types.

use concrete_core::{ClassId, DatatypeId, FeatureId};
use std::collections::{BTreeSet, HashMap};

/// The value space of a non-class type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatatypeKind {
    /// Enumeration with its ordered literals.
    Enum(Vec<String>),
    Boolean,
    Integer,
    Float,
    String,
}

/// Primitive or enumeration type definition.
#[derive(Debug, Clone)]
pub struct DatatypeDef {
    /// Unique identifier.
    pub id: DatatypeId,
    /// Type name.
    pub name: String,
    /// Value space.
    pub kind: DatatypeKind,
}

/// The declared type of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Class(ClassId),
    Datatype(DatatypeId),
}

impl TypeRef {
    /// The class behind this type, if it is a class type.
    pub fn as_class(&self) -> Option<ClassId> {
        match self {
            TypeRef::Class(id) => Some(*id),
            TypeRef::Datatype(_) => None,
        }
    }
}

/// Kind tag of a type, as answered by metamodel queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Enum,
    Boolean,
    Integer,
    /// Any other primitive (strings, floats): no attribute-domain constraint.
    Other,
}

/// How the values of a feature relate to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Children are owned elements.
    Containment,
    /// Values are identifiers of other elements.
    Reference,
    /// Values are primitive literals.
    Attribute,
}

/// Lower and upper bound on the number of values of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    pub lower: u32,
    /// `None` means unbounded.
    pub upper: Option<u32>,
}

impl Multiplicity {
    pub fn new(lower: u32, upper: Option<u32>) -> Self {
        Self { lower, upper }
    }

    /// Optional single value (`0..1`).
    pub fn optional() -> Self {
        Self::new(0, Some(1))
    }

    /// Mandatory single value (`1..1`).
    pub fn required() -> Self {
        Self::new(1, Some(1))
    }

    /// Any number of values (`0..*`).
    pub fn many() -> Self {
        Self::new(0, None)
    }

    /// Upper limit as a metamodel number, `-1` meaning unbounded.
    pub fn upper_limit_value(&self) -> i64 {
        self.upper.map(i64::from).unwrap_or(-1)
    }

    /// Check if `count` values exceed the upper limit.
    pub fn exceeded_by(&self, count: usize) -> bool {
        self.upper.is_some_and(|upper| count > upper as usize)
    }

    /// Check if `count` values stay below a positive lower limit.
    pub fn unmet_by(&self, count: usize) -> bool {
        self.lower > 0 && count < self.lower as usize
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::optional()
    }
}

/// Feature definition within a class.
#[derive(Debug, Clone)]
pub struct FeatureDef {
    /// Unique identifier.
    pub id: FeatureId,
    /// Feature name, unique within the owning class hierarchy.
    pub name: String,
    /// Class declaring the feature.
    pub owner: ClassId,
    /// Declared type.
    pub type_ref: TypeRef,
    pub kind: FeatureKind,
    pub multiplicity: Multiplicity,
}

impl FeatureDef {
    pub fn is_containment(&self) -> bool {
        self.kind == FeatureKind::Containment
    }

    pub fn is_reference(&self) -> bool {
        self.kind == FeatureKind::Reference
    }

    pub fn is_attribute(&self) -> bool {
        self.kind == FeatureKind::Attribute
    }
}

/// Class definition.
#[derive(Debug, Clone)]
pub struct ClassDef {
    /// Unique identifier.
    pub id: ClassId,
    /// Class name.
    pub name: String,
    /// Direct superclasses.
    pub parent_ids: Vec<ClassId>,
    /// Own features in declaration order (inherited ones are not listed).
    pub feature_ids: Vec<FeatureId>,
    /// Whether this class is abstract (cannot be instantiated directly).
    pub is_abstract: bool,
}

impl ClassDef {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids: Vec::new(),
            feature_ids: Vec::new(),
            is_abstract: false,
        }
    }
}

/// Precomputed subtype relationships.
#[derive(Debug, Default)]
pub struct SubtypeIndex {
    /// For each class, the set of all its subclasses (transitive).
    subtypes: HashMap<ClassId, BTreeSet<ClassId>>,
    /// For each class, the set of all its superclasses (transitive).
    supertypes: HashMap<ClassId, BTreeSet<ClassId>>,
}

impl SubtypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the subtype index from class definitions.
    pub fn build(classes: &HashMap<ClassId, ClassDef>) -> Self {
        let mut index = Self::new();

        for &class_id in classes.keys() {
            index.subtypes.insert(class_id, BTreeSet::new());
            index.supertypes.insert(class_id, BTreeSet::new());
        }

        // Direct parents first
        for (class_id, class_def) in classes {
            for &parent_id in &class_def.parent_ids {
                if let Some(parent_subtypes) = index.subtypes.get_mut(&parent_id) {
                    parent_subtypes.insert(*class_id);
                }
                if let Some(class_supertypes) = index.supertypes.get_mut(class_id) {
                    class_supertypes.insert(parent_id);
                }
            }
        }

        // Transitively close the relationships
        let class_ids: Vec<ClassId> = classes.keys().copied().collect();
        let mut changed = true;
        while changed {
            changed = false;
            for &class_id in &class_ids {
                let supertypes: Vec<ClassId> = index
                    .supertypes
                    .get(&class_id)
                    .map(|s| s.iter().copied().collect())
                    .unwrap_or_default();

                for super_id in supertypes {
                    let transitive: Vec<ClassId> = index
                        .supertypes
                        .get(&super_id)
                        .map(|s| s.iter().copied().collect())
                        .unwrap_or_default();

                    for trans_id in transitive {
                        if let Some(set) = index.supertypes.get_mut(&class_id) {
                            if set.insert(trans_id) {
                                changed = true;
                            }
                        }
                        if let Some(set) = index.subtypes.get_mut(&trans_id) {
                            set.insert(class_id);
                        }
                    }
                }
            }
        }

        index
    }

    /// Check if `sub` is `super_class` or one of its transitive subclasses.
    pub fn is_subtype(&self, sub: ClassId, super_class: ClassId) -> bool {
        if sub == super_class {
            return true;
        }
        self.supertypes
            .get(&sub)
            .is_some_and(|set| set.contains(&super_class))
    }

    /// Get all subclasses of a class (not including the class itself), in id order.
    pub fn get_subtypes(&self, class_id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.subtypes
            .get(&class_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Get all superclasses of a class (not including the class itself), in id order.
    pub fn get_supertypes(&self, class_id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.supertypes
            .get(&class_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }
}
