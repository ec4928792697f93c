//! MetamodelBuilder for constructing an immutable Metamodel.

use crate::{
    ClassDef, DatatypeDef, DatatypeKind, FeatureDef, FeatureKind, Metamodel, Multiplicity,
    SubtypeIndex, TypeRef,
};
use concrete_core::{ClassId, DatatypeId, FeatureId};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur during metamodel construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetamodelError {
    #[error("Duplicate type name: {0}")]
    DuplicateTypeName(String),

    #[error("Unknown parent class: {0}")]
    UnknownParentClass(String),

    #[error("Duplicate feature '{feature}' in class {class}")]
    DuplicateFeatureName { class: String, feature: String },

    #[error("Unknown type '{type_name}' for feature {class}.{feature}")]
    UnknownFeatureType {
        class: String,
        feature: String,
        type_name: String,
    },

    #[error("Feature {class}.{feature} must be typed by a class")]
    ClassTypeRequired { class: String, feature: String },

    #[error("Attribute {class}.{feature} must be typed by a datatype")]
    DatatypeRequired { class: String, feature: String },

    #[error("Feature {class}.{feature} has an upper limit below its lower limit")]
    InvalidMultiplicity { class: String, feature: String },
}

/// Result type for metamodel construction.
pub type MetamodelResult<T> = Result<T, MetamodelError>;

/// Builtin datatypes available in every metamodel.
const BUILTIN_DATATYPES: [(&str, DatatypeKind); 4] = [
    ("String", DatatypeKind::String),
    ("Integer", DatatypeKind::Integer),
    ("Float", DatatypeKind::Float),
    ("Boolean", DatatypeKind::Boolean),
];

/// A feature whose type name is resolved at build time.
#[derive(Debug)]
struct PendingFeature {
    id: FeatureId,
    owner: ClassId,
    name: String,
    kind: FeatureKind,
    type_name: String,
    multiplicity: Multiplicity,
}

/// Builder for constructing an immutable Metamodel.
#[derive(Debug)]
pub struct MetamodelBuilder {
    /// Next class ID to allocate.
    next_class_id: u32,
    /// Next datatype ID to allocate.
    next_datatype_id: u32,
    /// Next feature ID to allocate.
    next_feature_id: u32,

    /// Classes being built.
    classes: HashMap<ClassId, ClassDef>,
    /// Datatypes being built.
    datatypes: HashMap<DatatypeId, DatatypeDef>,
    /// Type name to reference mapping.
    type_names: HashMap<String, TypeRef>,

    /// Features awaiting type resolution.
    features: Vec<PendingFeature>,
}

impl Default for MetamodelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetamodelBuilder {
    /// Create a new builder with the builtin datatypes registered.
    pub fn new() -> Self {
        let mut builder = Self {
            next_class_id: 0,
            next_datatype_id: 0,
            next_feature_id: 0,
            classes: HashMap::new(),
            datatypes: HashMap::new(),
            type_names: HashMap::new(),
            features: Vec::new(),
        };
        for (name, kind) in BUILTIN_DATATYPES {
            builder.insert_datatype(name.to_string(), kind);
        }
        builder
    }

    /// Add a primitive datatype.
    pub fn add_datatype(
        &mut self,
        name: impl Into<String>,
        kind: DatatypeKind,
    ) -> MetamodelResult<DatatypeId> {
        let name = name.into();
        if self.type_names.contains_key(&name) {
            return Err(MetamodelError::DuplicateTypeName(name));
        }
        Ok(self.insert_datatype(name, kind))
    }

    /// Add an enumeration with its literals in order.
    pub fn add_enum<I, S>(&mut self, name: impl Into<String>, literals: I) -> MetamodelResult<DatatypeId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let literals = literals.into_iter().map(Into::into).collect();
        self.add_datatype(name, DatatypeKind::Enum(literals))
    }

    fn insert_datatype(&mut self, name: String, kind: DatatypeKind) -> DatatypeId {
        let id = DatatypeId::new(self.next_datatype_id);
        self.next_datatype_id += 1;

        self.type_names.insert(name.clone(), TypeRef::Datatype(id));
        self.datatypes.insert(id, DatatypeDef { id, name, kind });
        id
    }

    /// Add a class definition.
    pub fn add_class(&mut self, name: impl Into<String>) -> ClassBuilder<'_> {
        let name = name.into();
        let id = ClassId::new(self.next_class_id);
        self.next_class_id += 1;

        ClassBuilder {
            builder: self,
            id,
            name,
            parent_names: Vec::new(),
            features: Vec::new(),
            is_abstract: false,
        }
    }

    /// Get a class ID by name.
    pub fn get_class_id(&self, name: &str) -> Option<ClassId> {
        self.type_names.get(name).and_then(TypeRef::as_class)
    }

    /// Names of the features declared by a class and its ancestors.
    fn inherited_feature_names(&self, class_id: ClassId, names: &mut Vec<String>) {
        if let Some(class_def) = self.classes.get(&class_id) {
            for &parent_id in &class_def.parent_ids {
                self.inherited_feature_names(parent_id, names);
            }
        }
        names.extend(
            self.features
                .iter()
                .filter(|f| f.owner == class_id)
                .map(|f| f.name.clone()),
        );
    }

    /// Build the immutable Metamodel.
    pub fn build(self) -> MetamodelResult<Metamodel> {
        let mut features = HashMap::new();

        for pending in self.features {
            let class_name = self
                .classes
                .get(&pending.owner)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| pending.owner.to_string());

            let type_ref = match self.type_names.get(&pending.type_name) {
                Some(&type_ref) => type_ref,
                None => {
                    return Err(MetamodelError::UnknownFeatureType {
                        class: class_name,
                        feature: pending.name,
                        type_name: pending.type_name,
                    })
                }
            };

            match (pending.kind, type_ref) {
                (FeatureKind::Containment | FeatureKind::Reference, TypeRef::Datatype(_)) => {
                    return Err(MetamodelError::ClassTypeRequired {
                        class: class_name,
                        feature: pending.name,
                    });
                }
                (FeatureKind::Attribute, TypeRef::Class(_)) => {
                    return Err(MetamodelError::DatatypeRequired {
                        class: class_name,
                        feature: pending.name,
                    });
                }
                _ => {}
            }

            features.insert(
                pending.id,
                FeatureDef {
                    id: pending.id,
                    name: pending.name,
                    owner: pending.owner,
                    type_ref,
                    kind: pending.kind,
                    multiplicity: pending.multiplicity,
                },
            );
        }

        let subtype_index = SubtypeIndex::build(&self.classes);

        Ok(Metamodel::new(
            self.classes,
            self.datatypes,
            self.type_names,
            features,
            subtype_index,
        ))
    }
}

/// A feature declared on a class under construction.
struct FeatureSpec {
    name: String,
    kind: FeatureKind,
    type_name: String,
    multiplicity: Multiplicity,
}

/// Builder for a class definition.
pub struct ClassBuilder<'a> {
    builder: &'a mut MetamodelBuilder,
    id: ClassId,
    name: String,
    parent_names: Vec<String>,
    features: Vec<FeatureSpec>,
    is_abstract: bool,
}

impl<'a> ClassBuilder<'a> {
    /// Add a parent class by name.
    pub fn extends(mut self, parent_name: impl Into<String>) -> Self {
        self.parent_names.push(parent_name.into());
        self
    }

    /// Mark as abstract.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Add a containment feature holding elements of `type_name`.
    pub fn containment(
        self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        self.feature(name, FeatureKind::Containment, type_name, multiplicity)
    }

    /// Add a reference feature pointing at elements of `type_name`.
    pub fn reference(
        self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        self.feature(name, FeatureKind::Reference, type_name, multiplicity)
    }

    /// Add an attribute feature holding literals of `type_name`.
    pub fn attribute(
        self,
        name: impl Into<String>,
        type_name: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        self.feature(name, FeatureKind::Attribute, type_name, multiplicity)
    }

    fn feature(
        mut self,
        name: impl Into<String>,
        kind: FeatureKind,
        type_name: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        self.features.push(FeatureSpec {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            multiplicity,
        });
        self
    }

    /// Finish building this class.
    pub fn done(self) -> MetamodelResult<ClassId> {
        if self.builder.type_names.contains_key(&self.name) {
            return Err(MetamodelError::DuplicateTypeName(self.name));
        }

        // Resolve parent IDs
        let mut parent_ids = Vec::new();
        for parent_name in &self.parent_names {
            match self.builder.get_class_id(parent_name) {
                Some(parent_id) => parent_ids.push(parent_id),
                None => return Err(MetamodelError::UnknownParentClass(parent_name.clone())),
            }
        }

        let mut taken = Vec::new();
        for &parent_id in &parent_ids {
            self.builder.inherited_feature_names(parent_id, &mut taken);
        }
        for spec in &self.features {
            if taken.contains(&spec.name) {
                return Err(MetamodelError::DuplicateFeatureName {
                    class: self.name,
                    feature: spec.name.clone(),
                });
            }
            if spec
                .multiplicity
                .upper
                .is_some_and(|upper| upper < spec.multiplicity.lower)
            {
                return Err(MetamodelError::InvalidMultiplicity {
                    class: self.name,
                    feature: spec.name.clone(),
                });
            }
            taken.push(spec.name.clone());
        }

        let mut feature_ids = Vec::with_capacity(self.features.len());
        for spec in self.features {
            let id = FeatureId::new(self.builder.next_feature_id);
            self.builder.next_feature_id += 1;
            feature_ids.push(id);

            self.builder.features.push(PendingFeature {
                id,
                owner: self.id,
                name: spec.name,
                kind: spec.kind,
                type_name: spec.type_name,
                multiplicity: spec.multiplicity,
            });
        }

        let class_def = ClassDef {
            id: self.id,
            name: self.name.clone(),
            parent_ids,
            feature_ids,
            is_abstract: self.is_abstract,
        };

        self.builder
            .type_names
            .insert(self.name, TypeRef::Class(self.id));
        self.builder.classes.insert(self.id, class_def);

        Ok(self.id)
    }
}
