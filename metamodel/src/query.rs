//! The query interface consumed by validation.

use crate::{ClassDef, DatatypeKind, FeatureDef, Metamodel, TypeKind, TypeRef};
use concrete_core::{ClassId, FeatureId};

/// Class and type questions answered by a metamodel.
///
/// The validation engine only talks to the metamodel through this trait, so
/// an editor can plug in whatever schema representation it loads.
pub trait MetamodelQuery {
    /// Look up a class definition.
    fn class(&self, id: ClassId) -> Option<&ClassDef>;

    /// Look up a class definition by name.
    fn class_by_name(&self, name: &str) -> Option<&ClassDef>;

    /// Look up a feature definition.
    fn feature(&self, id: FeatureId) -> Option<&FeatureDef>;

    /// The class itself followed by all its transitive subclasses.
    fn subtypes_and_self(&self, class: ClassId) -> Vec<ClassId>;

    /// Whether the class cannot be instantiated directly.
    fn is_abstract(&self, class: ClassId) -> bool {
        self.class(class).is_some_and(|c| c.is_abstract)
    }

    /// The kind tag of a type.
    fn kind_of(&self, type_ref: TypeRef) -> TypeKind;

    /// Literals of an enumeration, empty for any other type.
    fn literals_of(&self, type_ref: TypeRef) -> &[String];

    /// Display name of a class, falling back to its id.
    fn class_name(&self, class: ClassId) -> String {
        self.class(class)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| class.to_string())
    }
}

impl MetamodelQuery for Metamodel {
    fn class(&self, id: ClassId) -> Option<&ClassDef> {
        self.get_class(id)
    }

    fn class_by_name(&self, name: &str) -> Option<&ClassDef> {
        self.get_class_by_name(name)
    }

    fn feature(&self, id: FeatureId) -> Option<&FeatureDef> {
        self.get_feature(id)
    }

    fn subtypes_and_self(&self, class: ClassId) -> Vec<ClassId> {
        std::iter::once(class).chain(self.get_subtypes(class)).collect()
    }

    fn kind_of(&self, type_ref: TypeRef) -> TypeKind {
        match type_ref {
            TypeRef::Class(_) => TypeKind::Class,
            TypeRef::Datatype(id) => match self.get_datatype(id).map(|d| &d.kind) {
                Some(DatatypeKind::Enum(_)) => TypeKind::Enum,
                Some(DatatypeKind::Boolean) => TypeKind::Boolean,
                Some(DatatypeKind::Integer) => TypeKind::Integer,
                Some(DatatypeKind::Float | DatatypeKind::String) | None => TypeKind::Other,
            },
        }
    }

    fn literals_of(&self, type_ref: TypeRef) -> &[String] {
        match type_ref {
            TypeRef::Datatype(id) => match self.get_datatype(id).map(|d| &d.kind) {
                Some(DatatypeKind::Enum(literals)) => literals,
                _ => &[],
            },
            TypeRef::Class(_) => &[],
        }
    }
}
