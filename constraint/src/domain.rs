//! Attribute value domains.

use concrete_metamodel::{FeatureDef, MetamodelQuery, TypeKind};
use regex_lite::Regex;
use std::sync::OnceLock;

/// Literals accepted by boolean attributes.
pub const BOOLEAN_LITERALS: [&str; 2] = ["true", "false"];

/// Integer literals: optional minus, no leading zeros, `0` alone.
pub const INTEGER_PATTERN: &str = r"^(-?[1-9][0-9]*|0)$";

fn integer_regex() -> &'static Regex {
    static INTEGER: OnceLock<Regex> = OnceLock::new();
    INTEGER.get_or_init(|| Regex::new(INTEGER_PATTERN).expect("integer pattern compiles"))
}

/// The values an attribute feature accepts.
///
/// Editors use this to build value pickers; validation uses [`AttributeDomain::allows`].
#[derive(Debug, Clone)]
pub enum AttributeDomain {
    /// One of a fixed list (enumerations, booleans).
    Literals(Vec<String>),
    /// Any text matching the pattern (integers).
    Pattern(&'static Regex),
    /// No constraint on the text.
    Unconstrained,
}

impl AttributeDomain {
    /// The domain of a feature's declared type.
    pub fn of(metamodel: &dyn MetamodelQuery, feature: &FeatureDef) -> Self {
        match metamodel.kind_of(feature.type_ref) {
            TypeKind::Enum => {
                AttributeDomain::Literals(metamodel.literals_of(feature.type_ref).to_vec())
            }
            TypeKind::Boolean => {
                AttributeDomain::Literals(BOOLEAN_LITERALS.iter().map(|s| s.to_string()).collect())
            }
            TypeKind::Integer => AttributeDomain::Pattern(integer_regex()),
            TypeKind::Class | TypeKind::Other => AttributeDomain::Unconstrained,
        }
    }

    /// Check if a literal belongs to the domain.
    pub fn allows(&self, value: &str) -> bool {
        match self {
            AttributeDomain::Literals(literals) => literals.iter().any(|l| l == value),
            AttributeDomain::Pattern(pattern) => pattern.is_match(value),
            AttributeDomain::Unconstrained => true,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, AttributeDomain::Unconstrained)
    }
}
