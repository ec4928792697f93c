//! Problem messages reported by the validation engine.
//!
//! These helpers keep the exact wording in one place, since editors match on
//! and display these strings verbatim.

/// Reference: the identifier matches no element, or more than one.
pub const CAN_NOT_RESOLVE_REFERENCE: &str = "can not resolve reference";

/// Value-domain: the literal is outside the attribute type's allowed values.
pub const VALUE_NOT_ALLOWED: &str = "value not allowed";

/// Structural: the element's class is not allowed where it sits.
pub fn class_not_allowed(class_name: &str) -> String {
    format!("element of class '{}' not allowed", class_name)
}

/// Structural: abstract classes cannot be instantiated.
pub fn abstract_class(class_name: &str) -> String {
    format!("class '{}' is abstract", class_name)
}

/// Structural: more than one element claims the identifier.
pub fn duplicate_identifier(identifier: &str) -> String {
    format!("duplicate identifier '{}'", identifier)
}

/// Multiplicity: a single-valued containment holds several elements.
pub fn only_one_element(feature_name: &str) -> String {
    format!("only one element may be specified as '{}'", feature_name)
}

/// Multiplicity: a single-valued reference or attribute holds several values.
pub fn only_one_value(feature_name: &str) -> String {
    format!("only one value may be specified as '{}'", feature_name)
}

/// Multiplicity: more values than the upper limit.
pub fn above_upper_limit(limit: i64) -> String {
    format!("above upper limit of '{}'", limit)
}

/// Multiplicity: a mandatory single feature is empty.
pub fn must_be_specified(feature_name: &str) -> String {
    format!("'{}' must be specified", feature_name)
}

/// Multiplicity: fewer values than the lower limit.
pub fn below_lower_limit(limit: i64) -> String {
    format!("below lower limit of '{}'", limit)
}

/// Reference: the target exists but its class does not fit the feature type.
pub fn reference_not_allowed(class_name: &str) -> String {
    format!("reference to class '{}' not allowed", class_name)
}
