//! Concrete Model Tree
//!
//! This crate provides the model instance side of validation:
//! - The model tree: root container, elements, feature slots, values, placeholders
//! - Identifier index: resolve identifiers to elements, detect duplicates
//! - Change listener interface used by the editing layer

mod index;
mod listener;
mod tree;

pub use index::{IdentifierIndex, IdentifierProvider, Resolution};
pub use listener::ModelChangeListener;
pub use tree::*;
