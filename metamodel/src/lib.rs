//! Concrete Metamodel
//!
//! Runtime schema lookup. Single source of truth for classes, datatypes and features.
//! The metamodel is immutable after construction via MetamodelBuilder.

mod builder;
mod metamodel;
mod query;
mod types;

pub use builder::{ClassBuilder, MetamodelBuilder, MetamodelError, MetamodelResult};
pub use metamodel::Metamodel;
pub use query::MetamodelQuery;
pub use types::*;
