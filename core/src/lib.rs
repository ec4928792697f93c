//! Concrete Core Types
//!
//! This crate provides the foundational types used throughout the validation stack:
//! - Identity types (NodeId, ClassId, DatatypeId, FeatureId)
//! - Common error types for model tree edits
//! - Problem message wording

mod error;
mod id;
pub mod messages;

pub use error::*;
pub use id::*;
