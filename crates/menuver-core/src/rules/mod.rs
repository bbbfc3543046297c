//! Structural rules for menu trees
//!
//! - `validate` collects every violation of a whole tree (publish gate)
//! - `validate_single_node` gates one mutation and fails fast

pub mod structure;

pub use structure::{
    missing_required_fields, required_fields, validate, validate_single_node, validate_with,
    StructureLimits,
};
