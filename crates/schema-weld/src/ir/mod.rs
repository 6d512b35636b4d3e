//! Intermediate Representation (IR) for annotated type graphs
//!
//! This module provides the type system and metadata structures for
//! representing introspected types and the documentation attached to them.

pub mod types;
pub mod node;
pub mod module;
pub mod introspect;
pub mod graph;
pub mod inventory;

pub use types::*;
pub use node::*;
pub use module::*;
pub use introspect::*;
pub use graph::*;
pub use inventory::*;
