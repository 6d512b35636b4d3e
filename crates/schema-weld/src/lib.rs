//! Schema-Weld: type graph IR for schema documentation
//!
//! This crate describes an object-oriented type graph (types, their fields
//! and accessors, enumeration constants and polymorphic element variants)
//! together with the documentation text attached to it. It is the input side
//! of `schema-etch`, which walks the graph and produces the documentation
//! mapping merged into generated schemas.
//!
//! # Architecture
//!
//! - `ir`: Type nodes, member nodes, type references and schema modules
//! - `ir::introspect`: The [`Introspect`] capability the walker consumes
//! - `ir::graph`: [`TypeGraph`], an in-memory registry implementing it
//! - `ir::inventory`: Compile-time registration used by `#[derive(SchemaType)]`
//!
//! # Usage
//!
//! ```rust
//! use schema_weld::{MemberNode, TypeGraph, TypeNode, TypeRef};
//!
//! let mut graph = TypeGraph::new();
//! graph.register(
//!     TypeNode::new("model::A", "A")
//!         .with_namespace("http://example.org/a")
//!         .with_doc("some docu about a")
//!         .member(MemberNode::field("b", TypeRef::named("model::B")).element()),
//! );
//! assert!(graph.contains("model::A"));
//! ```

pub mod ir;

// Re-export commonly used types
pub use ir::{
    AccessMode, DocEntry, Introspect, IntrospectionError, MemberCategory, MemberKind, MemberNode,
    ModuleBuilder, ModuleValidationError, SchemaModule, SchemaPrimitive, SchemaType, TypeGraph,
    TypeHandle, TypeNode, TypeRef, VariantNode, Visibility, collect_types, SCHEMA_TYPES,
};

// Re-export linkme for inventory
pub use linkme;
