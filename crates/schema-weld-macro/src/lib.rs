//! Derive macro for schema-weld
//!
//! `#[derive(SchemaType)]` describes a struct or a fieldless enum as a
//! [`schema_weld::TypeNode`] and registers the description in the
//! schema-weld inventory, so `TypeGraph::from_inventory()` sees it.
//!
//! # Usage
//!
//! ```text
//! use schema_weld_macro::SchemaType;
//!
//! #[derive(SchemaType)]
//! #[schema(namespace = "http://example.org/a", doc = "some docu about a")]
//! pub struct A {
//!     #[schema(element, doc = "docu about b")]
//!     pub b: B,
//!     #[schema(attribute(name = "int"))]
//!     pub integer: i32,
//!     #[schema(transient)]
//!     cache: Vec<String>,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod attrs;
mod schema_type;
mod type_parser;

/// Derive a schema description for a type
///
/// # Type attributes
/// - `#[schema(name = "...")]` - Schema name override
/// - `#[schema(namespace = "...")]` - Declared namespace
/// - `#[schema(access = "public_member" | "field" | "property" | "none")]`
/// - `#[schema(transparent)]` - Not a schema type of its own; subtypes inherit its members
/// - `#[schema(extends = Parent)]` - Supertype, which must derive `SchemaType` too
/// - `#[schema(doc = "...")]` - Documentation text
/// - `#[schema(rustdoc)]` - Use the `///` comments of the type, its fields and
///   its variants as documentation text, unless a `doc` is given
///
/// # Field attributes
/// - `#[schema(element)]`, `#[schema(element(name = "..."))]`
/// - `#[schema(attribute)]`, `#[schema(attribute(name = "..."))]`
/// - `#[schema(transient)]` - Never part of the schema
/// - `#[schema(doc = "...")]` - Default documentation
/// - `#[schema(doc(variant = "...", text = "..."))]` - Documentation of one variant
/// - `#[schema(variant(name = "...", ty = Type))]` - One variant of a polymorphic element
///
/// # Enum variant attributes
/// - `#[schema(doc = "...")]`
///
/// Generic types, tuple structs, unions and enums with data are rejected.
#[proc_macro_derive(SchemaType, attributes(schema))]
pub fn derive_schema_type(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    schema_type::derive_schema_type_impl(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
