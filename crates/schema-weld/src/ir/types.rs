//! Type references for Schema-Weld
//!
//! This module provides the representation of a member's declared value type
//! and the identity handles used to look types up in a type graph.
//!
//! # Type References
//!
//! | Reference | Meaning | Visited by the walker |
//! |-----------|---------|-----------------------|
//! | `Primitive(p)` | Built-in value (`xs:int`, `xs:string`, ...) | never |
//! | `Named(handle)` | A type described by the introspector | once per run |
//! | `List(T)` | Repeated value of `T` | through `T` |
//! | `Optional(T)` | Optional value of `T` | through `T` |
//! | `Map { key, value }` | Keyed values | through key and value |
//! | `Boxed(T)` | Indirection (`Box`, `Arc`, `Rc`, `&T`) | through `T` |
//!
//! Containers are transparent for traversal: a `List(Named("model::C"))`
//! leads the walker to `model::C` exactly as a plain `Named("model::C")`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identity of a type in a type graph.
///
/// Two handles are the same type if and only if their paths are equal;
/// structural equality of the described nodes plays no role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeHandle(String);

impl TypeHandle {
    /// Create a handle from a type path (e.g., "model::A")
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The full path of the handle
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module part of the path ("model::A" -> "model"), if any
    pub fn module_path(&self) -> Option<&str> {
        self.0.rsplit_once("::").map(|(module, _)| module)
    }

    /// Last path segment ("model::A" -> "A")
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once("::").map_or(&self.0, |(_, name)| name)
    }

    /// Check whether the type lives under the given path prefix
    pub fn is_within(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeHandle {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for TypeHandle {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Built-in value types. These never carry documentation of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaPrimitive {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    UnsignedByte,
    UnsignedShort,
    UnsignedInt,
    UnsignedLong,
    Float,
    Double,
    String,
    Char,
    Bytes,
    Unit,
}

impl SchemaPrimitive {
    /// XML Schema name of the primitive
    pub fn xsd_name(&self) -> &'static str {
        match self {
            SchemaPrimitive::Bool => "xs:boolean",
            SchemaPrimitive::Byte => "xs:byte",
            SchemaPrimitive::Short => "xs:short",
            SchemaPrimitive::Int => "xs:int",
            SchemaPrimitive::Long => "xs:long",
            SchemaPrimitive::UnsignedByte => "xs:unsignedByte",
            SchemaPrimitive::UnsignedShort => "xs:unsignedShort",
            SchemaPrimitive::UnsignedInt => "xs:unsignedInt",
            SchemaPrimitive::UnsignedLong => "xs:unsignedLong",
            SchemaPrimitive::Float => "xs:float",
            SchemaPrimitive::Double => "xs:double",
            SchemaPrimitive::String | SchemaPrimitive::Char => "xs:string",
            SchemaPrimitive::Bytes => "xs:base64Binary",
            SchemaPrimitive::Unit => "xs:anyType",
        }
    }

    /// Parse from a Rust primitive type name
    pub fn from_rust_type(s: &str) -> Option<Self> {
        match s {
            "bool" => Some(SchemaPrimitive::Bool),
            "i8" => Some(SchemaPrimitive::Byte),
            "i16" => Some(SchemaPrimitive::Short),
            "i32" | "isize" => Some(SchemaPrimitive::Int),
            "i64" | "i128" => Some(SchemaPrimitive::Long),
            "u8" => Some(SchemaPrimitive::UnsignedByte),
            "u16" => Some(SchemaPrimitive::UnsignedShort),
            "u32" | "usize" => Some(SchemaPrimitive::UnsignedInt),
            "u64" | "u128" => Some(SchemaPrimitive::UnsignedLong),
            "f32" => Some(SchemaPrimitive::Float),
            "f64" => Some(SchemaPrimitive::Double),
            "String" | "str" | "&str" => Some(SchemaPrimitive::String),
            "char" => Some(SchemaPrimitive::Char),
            "()" => Some(SchemaPrimitive::Unit),
            _ => None,
        }
    }
}

impl fmt::Display for SchemaPrimitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.xsd_name())
    }
}

/// Declared value type of a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Built-in value
    Primitive(SchemaPrimitive),

    /// Reference to a described type
    Named(TypeHandle),

    /// Repeated values
    List(Box<TypeRef>),

    /// Optional value
    Optional(Box<TypeRef>),

    /// Keyed values
    Map {
        key: Box<TypeRef>,
        value: Box<TypeRef>,
    },

    /// Indirection (Box, Arc, Rc, references)
    Boxed(Box<TypeRef>),
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Primitive(SchemaPrimitive::Unit)
    }
}

impl TypeRef {
    /// Create a primitive reference
    pub fn primitive(p: SchemaPrimitive) -> Self {
        TypeRef::Primitive(p)
    }

    /// Create a string reference
    pub fn string() -> Self {
        TypeRef::Primitive(SchemaPrimitive::String)
    }

    /// Create an int reference
    pub fn int() -> Self {
        TypeRef::Primitive(SchemaPrimitive::Int)
    }

    /// Create a reference to a described type
    pub fn named(handle: impl Into<TypeHandle>) -> Self {
        TypeRef::Named(handle.into())
    }

    /// Create a reference to the Rust type `T`, using its type name as handle
    pub fn of<T: ?Sized>() -> Self {
        TypeRef::Named(TypeHandle::new(std::any::type_name::<T>()))
    }

    /// Create a list reference
    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Create an optional reference
    pub fn optional(inner: TypeRef) -> Self {
        TypeRef::Optional(Box::new(inner))
    }

    /// Create a map reference
    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        TypeRef::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a boxed reference
    pub fn boxed(inner: TypeRef) -> Self {
        TypeRef::Boxed(Box::new(inner))
    }

    /// Check if this is a primitive
    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// Every named type reachable through containers, in declaration order
    pub fn named_types(&self) -> Vec<&TypeHandle> {
        let mut out = Vec::new();
        self.collect_named(&mut out);
        out
    }

    fn collect_named<'a>(&'a self, out: &mut Vec<&'a TypeHandle>) {
        match self {
            TypeRef::Primitive(_) => {}
            TypeRef::Named(handle) => out.push(handle),
            TypeRef::List(inner) | TypeRef::Optional(inner) | TypeRef::Boxed(inner) => {
                inner.collect_named(out)
            }
            TypeRef::Map { key, value } => {
                key.collect_named(out);
                value.collect_named(out);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => write!(f, "{}", p),
            TypeRef::Named(handle) => write!(f, "{}", handle),
            TypeRef::List(inner) => write!(f, "list<{}>", inner),
            TypeRef::Optional(inner) => write!(f, "optional<{}>", inner),
            TypeRef::Map { key, value } => write!(f, "map<{}, {}>", key, value),
            TypeRef::Boxed(inner) => write!(f, "{}", inner),
        }
    }
}

/// Default member eligibility of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Only public members take part unless explicitly annotated
    #[default]
    PublicMembersOnly,
    /// Every non-static field takes part
    AllFields,
    /// Every accessor takes part
    AllProperties,
    /// Only explicitly annotated members take part
    None,
}

impl AccessMode {
    /// Parse from the attribute spelling used by `#[schema(access = "...")]`
    pub fn from_attr(s: &str) -> Option<Self> {
        match s {
            "public_member" | "public" => Some(AccessMode::PublicMembersOnly),
            "field" | "fields" => Some(AccessMode::AllFields),
            "property" | "properties" => Some(AccessMode::AllProperties),
            "none" => Some(AccessMode::None),
            _ => None,
        }
    }
}

/// Declared visibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    NonPublic,
}

impl Visibility {
    /// Check if this is publicly visible
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }
}

/// Whether a member is a field or a property-like accessor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    #[default]
    Field,
    Accessor,
}

/// Structural category marker of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberCategory {
    Element,
    Attribute,
    Transient,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_handle_paths() {
        let handle = TypeHandle::new("model::inner::A");
        assert_eq!(handle.module_path(), Some("model::inner"));
        assert_eq!(handle.simple_name(), "A");
        assert!(handle.is_within("model::"));

        let bare = TypeHandle::new("A");
        assert_eq!(bare.module_path(), None);
        assert_eq!(bare.simple_name(), "A");
    }

    #[test]
    fn test_named_types_through_containers() {
        let ty = TypeRef::map(
            TypeRef::string(),
            TypeRef::list(TypeRef::optional(TypeRef::named("model::C"))),
        );
        let named: Vec<_> = ty.named_types().into_iter().map(|h| h.as_str()).collect();
        assert_eq!(named, vec!["model::C"]);

        assert!(TypeRef::int().named_types().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeRef::list(TypeRef::int()).to_string(), "list<xs:int>");
        assert_eq!(TypeRef::boxed(TypeRef::named("m::B")).to_string(), "m::B");
    }

    #[test]
    fn test_access_mode_from_attr() {
        assert_eq!(AccessMode::from_attr("field"), Some(AccessMode::AllFields));
        assert_eq!(AccessMode::from_attr("none"), Some(AccessMode::None));
        assert_eq!(AccessMode::from_attr("bogus"), None);
    }

    #[test]
    fn test_primitive_from_rust_type() {
        assert_eq!(SchemaPrimitive::from_rust_type("i32"), Some(SchemaPrimitive::Int));
        assert_eq!(SchemaPrimitive::from_rust_type("String"), Some(SchemaPrimitive::String));
        assert_eq!(SchemaPrimitive::from_rust_type("Foo"), None);
    }
}
