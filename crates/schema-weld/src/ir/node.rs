//! Type and member metadata
//!
//! This module provides the nodes of an annotated type graph: one
//! [`TypeNode`] per introspected type, holding its [`MemberNode`]s in
//! declaration order (fields first, then accessors).

use crate::ir::{AccessMode, MemberCategory, MemberKind, TypeHandle, TypeRef, Visibility};
use serde::{Deserialize, Serialize};

/// One piece of documentation text attached to a member or type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocEntry {
    /// Name of the variant this entry targets; `None` for the default entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Documentation text
    pub text: String,
}

impl DocEntry {
    /// Create a default (undiscriminated) entry
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            discriminator: None,
            text: text.into(),
        }
    }

    /// Create an entry targeting the named variant
    pub fn for_variant(discriminator: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            discriminator: Some(discriminator.into()),
            text: text.into(),
        }
    }

    /// Check if this is the default entry
    pub fn is_default(&self) -> bool {
        self.discriminator.is_none()
    }
}

/// One variant of a polymorphic multi-type element
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantNode {
    /// Element name distinguishing this variant
    pub discriminator: String,
    /// Value type of the variant
    pub type_ref: TypeRef,
}

impl VariantNode {
    /// Create a new variant
    pub fn new(discriminator: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            discriminator: discriminator.into(),
            type_ref,
        }
    }
}

/// Field or accessor of a type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberNode {
    /// Declared member name (accessors keep their prefix, e.g. "getFoo")
    pub name: String,
    /// Field or accessor
    #[serde(default)]
    pub kind: MemberKind,
    /// Whether the member is static (enum constants are static)
    #[serde(default)]
    pub is_static: bool,
    /// Declared visibility
    #[serde(default)]
    pub visibility: Visibility,
    /// Structural category marker; `None` when unmarked (treated as Element)
    #[serde(default)]
    pub category: Option<MemberCategory>,
    /// Name override from the structural marker
    #[serde(default)]
    pub name_override: Option<String>,
    /// Documentation entries, normally at most one
    #[serde(default)]
    pub docs: Vec<DocEntry>,
    /// Declared value type
    #[serde(default)]
    pub value_type: TypeRef,
    /// Variants of a polymorphic element, empty otherwise
    #[serde(default)]
    pub variants: Vec<VariantNode>,
    /// Whether this member is one value of an enumeration type
    #[serde(default)]
    pub is_enum_constant: bool,
}

impl MemberNode {
    /// Create a field
    pub fn field(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            is_static: false,
            visibility: Visibility::NonPublic,
            category: None,
            name_override: None,
            docs: Vec::new(),
            value_type,
            variants: Vec::new(),
            is_enum_constant: false,
        }
    }

    /// Create a property-like accessor (e.g., "getFoo")
    pub fn accessor(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            kind: MemberKind::Accessor,
            ..Self::field(name, value_type)
        }
    }

    /// Create an enumeration constant
    pub fn enum_constant(name: impl Into<String>) -> Self {
        Self {
            is_static: true,
            visibility: Visibility::Public,
            is_enum_constant: true,
            ..Self::field(name, TypeRef::default())
        }
    }

    /// Mark as public
    pub fn public(mut self) -> Self {
        self.visibility = Visibility::Public;
        self
    }

    /// Mark as static
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Mark as element
    pub fn element(mut self) -> Self {
        self.category = Some(MemberCategory::Element);
        self
    }

    /// Mark as attribute
    pub fn attribute(mut self) -> Self {
        self.category = Some(MemberCategory::Attribute);
        self
    }

    /// Mark as transient
    pub fn transient(mut self) -> Self {
        self.category = Some(MemberCategory::Transient);
        self
    }

    /// Override the schema name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Add the default documentation entry
    pub fn with_doc(mut self, text: impl Into<String>) -> Self {
        self.docs.push(DocEntry::new(text));
        self
    }

    /// Add a documentation entry targeting a variant
    pub fn with_variant_doc(
        mut self,
        discriminator: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.docs.push(DocEntry::for_variant(discriminator, text));
        self
    }

    /// Add a polymorphic element variant
    pub fn variant(mut self, discriminator: impl Into<String>, type_ref: TypeRef) -> Self {
        self.variants.push(VariantNode::new(discriminator, type_ref));
        self
    }

    /// Effective category (unmarked members are elements)
    pub fn effective_category(&self) -> MemberCategory {
        self.category.unwrap_or(MemberCategory::Element)
    }

    /// Check whether the member carries an explicit structural marker
    pub fn has_structural_marker(&self) -> bool {
        matches!(
            self.category,
            Some(MemberCategory::Element) | Some(MemberCategory::Attribute)
        ) || self.name_override.is_some()
            || !self.variants.is_empty()
    }

    /// The undiscriminated documentation entry, if any
    pub fn default_doc(&self) -> Option<&DocEntry> {
        self.docs.iter().find(|d| d.is_default())
    }

    /// The entry for a discriminator, falling back to the default entry
    pub fn doc_for_variant(&self, discriminator: &str) -> Option<&DocEntry> {
        self.docs
            .iter()
            .find(|d| d.discriminator.as_deref() == Some(discriminator))
            .or_else(|| self.default_doc())
    }
}

/// Metadata for one introspected type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    /// Identity of the type
    pub handle: TypeHandle,
    /// Simple (unqualified) type name
    pub simple_name: String,
    /// Explicit schema name, replacing the derived default
    #[serde(default)]
    pub name_override: Option<String>,
    /// Namespace declared on the type itself
    #[serde(default)]
    pub declared_namespace: Option<String>,
    /// Default namespace of the enclosing module
    #[serde(default)]
    pub package_namespace: Option<String>,
    /// Documentation attached to the type
    #[serde(default)]
    pub doc: Option<String>,
    /// Default member eligibility
    #[serde(default)]
    pub access: AccessMode,
    /// Members in declaration order
    #[serde(default)]
    pub members: Vec<MemberNode>,
    /// Parent type
    #[serde(default)]
    pub super_type: Option<TypeHandle>,
    /// Whether members fold into the descendant's key
    #[serde(default)]
    pub transparent: bool,
}

impl TypeNode {
    /// Create a new type
    pub fn new(handle: impl Into<TypeHandle>, simple_name: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            simple_name: simple_name.into(),
            name_override: None,
            declared_namespace: None,
            package_namespace: None,
            doc: None,
            access: AccessMode::default(),
            members: Vec::new(),
            super_type: None,
            transparent: false,
        }
    }

    /// Create a type whose simple name is the last segment of its handle
    pub fn from_handle(handle: impl Into<TypeHandle>) -> Self {
        let handle = handle.into();
        let simple_name = handle.simple_name().to_string();
        Self::new(handle, simple_name)
    }

    /// Set the explicit schema name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_override = Some(name.into());
        self
    }

    /// Set the declared namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.declared_namespace = Some(namespace.into());
        self
    }

    /// Set the module default namespace
    pub fn with_package_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.package_namespace = Some(namespace.into());
        self
    }

    /// Set documentation
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Set the access mode
    pub fn with_access(mut self, access: AccessMode) -> Self {
        self.access = access;
        self
    }

    /// Add a member
    pub fn member(mut self, member: MemberNode) -> Self {
        self.members.push(member);
        self
    }

    /// Set members
    pub fn with_members(mut self, members: Vec<MemberNode>) -> Self {
        self.members = members;
        self
    }

    /// Set the parent type
    pub fn extends(mut self, parent: impl Into<TypeHandle>) -> Self {
        self.super_type = Some(parent.into());
        self
    }

    /// Mark as transparent
    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    /// Members that are fields
    pub fn fields(&self) -> impl Iterator<Item = &MemberNode> {
        self.members.iter().filter(|m| m.kind == MemberKind::Field)
    }

    /// Members that are accessors
    pub fn accessors(&self) -> impl Iterator<Item = &MemberNode> {
        self.members.iter().filter(|m| m.kind == MemberKind::Accessor)
    }

    /// Fields first, then accessors, each in declaration order
    pub fn ordered_members(&self) -> impl Iterator<Item = &MemberNode> {
        self.fields().chain(self.accessors())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_structural_marker() {
        let plain = MemberNode::field("value", TypeRef::string());
        assert!(!plain.has_structural_marker());
        assert_eq!(plain.effective_category(), MemberCategory::Element);

        assert!(plain.clone().element().has_structural_marker());
        assert!(plain.clone().attribute().has_structural_marker());
        assert!(plain.clone().named("v").has_structural_marker());
        assert!(!plain.clone().transient().has_structural_marker());
        assert!(plain
            .variant("integer", TypeRef::int())
            .has_structural_marker());
    }

    #[test]
    fn test_doc_for_variant_falls_back() {
        let member = MemberNode::field("elements", TypeRef::list(TypeRef::string()))
            .with_variant_doc("integer", "about integer")
            .with_doc("about object");

        assert_eq!(member.default_doc().map(|d| d.text.as_str()), Some("about object"));
        assert_eq!(
            member.doc_for_variant("integer").map(|d| d.text.as_str()),
            Some("about integer")
        );
        assert_eq!(
            member.doc_for_variant("string").map(|d| d.text.as_str()),
            Some("about object")
        );
    }

    #[test]
    fn test_ordered_members_puts_fields_first() {
        let node = TypeNode::from_handle("model::A")
            .member(MemberNode::accessor("getAttr", TypeRef::string()))
            .member(MemberNode::field("attr", TypeRef::string()));

        assert_eq!(node.simple_name, "A");
        let names: Vec<_> = node.ordered_members().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["attr", "getAttr"]);
    }

    #[test]
    fn test_enum_constant() {
        let constant = MemberNode::enum_constant("y").with_doc("documentation for enum value");
        assert!(constant.is_static);
        assert!(constant.is_enum_constant);
        assert!(constant.visibility.is_public());
    }
}
