//! Naming policy
//!
//! Derives the schema names that keys are built from. The walker only talks
//! to the [`NamingPolicy`] trait, so a merge step that expects a different
//! naming convention can be served by another policy.

use crate::diagnostics::EtchResult;
use crate::key::DocKey;
use schema_weld::{MemberKind, MemberNode, TypeNode};
use std::sync::Arc;

/// Name that means "derive the default" when written as an override
pub const USE_DEFAULT: &str = "##default";

/// Naming rules used to build keys
pub trait NamingPolicy {
    /// Schema name of a type
    fn type_name(&self, node: &TypeNode) -> String;

    /// Namespace of a type, empty when unqualified
    fn type_namespace(&self, node: &TypeNode) -> String;

    /// Schema name of a member
    fn member_name(&self, member: &MemberNode) -> String;

    /// Key of a type
    fn type_key(&self, node: &TypeNode) -> EtchResult<DocKey> {
        DocKey::for_type(&self.type_namespace(node), &self.type_name(node))
    }
}

impl<T: NamingPolicy + ?Sized> NamingPolicy for Arc<T> {
    fn type_name(&self, node: &TypeNode) -> String {
        (**self).type_name(node)
    }

    fn type_namespace(&self, node: &TypeNode) -> String {
        (**self).type_namespace(node)
    }

    fn member_name(&self, member: &MemberNode) -> String {
        (**self).member_name(member)
    }

    fn type_key(&self, node: &TypeNode) -> EtchResult<DocKey> {
        (**self).type_key(node)
    }
}

/// Naming rules of the schema generator
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl NamingPolicy for DefaultNaming {
    fn type_name(&self, node: &TypeNode) -> String {
        match explicit(node.name_override.as_deref()) {
            Some(name) => name.to_string(),
            None => lower_first(&node.simple_name),
        }
    }

    fn type_namespace(&self, node: &TypeNode) -> String {
        explicit(node.declared_namespace.as_deref())
            .or_else(|| explicit(node.package_namespace.as_deref()))
            .unwrap_or_default()
            .to_string()
    }

    fn member_name(&self, member: &MemberNode) -> String {
        if let Some(name) = explicit(member.name_override.as_deref()) {
            return name.to_string();
        }
        match member.kind {
            MemberKind::Accessor => accessor_property(&member.name),
            MemberKind::Field => member.name.clone(),
        }
    }
}

fn explicit(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != USE_DEFAULT)
}

/// Lower-case the first character
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Property name of an accessor: `getFoo` and `isFoo` become `foo`
pub fn accessor_property(name: &str) -> String {
    for prefix in ["get", "is"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            if rest.chars().next().is_some_and(char::is_uppercase) {
                return lower_first(rest);
            }
        }
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schema_weld::TypeRef;

    #[test]
    fn test_type_name() {
        let naming = DefaultNaming;
        assert_eq!(naming.type_name(&TypeNode::from_handle("model::WithLombok")), "withLombok");
        assert_eq!(
            naming.type_name(&TypeNode::from_handle("model::A").with_name("custom")),
            "custom"
        );
        assert_eq!(
            naming.type_name(&TypeNode::from_handle("model::A").with_name(USE_DEFAULT)),
            "a"
        );
    }

    #[test]
    fn test_type_namespace_precedence() {
        let naming = DefaultNaming;
        let node = TypeNode::from_handle("model::A").with_package_namespace("urn:package");
        assert_eq!(naming.type_namespace(&node), "urn:package");

        let node = node.with_namespace("urn:declared");
        assert_eq!(naming.type_namespace(&node), "urn:declared");

        assert_eq!(naming.type_namespace(&TypeNode::from_handle("model::A")), "");
        assert_eq!(
            naming
                .type_key(&TypeNode::from_handle("model::A").with_namespace("NS"))
                .unwrap()
                .as_str(),
            "{NS}a"
        );
    }

    #[test]
    fn test_member_name() {
        let naming = DefaultNaming;
        assert_eq!(
            naming.member_name(&MemberNode::accessor("getFoo", TypeRef::string())),
            "foo"
        );
        assert_eq!(
            naming.member_name(&MemberNode::accessor("isEnabled", TypeRef::string())),
            "enabled"
        );
        assert_eq!(
            naming.member_name(&MemberNode::accessor("getter", TypeRef::string())),
            "getter"
        );
        assert_eq!(
            naming.member_name(&MemberNode::field("getFoo", TypeRef::string())),
            "getFoo"
        );
        assert_eq!(
            naming.member_name(&MemberNode::field("int_attribute", TypeRef::int()).named("int")),
            "int"
        );
    }
}
