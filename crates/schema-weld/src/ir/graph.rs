//! In-memory type graph
//!
//! [`TypeGraph`] is the registry most callers hand to the walker. Types are
//! kept in registration order so that dumps and iteration are stable.
//!
//! A strict graph fails on any handle it does not know. A lenient graph
//! (the default for [`TypeGraph::from_inventory`]) treats unknown types
//! reached from a member as leaves with nothing to document, since derived
//! types routinely hold fields of types that never derive `SchemaType`.

use crate::ir::{
    collect_types, Introspect, IntrospectionError, ModuleValidationError, SchemaModule,
    TypeHandle, TypeNode,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Registry of type descriptions keyed by handle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGraph {
    types: IndexMap<TypeHandle, TypeNode>,
    #[serde(skip)]
    lenient: bool,
}

impl TypeGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph from every type registered with `#[derive(SchemaType)]`
    pub fn from_inventory() -> Self {
        let mut graph = Self::new().lenient(true);
        for node in collect_types() {
            graph.register(node);
        }
        graph
    }

    /// Answer unknown types reached from members with empty leaves
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Check whether unknown reached types are tolerated
    pub fn is_lenient(&self) -> bool {
        self.lenient
    }

    /// Load a graph from its JSON form
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Save the graph as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Register a type, replacing an earlier description with the same handle
    pub fn register(&mut self, node: TypeNode) -> Option<TypeNode> {
        self.types.insert(node.handle.clone(), node)
    }

    /// Register a type (builder style)
    pub fn with_type(mut self, node: TypeNode) -> Self {
        self.register(node);
        self
    }

    /// Register every type of a validated module
    pub fn register_module(&mut self, module: SchemaModule) -> Result<(), ModuleValidationError> {
        module.validate()?;
        for node in module.into_types() {
            self.register(node);
        }
        Ok(())
    }

    /// Apply a default namespace to every type under a module prefix that
    /// does not have one yet
    pub fn module_namespace(&mut self, prefix: &str, namespace: &str) -> usize {
        let mut applied = 0;
        for node in self.types.values_mut() {
            if node.handle.is_within(prefix) && node.package_namespace.is_none() {
                node.package_namespace = Some(namespace.to_string());
                applied += 1;
            }
        }
        applied
    }

    /// Look up a type
    pub fn get(&self, handle: &str) -> Option<&TypeNode> {
        self.types.get(&TypeHandle::new(handle))
    }

    /// Check whether a handle is registered
    pub fn contains(&self, handle: &str) -> bool {
        self.types.contains_key(&TypeHandle::new(handle))
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered types in registration order
    pub fn types(&self) -> impl Iterator<Item = &TypeNode> {
        self.types.values()
    }

    /// Registered handles in registration order
    pub fn handles(&self) -> impl Iterator<Item = &TypeHandle> {
        self.types.keys()
    }
}

impl Introspect for TypeGraph {
    fn describe(&self, handle: &TypeHandle) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        self.types
            .get(handle)
            .map(Cow::Borrowed)
            .ok_or_else(|| IntrospectionError::UnknownType(handle.clone()))
    }

    fn describe_reached(
        &self,
        handle: &TypeHandle,
    ) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        match self.types.get(handle) {
            Some(node) => Ok(Cow::Borrowed(node)),
            None if self.lenient => Ok(Cow::Owned(TypeNode::from_handle(handle.clone()))),
            None => Err(IntrospectionError::UnknownType(handle.clone())),
        }
    }
}

impl FromIterator<TypeNode> for TypeGraph {
    fn from_iter<I: IntoIterator<Item = TypeNode>>(iter: I) -> Self {
        let mut graph = Self::new();
        for node in iter {
            graph.register(node);
        }
        graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MemberNode, TypeRef};
    use pretty_assertions::assert_eq;

    fn sample() -> TypeGraph {
        TypeGraph::new()
            .with_type(
                TypeNode::from_handle("model::A")
                    .with_doc("some docu about a")
                    .member(MemberNode::field("b", TypeRef::named("model::B")).element()),
            )
            .with_type(TypeNode::from_handle("model::B").with_doc("docu about b"))
    }

    #[test]
    fn test_describe() {
        let graph = sample();
        let node = graph.describe(&TypeHandle::new("model::A")).unwrap();
        assert_eq!(node.doc.as_deref(), Some("some docu about a"));

        let missing = graph.describe(&TypeHandle::new("model::Z"));
        assert_eq!(
            missing.unwrap_err(),
            IntrospectionError::UnknownType(TypeHandle::new("model::Z"))
        );
    }

    #[test]
    fn test_lenient_graph_answers_reached_types() {
        let strict = sample();
        assert!(strict.describe_reached(&TypeHandle::new("ext::Uuid")).is_err());

        let lenient = sample().lenient(true);
        let leaf = lenient.describe_reached(&TypeHandle::new("ext::Uuid")).unwrap();
        assert_eq!(leaf.simple_name, "Uuid");
        assert!(leaf.doc.is_none());
        assert!(leaf.members.is_empty());

        // Named lookups stay strict
        assert!(lenient.describe(&TypeHandle::new("ext::Uuid")).is_err());
        assert!(TypeGraph::from_inventory().is_lenient());
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let graph = sample();
        let json = graph.to_json().unwrap();
        let loaded = TypeGraph::from_json(&json).unwrap();
        assert_eq!(loaded, graph);

        let handles: Vec<_> = loaded.handles().map(|h| h.as_str()).collect();
        assert_eq!(handles, vec!["model::A", "model::B"]);
    }

    #[test]
    fn test_module_namespace() {
        let mut graph = sample().with_type(TypeNode::from_handle("other::C"));
        let applied = graph.module_namespace("model::", "http://example.org/a");
        assert_eq!(applied, 2);
        assert_eq!(
            graph.get("model::B").unwrap().package_namespace.as_deref(),
            Some("http://example.org/a")
        );
        assert_eq!(graph.get("other::C").unwrap().package_namespace, None);
    }

    #[test]
    fn test_register_module() {
        let mut graph = TypeGraph::new();
        graph
            .register_module(
                SchemaModule::new("model")
                    .with_namespace("urn:m")
                    .type_def(TypeNode::from_handle("model::A")),
            )
            .unwrap();
        assert_eq!(
            graph.get("model::A").unwrap().package_namespace.as_deref(),
            Some("urn:m")
        );
    }
}
