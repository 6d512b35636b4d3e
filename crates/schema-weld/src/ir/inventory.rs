//! Compile-time type inventory
//!
//! This module provides the infrastructure for collecting type descriptions
//! at compile time using the `linkme` crate's distributed slices.
//! `#[derive(SchemaType)]` registers every derived type here.

use crate::ir::TypeNode;

/// Distributed slice for collecting type descriptions at compile time
#[linkme::distributed_slice]
pub static SCHEMA_TYPES: [fn() -> TypeNode];

/// Collect all registered types from the distributed slice
pub fn collect_types() -> Vec<TypeNode> {
    SCHEMA_TYPES.iter().map(|f| f()).collect()
}

/// Macro to register a type description in the distributed slice
#[macro_export]
macro_rules! register_type {
    ($f:expr) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::SCHEMA_TYPES)]
            #[linkme(crate = $crate::linkme)]
            static SCHEMA_TYPE: fn() -> $crate::TypeNode = $f;
        };
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeGraph;

    fn registered_node() -> TypeNode {
        TypeNode::from_handle("inventory::Registered").with_doc("registered through the slice")
    }

    crate::register_type!(registered_node);

    #[test]
    fn test_registry_from_inventory() {
        let graph = TypeGraph::from_inventory();
        let node = graph.get("inventory::Registered").unwrap();
        assert_eq!(node.doc.as_deref(), Some("registered through the slice"));
    }
}
