//! Structural introspection capability
//!
//! The documentation walker never touches concrete types. It asks an
//! [`Introspect`] implementation to describe a type by handle, so any source
//! of type metadata can feed it: the derive-based inventory, a JSON graph, or
//! a hand-written implementation over some other reflection system.

use crate::ir::{TypeHandle, TypeNode};
use std::borrow::Cow;
use thiserror::Error;

/// Errors raised while describing a type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntrospectionError {
    /// No description exists for the handle
    #[error("unknown type: {0}")]
    UnknownType(TypeHandle),

    /// The underlying introspection failed
    #[error("failed to introspect {handle}: {message}")]
    Failed { handle: TypeHandle, message: String },
}

impl IntrospectionError {
    /// Create a failure for a handle
    pub fn failed(handle: TypeHandle, message: impl Into<String>) -> Self {
        IntrospectionError::Failed {
            handle,
            message: message.into(),
        }
    }
}

/// Describes types by handle.
///
/// Implementations must be read-only: describing a type never changes what
/// a later call returns within one collection run.
pub trait Introspect {
    /// Describe the type identified by `handle`
    fn describe(&self, handle: &TypeHandle) -> Result<Cow<'_, TypeNode>, IntrospectionError>;

    /// Describe a type reached through a member, a variant or an ancestor
    /// rather than named as a root.
    ///
    /// Defaults to [`describe`](Introspect::describe). Lenient sources answer
    /// handles they never registered with an empty leaf type.
    fn describe_reached(
        &self,
        handle: &TypeHandle,
    ) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        self.describe(handle)
    }
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn describe(&self, handle: &TypeHandle) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        (**self).describe(handle)
    }

    fn describe_reached(
        &self,
        handle: &TypeHandle,
    ) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        (**self).describe_reached(handle)
    }
}

impl<T: Introspect + ?Sized> Introspect for std::sync::Arc<T> {
    fn describe(&self, handle: &TypeHandle) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        (**self).describe(handle)
    }

    fn describe_reached(
        &self,
        handle: &TypeHandle,
    ) -> Result<Cow<'_, TypeNode>, IntrospectionError> {
        (**self).describe_reached(handle)
    }
}

/// Rust types that can describe themselves, implemented by `#[derive(SchemaType)]`
pub trait SchemaType {
    /// Identity of the type
    fn schema_handle() -> TypeHandle;

    /// Full description of the type
    fn schema_node() -> TypeNode;
}
