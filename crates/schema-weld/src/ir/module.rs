//! Module metadata for type graphs
//!
//! A [`SchemaModule`] groups the types of one module path and carries the
//! module's default namespace. Types without a namespace of their own fall
//! back to it when their schema name is derived.

use crate::ir::TypeNode;
use serde::{Deserialize, Serialize};

/// Metadata for a module of types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaModule {
    /// Module path (e.g., "model" or "crate::model")
    pub path: String,

    /// Default namespace for the module's types
    #[serde(default)]
    pub namespace: Option<String>,

    /// Types declared in this module
    #[serde(default)]
    pub types: Vec<TypeNode>,
}

impl SchemaModule {
    /// Create a new module
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: None,
            types: Vec::new(),
        }
    }

    /// Set the default namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a type
    pub fn type_def(mut self, node: TypeNode) -> Self {
        self.types.push(node);
        self
    }

    /// Set types
    pub fn with_types(mut self, types: Vec<TypeNode>) -> Self {
        self.types = types;
        self
    }

    /// Types with the module default namespace applied
    pub fn into_types(self) -> Vec<TypeNode> {
        let namespace = self.namespace;
        self.types
            .into_iter()
            .map(|mut node| {
                if node.package_namespace.is_none() {
                    node.package_namespace = namespace.clone();
                }
                node
            })
            .collect()
    }

    /// Validate the module configuration
    pub fn validate(&self) -> Result<(), ModuleValidationError> {
        if self.path.is_empty() {
            return Err(ModuleValidationError::EmptyPath);
        }

        let mut seen = std::collections::HashSet::new();
        for node in &self.types {
            if !seen.insert(&node.handle) {
                return Err(ModuleValidationError::DuplicateType(
                    node.handle.to_string(),
                ));
            }
            if node.handle.module_path() != Some(self.path.as_str()) {
                return Err(ModuleValidationError::ForeignType {
                    module: self.path.clone(),
                    handle: node.handle.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Errors that can occur during module validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleValidationError {
    /// Module path is empty
    EmptyPath,
    /// Same handle registered twice
    DuplicateType(String),
    /// Type does not live in the module
    ForeignType { module: String, handle: String },
}

impl std::fmt::Display for ModuleValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleValidationError::EmptyPath => write!(f, "module path cannot be empty"),
            ModuleValidationError::DuplicateType(handle) => write!(f, "duplicate type: {}", handle),
            ModuleValidationError::ForeignType { module, handle } => {
                write!(f, "type {} is not declared in module {}", handle, module)
            }
        }
    }
}

impl std::error::Error for ModuleValidationError {}

/// Builder for constructing a SchemaModule
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    path: Option<String>,
    namespace: Option<String>,
    types: Vec<TypeNode>,
}

impl ModuleBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set module path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set default namespace
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add a type
    pub fn type_def(mut self, node: TypeNode) -> Self {
        self.types.push(node);
        self
    }

    /// Build the module
    pub fn build(self) -> Result<SchemaModule, ModuleValidationError> {
        let path = self.path.ok_or(ModuleValidationError::EmptyPath)?;

        let mut module = SchemaModule::new(path).with_types(self.types);
        if let Some(namespace) = self.namespace {
            module = module.with_namespace(namespace);
        }

        module.validate()?;
        Ok(module)
    }
}
