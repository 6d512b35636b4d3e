//! schema-etch: Documentation collection for generated schemas
//!
//! This crate walks a schema-weld type graph and collects the documentation
//! attached to types and members into a mapping from key to text. An
//! external merge step looks the keys up while it decorates the schema
//! generated for the same types.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ schema-weld      │  TypeGraph / #[derive(SchemaType)]
//! │ (Introspect)     │
//! └────────┬─────────┘
//!          ▼
//!   ┌─────────────┐    eligibility + naming
//!   │  Collector  │◄──────────────────────
//!   └──────┬──────┘
//!          ▼
//!  ┌────────────────┐     ┌──────────────────────┐
//!  │ Documentations │────►│ DocumentationResolver │──► merge step
//!  └────────────────┘     └──────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use schema_etch::test::end_to_end_graph;
//! use schema_etch::{Collector, TypeHandle};
//!
//! let graph = end_to_end_graph();
//! let docs = Collector::new(&graph)
//!     .collect(&[TypeHandle::new("model::A")])
//!     .unwrap();
//!
//! assert_eq!(docs.lookup("{NS}a"), Some("some docu about a"));
//! assert_eq!(docs.lookup("{NS}b"), Some("docu about b"));
//! ```

// Core types
pub mod documentations;
pub mod key;

// Collection
pub mod collector;
pub mod eligibility;
pub mod naming;

// Integration
pub mod builder;
pub mod cache;
pub mod config;
pub mod resolver;

// Diagnostics and output
pub mod diagnostics;
pub mod printer;

// Re-exports for convenience
pub use collector::{Collection, Collector, DEFAULT_PLATFORM_PREFIXES};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, EtchError, EtchResult};
pub use documentations::Documentations;
pub use eligibility::{is_explicitly_eligible, is_implicitly_eligible, resolve_member, MemberPlan};
pub use key::{DocKey, KeyCategory, KeyParts, SEP};
pub use naming::{DefaultNaming, NamingPolicy};

// Integration
pub use builder::{EtchBuilder, EtchOutput, TransformParams};
pub use cache::DocumentationCache;
pub use config::EtchConfig;
pub use resolver::{DocumentationResolver, DOCUMENTATIONS_URI};

// Terminal output
pub use printer::DocumentationPrinter;

// Type graph
pub use schema_weld::{Introspect, TypeGraph, TypeHandle};
