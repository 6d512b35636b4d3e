//! Builder API for schema-etch
//!
//! This module provides the integrating wrapper around the collector: it
//! takes the roots and the wrapper flags, runs (or reuses) a collection and
//! prepares everything the merge step needs.

mod etch_builder;

pub use etch_builder::{EtchBuilder, EtchOutput, TransformParams};
