//! Handoff to the merge step
//!
//! The merge stylesheet loads the collected documentation through a reserved
//! document URI. [`DocumentationResolver`] answers that URI with the
//! property-list serialization of the mapping and declines everything else.

use crate::documentations::Documentations;
use std::sync::Arc;
use tracing::trace;

/// Reserved URI under which the merge step looks up the documentation
pub const DOCUMENTATIONS_URI: &str = "http://meeuw.org/documentations";

/// Resolves the reserved URI to the collected documentation
#[derive(Debug, Clone)]
pub struct DocumentationResolver {
    uri: String,
    documentations: Arc<Documentations>,
}

impl DocumentationResolver {
    /// Resolver answering [`DOCUMENTATIONS_URI`]
    pub fn new(documentations: Arc<Documentations>) -> Self {
        Self {
            uri: DOCUMENTATIONS_URI.to_string(),
            documentations,
        }
    }

    /// Answer another URI instead
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// The URI this resolver answers
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The mapping being served
    pub fn documentations(&self) -> &Documentations {
        &self.documentations
    }

    /// Resolve a document reference from the stylesheet
    ///
    /// Returns the serialized mapping for the reserved URI, and `None` for
    /// any other reference so the caller falls back to its default lookup.
    pub fn resolve(&self, href: &str, base: Option<&str>) -> Option<String> {
        if href == self.uri {
            trace!(href, base = ?base, entries = self.documentations.len(), "resolving documentations");
            Some(self.documentations.to_properties_xml())
        } else {
            None
        }
    }
}
