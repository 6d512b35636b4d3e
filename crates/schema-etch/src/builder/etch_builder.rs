//! EtchBuilder - Main API for documentation collection
//!
//! This module provides the builder pattern API for configuring and
//! running a collection on behalf of the schema merge step.

use crate::cache::DocumentationCache;
use crate::collector::{Collection, Collector};
use crate::config::EtchConfig;
use crate::diagnostics::{Diagnostic, EtchResult};
use crate::documentations::Documentations;
use crate::naming::{DefaultNaming, NamingPolicy};
use crate::printer::DocumentationPrinter;
use crate::resolver::DocumentationResolver;
use schema_weld::{Introspect, SchemaType, TypeGraph, TypeHandle};
use std::sync::Arc;
use tracing::{info, warn};

/// Stylesheet parameter naming the stylesheet reference to emit
pub const PARAM_XML_STYLESHEET: &str = "xmlStyleSheet";

/// Stylesheet parameter switching key annotation on
pub const PARAM_DEBUG: &str = "debug";

/// Parameters handed to the merge transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformParams {
    /// Stylesheet reference, passed only when set
    pub xml_stylesheet: Option<String>,
    /// Annotate keys into the output
    pub debug: bool,
    /// URI under which the transform loads the documentation
    pub documentations_uri: String,
}

impl TransformParams {
    /// Parameters as (name, value) pairs, in the order they are set
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(stylesheet) = &self.xml_stylesheet {
            pairs.push((PARAM_XML_STYLESHEET, stylesheet.clone()));
        }
        pairs.push((PARAM_DEBUG, self.debug.to_string()));
        pairs
    }
}

/// Everything the merge step needs
#[derive(Debug, Clone)]
pub struct EtchOutput {
    /// Collected documentation
    pub documentations: Arc<Documentations>,
    /// Diagnostics raised while collecting
    pub diagnostics: Vec<Diagnostic>,
    /// Transform parameters
    pub params: TransformParams,
}

impl EtchOutput {
    fn from_collection(collection: &Collection, params: TransformParams) -> Self {
        Self {
            documentations: Arc::new(collection.documentations.clone()),
            diagnostics: collection.diagnostics.clone(),
            params,
        }
    }

    /// Resolver serving the documentation under the configured URI
    pub fn resolver(&self) -> DocumentationResolver {
        DocumentationResolver::new(Arc::clone(&self.documentations))
            .with_uri(self.params.documentations_uri.clone())
    }

    /// Check whether nothing was collected
    pub fn is_empty(&self) -> bool {
        self.documentations.is_empty()
    }
}

/// Builder for configuring a documentation collection
///
/// # Example
///
/// ```
/// use schema_etch::test::end_to_end_graph;
/// use schema_etch::EtchBuilder;
///
/// let graph = end_to_end_graph();
/// let output = EtchBuilder::new()
///     .root("model::A")
///     .xml_stylesheet("xs3p.xsl")
///     .build(&graph)
///     .unwrap();
/// assert_eq!(output.documentations.lookup("{NS}a"), Some("some docu about a"));
/// ```
#[derive(Clone)]
pub struct EtchBuilder {
    roots: Vec<TypeHandle>,
    config: EtchConfig,
    naming: Arc<dyn NamingPolicy + Send + Sync>,
    cache: Option<Arc<DocumentationCache>>,
}

impl Default for EtchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EtchBuilder {
    /// Create a builder with the default configuration
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            config: EtchConfig::default(),
            naming: Arc::new(DefaultNaming),
            cache: None,
        }
    }

    /// Add a root type
    pub fn root(mut self, handle: impl Into<TypeHandle>) -> Self {
        self.roots.push(handle.into());
        self
    }

    /// Add several root types
    pub fn roots<I, H>(mut self, handles: I) -> Self
    where
        I: IntoIterator<Item = H>,
        H: Into<TypeHandle>,
    {
        self.roots.extend(handles.into_iter().map(Into::into));
        self
    }

    /// Add a root type that derives `SchemaType`
    pub fn root_type<T: SchemaType>(self) -> Self {
        self.root(T::schema_handle())
    }

    /// Replace the whole configuration
    ///
    /// Non-default platform prefixes give the builder a cache of its own, as
    /// with [`naming`](Self::naming).
    pub fn config(mut self, config: EtchConfig) -> Self {
        if config.platform_prefixes != EtchConfig::default().platform_prefixes {
            self.isolate_cache();
        }
        self.config = config;
        self
    }

    /// Reuse results for the same roots
    pub fn use_cache(mut self, enable: bool) -> Self {
        self.config.use_cache = enable;
        self
    }

    /// Annotate keys into the merged output and list them on stderr
    pub fn debug(mut self, enable: bool) -> Self {
        self.config.debug = enable;
        self
    }

    /// Stylesheet reference for the merged output
    pub fn xml_stylesheet(mut self, stylesheet: impl Into<String>) -> Self {
        self.config.xml_stylesheet = Some(stylesheet.into());
        self
    }

    /// Use other naming rules
    ///
    /// Cached results are keyed by roots only, so a builder with its own
    /// naming rules stops sharing the process-wide cache and gets a cache of
    /// its own, unless one was set with [`cache`](Self::cache).
    pub fn naming(mut self, naming: impl NamingPolicy + Send + Sync + 'static) -> Self {
        self.naming = Arc::new(naming);
        self.isolate_cache();
        self
    }

    /// Cache used when caching is on, instead of the process-wide one
    ///
    /// Builders given the same cache must use the same naming rules and
    /// platform prefixes.
    pub fn cache(mut self, cache: Arc<DocumentationCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    fn isolate_cache(&mut self) {
        if self.cache.is_none() {
            self.cache = Some(Arc::new(DocumentationCache::new()));
        }
    }

    /// Configured roots
    pub fn root_handles(&self) -> &[TypeHandle] {
        &self.roots
    }

    fn params(&self) -> TransformParams {
        TransformParams {
            xml_stylesheet: self.config.xml_stylesheet.clone(),
            debug: self.config.debug,
            documentations_uri: self.config.documentations_uri.clone(),
        }
    }

    /// Collect the documentation of the roots
    pub fn build(&self, introspect: &dyn Introspect) -> EtchResult<EtchOutput> {
        self.config.validate()?;

        let collector = Collector::new(introspect)
            .naming(Arc::clone(&self.naming))
            .platform_prefixes(self.config.platform_prefixes.iter().cloned());

        let output = if self.config.use_cache {
            let cache = self.cache.clone().unwrap_or_else(DocumentationCache::global);
            let collection = cache.get_or_collect(&self.roots, || {
                collector.collect_with_diagnostics(&self.roots)
            })?;
            EtchOutput::from_collection(&collection, self.params())
        } else {
            let collection = collector.collect_with_diagnostics(&self.roots)?;
            EtchOutput::from_collection(&collection, self.params())
        };

        info!(
            roots = self.roots.len(),
            entries = output.documentations.len(),
            cached = self.config.use_cache,
            "documentation ready for merge"
        );

        if self.config.debug {
            DocumentationPrinter::new(&output.documentations, true)
                .with_diagnostics(&output.diagnostics)
                .print_to_stderr();
        }

        Ok(output)
    }

    /// Collect over every type registered with `#[derive(SchemaType)]`
    pub fn build_from_inventory(&self) -> EtchResult<EtchOutput> {
        let graph = TypeGraph::from_inventory();
        self.build(&graph)
    }

    /// Collect, or fall back to an empty mapping when collection fails
    ///
    /// The merge step then passes the generated schema through without
    /// documentation. The failure is logged and kept as an error diagnostic.
    pub fn build_or_passthrough(&self, introspect: &dyn Introspect) -> EtchOutput {
        match self.build(introspect) {
            Ok(output) => output,
            Err(err) => {
                warn!(error = %err, "documentation collection failed, passing schema through");
                EtchOutput {
                    documentations: Arc::new(Documentations::new()),
                    diagnostics: vec![Diagnostic::error(err.to_string())],
                    params: self.params(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticSeverity, EtchError};
    use crate::resolver::DOCUMENTATIONS_URI;
    use crate::test::{end_to_end_graph, fixture_graph, NS};
    use pretty_assertions::assert_eq;
    use schema_weld::{MemberNode, TypeNode, TypeRef};

    #[test]
    fn test_builder_creation() {
        let builder = EtchBuilder::new().root("model::A").roots(["model::B"]);
        assert_eq!(
            builder.root_handles(),
            &[TypeHandle::new("model::A"), TypeHandle::new("model::B")]
        );
        assert!(!builder.config.use_cache);
        assert!(!builder.config.debug);
    }

    #[test]
    fn test_build() {
        let graph = end_to_end_graph();
        let output = EtchBuilder::new().root("model::A").build(&graph).unwrap();
        assert_eq!(output.documentations.len(), 2);
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.params.documentations_uri, DOCUMENTATIONS_URI);

        let xml = output.resolver().resolve(DOCUMENTATIONS_URI, None).unwrap();
        assert!(xml.contains("<entry key=\"{NS}b\">docu about b</entry>"));
    }

    #[test]
    fn test_transform_params() {
        let builder = EtchBuilder::new();
        assert_eq!(builder.params().pairs(), vec![(PARAM_DEBUG, "false".to_string())]);

        let builder = builder.xml_stylesheet("xs3p.xsl").debug(true);
        assert_eq!(
            builder.params().pairs(),
            vec![
                (PARAM_XML_STYLESHEET, "xs3p.xsl".to_string()),
                (PARAM_DEBUG, "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_cached_build_reuses_result() {
        let cache = Arc::new(DocumentationCache::new());
        let builder = EtchBuilder::new()
            .root("fixture::A")
            .use_cache(true)
            .cache(Arc::clone(&cache));

        let first = builder.build(&fixture_graph()).unwrap();
        // A different graph under the same roots is not consulted again
        let second = builder.build(&TypeGraph::new()).unwrap();
        assert_eq!(first.documentations, second.documentations);
        assert_eq!(cache.len(), 1);
        assert!(first
            .documentations
            .contains(&format!("{{{}}}someEnum|ENUMERATION|y", NS)));
    }

    struct UpperCaseNaming;

    impl NamingPolicy for UpperCaseNaming {
        fn type_name(&self, node: &TypeNode) -> String {
            node.simple_name.to_uppercase()
        }

        fn type_namespace(&self, node: &TypeNode) -> String {
            DefaultNaming.type_namespace(node)
        }

        fn member_name(&self, member: &MemberNode) -> String {
            DefaultNaming.member_name(member)
        }
    }

    #[test]
    fn test_custom_naming_does_not_share_global_cache() {
        let graph = TypeGraph::new()
            .with_type(TypeNode::from_handle("isolated::Holder").with_doc("about holder"));

        let plain = EtchBuilder::new()
            .root("isolated::Holder")
            .use_cache(true)
            .build(&graph)
            .unwrap();
        assert_eq!(plain.documentations.lookup("{}holder"), Some("about holder"));

        let upper = EtchBuilder::new()
            .root("isolated::Holder")
            .use_cache(true)
            .naming(UpperCaseNaming)
            .build(&graph)
            .unwrap();
        assert_eq!(upper.documentations.lookup("{}HOLDER"), Some("about holder"));
        assert!(!upper.documentations.contains("{}holder"));

        let mut config = EtchConfig::default();
        config.use_cache = true;
        config.platform_prefixes = vec!["isolated::".to_string()];
        let skipped = EtchBuilder::new()
            .root("isolated::Holder")
            .config(config)
            .build(&graph)
            .unwrap();
        assert!(skipped.is_empty());
    }

    #[test]
    fn test_build_reports_errors() {
        let graph = TypeGraph::new().with_type(
            TypeNode::from_handle("bad::Holder").member(
                MemberNode::field("attr", TypeRef::string())
                    .attribute()
                    .with_doc("one")
                    .with_doc("two"),
            ),
        );
        let builder = EtchBuilder::new().root("bad::Holder");
        assert!(matches!(
            builder.build(&graph),
            Err(EtchError::StructuralAmbiguity { .. })
        ));

        let output = builder.build_or_passthrough(&graph);
        assert!(output.is_empty());
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].severity, DiagnosticSeverity::Error);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = EtchConfig::default();
        config.documentations_uri.clear();
        let builder = EtchBuilder::new().root("model::A").config(config);
        assert!(matches!(
            builder.build(&end_to_end_graph()),
            Err(EtchError::Config(_))
        ));
    }
}
