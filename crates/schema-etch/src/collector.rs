//! Type graph walker
//!
//! [`Collector`] visits every type reachable from a set of roots once,
//! recording the documentation of types and of their eligible members.
//! Members of transparent ancestors are folded into the descendant's key.
//!
//! All mutable state lives in one `Run`, so a collector can serve several
//! independent runs.

use crate::diagnostics::{Diagnostic, DiagnosticsCollector, EtchError, EtchResult, KEY_COLLISION};
use crate::documentations::Documentations;
use crate::eligibility::{resolve_member, MemberPlan};
use crate::key::{DocKey, KeyCategory};
use crate::naming::{DefaultNaming, NamingPolicy};
use indexmap::IndexMap;
use schema_weld::{AccessMode, Introspect, MemberNode, TypeHandle, TypeRef};
use std::collections::HashSet;
use tracing::{debug, info, trace, warn};

/// Handle prefixes of standard library types, which never carry documentation
pub const DEFAULT_PLATFORM_PREFIXES: &[&str] = &["std::", "core::", "alloc::"];

/// Result of one run, with the diagnostics raised along the way
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub documentations: Documentations,
    pub diagnostics: Vec<Diagnostic>,
}

/// Documentation collector over an introspectable type graph
pub struct Collector<'a> {
    introspect: &'a dyn Introspect,
    naming: Box<dyn NamingPolicy + 'a>,
    platform_prefixes: Vec<String>,
}

impl<'a> Collector<'a> {
    /// Create a collector with the default naming rules
    pub fn new(introspect: &'a dyn Introspect) -> Self {
        Self {
            introspect,
            naming: Box::new(DefaultNaming),
            platform_prefixes: DEFAULT_PLATFORM_PREFIXES
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }

    /// Use other naming rules
    pub fn naming(mut self, naming: impl NamingPolicy + 'a) -> Self {
        self.naming = Box::new(naming);
        self
    }

    /// Replace the prefixes of handles that are never visited
    pub fn platform_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.platform_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Collect the documentation reachable from `roots`
    pub fn collect(&self, roots: &[TypeHandle]) -> EtchResult<Documentations> {
        Ok(self.collect_with_diagnostics(roots)?.documentations)
    }

    /// Collect the documentation reachable from `roots`, keeping diagnostics
    pub fn collect_with_diagnostics(&self, roots: &[TypeHandle]) -> EtchResult<Collection> {
        let mut run = Run {
            introspect: self.introspect,
            naming: self.naming.as_ref(),
            platform_prefixes: &self.platform_prefixes,
            visited: HashSet::new(),
            docs: IndexMap::new(),
            diagnostics: DiagnosticsCollector::new(),
        };

        for root in roots {
            run.visit_root(root)?;
        }

        info!(
            roots = roots.len(),
            types = run.visited.len(),
            keys = run.docs.len(),
            warnings = run.diagnostics.warning_count(),
            "collected documentation"
        );

        Ok(Collection {
            documentations: Documentations::from_entries(run.docs),
            diagnostics: run.diagnostics.into_diagnostics(),
        })
    }
}

/// State of one collection run
struct Run<'r> {
    introspect: &'r dyn Introspect,
    naming: &'r dyn NamingPolicy,
    platform_prefixes: &'r [String],
    visited: HashSet<TypeHandle>,
    docs: IndexMap<DocKey, String>,
    diagnostics: DiagnosticsCollector,
}

impl<'r> Run<'r> {
    fn is_platform(&self, handle: &TypeHandle) -> bool {
        self.platform_prefixes
            .iter()
            .any(|prefix| handle.as_str().starts_with(prefix.as_str()))
    }

    /// Visit a root, which must be described
    fn visit_root(&mut self, handle: &TypeHandle) -> EtchResult<()> {
        self.visit(handle, true)
    }

    fn visit(&mut self, handle: &TypeHandle, root: bool) -> EtchResult<()> {
        if self.visited.contains(handle) {
            return Ok(());
        }
        if self.is_platform(handle) {
            debug!(handle = %handle, "skipping platform type");
            return Ok(());
        }
        self.visited.insert(handle.clone());

        let introspect = self.introspect;
        let node = if root {
            introspect.describe(handle)?
        } else {
            introspect.describe_reached(handle)?
        };
        debug!(handle = %handle, members = node.members.len(), "visiting type");

        let own_key = self.naming.type_key(&node)?;
        if let Some(doc) = &node.doc {
            self.record(own_key.clone(), doc);
        }

        for member in node.ordered_members() {
            self.visit_member(&own_key, member, node.access)?;
        }

        self.climb(handle, node.super_type.clone(), &own_key)
    }

    /// Fold the members of transparent ancestors into `own_key`
    ///
    /// Climbing stops at the first ancestor that is not transparent; that
    /// ancestor is not visited.
    fn climb(
        &mut self,
        handle: &TypeHandle,
        mut next: Option<TypeHandle>,
        own_key: &DocKey,
    ) -> EtchResult<()> {
        let introspect = self.introspect;
        let mut chain = HashSet::from([handle.clone()]);

        while let Some(parent_handle) = next {
            if self.is_platform(&parent_handle) {
                break;
            }
            let parent = introspect.describe_reached(&parent_handle)?;
            if !parent.transparent {
                break;
            }
            if !chain.insert(parent_handle.clone()) {
                return Err(EtchError::UnterminatedCycle {
                    handle: handle.clone(),
                });
            }
            debug!(handle = %handle, ancestor = %parent_handle, "folding transparent ancestor");
            for member in parent.ordered_members() {
                self.visit_member(own_key, member, parent.access)?;
            }
            next = parent.super_type.clone();
        }
        Ok(())
    }

    fn visit_member(
        &mut self,
        parent_key: &DocKey,
        member: &MemberNode,
        access: AccessMode,
    ) -> EtchResult<()> {
        match resolve_member(access, member) {
            MemberPlan::Skip => {
                trace!(member = %member.name, "skipping member");
                Ok(())
            }
            MemberPlan::EnumConstant => {
                if let Some(entry) = member.default_doc() {
                    let key = parent_key.member(KeyCategory::Enumeration, &member.name)?;
                    self.record(key, &entry.text);
                }
                Ok(())
            }
            MemberPlan::Member { category, eligible } => {
                let name = self.naming.member_name(member);
                let key = parent_key.member(category, &name)?;

                if category == KeyCategory::Attribute && member.docs.len() > 1 {
                    return Err(EtchError::ambiguity(
                        key.as_str(),
                        format!(
                            "an attribute cannot carry {} documentation entries",
                            member.docs.len()
                        ),
                    ));
                }

                if eligible {
                    if let Some(entry) = member.default_doc() {
                        self.record(key, &entry.text);
                    }
                    for variant in &member.variants {
                        if let Some(entry) = member.doc_for_variant(&variant.discriminator) {
                            let key =
                                parent_key.member(KeyCategory::Element, &variant.discriminator)?;
                            self.record(key, &entry.text);
                        }
                    }
                } else if !member.docs.is_empty() {
                    trace!(member = %member.name, "documented member is not eligible");
                }

                self.follow(member)
            }
        }
    }

    /// Visit the variant types and the value type of a member
    fn follow(&mut self, member: &MemberNode) -> EtchResult<()> {
        for variant in &member.variants {
            self.visit_type_ref(&variant.type_ref)?;
        }
        self.visit_type_ref(&member.value_type)
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) -> EtchResult<()> {
        for handle in type_ref.named_types() {
            self.visit(handle, false)?;
        }
        Ok(())
    }

    fn record(&mut self, key: DocKey, text: &str) {
        trace!(key = %key, "recording documentation");
        if let Some(previous) = self.docs.get(&key) {
            if previous != text {
                warn!(key = %key, "documentation key written twice with different text");
                self.diagnostics.add(
                    Diagnostic::warning(format!(
                        "documentation replaced: '{}' overwrites '{}'",
                        text, previous
                    ))
                    .at_key(key.as_str())
                    .with_code(KEY_COLLISION),
                );
            }
        }
        self.docs.insert(key, text.to_string());
    }
}
