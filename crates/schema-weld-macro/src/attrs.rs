//! Parsing of `#[schema(...)]` attributes

use schema_weld::AccessMode;
use syn::{Attribute, Expr, Lit, LitStr, Meta, Path, Type};

/// Type-level attributes
#[derive(Default)]
pub struct TypeAttrs {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub access: Option<AccessMode>,
    pub transparent: bool,
    pub extends: Option<Path>,
    pub doc: Option<String>,
    pub rustdoc: bool,
}

impl TypeAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = TypeAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("namespace") {
                    out.namespace = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("access") {
                    let lit = meta.value()?.parse::<LitStr>()?;
                    let access = AccessMode::from_attr(&lit.value()).ok_or_else(|| {
                        syn::Error::new(
                            lit.span(),
                            "expected one of \"public_member\", \"field\", \"property\", \"none\"",
                        )
                    })?;
                    out.access = Some(access);
                } else if meta.path.is_ident("transparent") {
                    out.transparent = true;
                } else if meta.path.is_ident("extends") {
                    out.extends = Some(meta.value()?.parse::<Path>()?);
                } else if meta.path.is_ident("doc") {
                    out.doc = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("rustdoc") {
                    out.rustdoc = true;
                } else {
                    return Err(meta.error("unsupported schema attribute on type"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// Structural category written on a field
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Element,
    Attribute,
    Transient,
}

/// Field-level attributes
#[derive(Default)]
pub struct FieldAttrs {
    pub category: Option<FieldCategory>,
    pub name: Option<String>,
    /// (discriminator, text) pairs
    pub docs: Vec<(Option<String>, String)>,
    /// (discriminator, value type) pairs
    pub variants: Vec<(String, Type)>,
}

impl FieldAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = FieldAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
            attr.parse_nested_meta(|meta| {
                let category = if meta.path.is_ident("element") {
                    Some(FieldCategory::Element)
                } else if meta.path.is_ident("attribute") {
                    Some(FieldCategory::Attribute)
                } else if meta.path.is_ident("transient") {
                    Some(FieldCategory::Transient)
                } else {
                    None
                };

                if let Some(category) = category {
                    if out.category.is_some_and(|c| c != category) {
                        return Err(meta.error("conflicting schema categories on one field"));
                    }
                    out.category = Some(category);
                    if meta.input.peek(syn::token::Paren) {
                        meta.parse_nested_meta(|inner| {
                            if inner.path.is_ident("name") {
                                out.name = Some(inner.value()?.parse::<LitStr>()?.value());
                                Ok(())
                            } else {
                                Err(inner.error("expected `name = \"...\"`"))
                            }
                        })?;
                    }
                } else if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("doc") {
                    if meta.input.peek(syn::token::Paren) {
                        let mut variant = None;
                        let mut text = None;
                        meta.parse_nested_meta(|inner| {
                            if inner.path.is_ident("variant") {
                                variant = Some(inner.value()?.parse::<LitStr>()?.value());
                            } else if inner.path.is_ident("text") {
                                text = Some(inner.value()?.parse::<LitStr>()?.value());
                            } else {
                                return Err(inner.error("expected `variant` or `text`"));
                            }
                            Ok(())
                        })?;
                        let text = text.ok_or_else(|| meta.error("missing `text = \"...\"`"))?;
                        out.docs.push((variant, text));
                    } else {
                        let text = meta.value()?.parse::<LitStr>()?.value();
                        out.docs.push((None, text));
                    }
                } else if meta.path.is_ident("variant") {
                    let mut name = None;
                    let mut ty = None;
                    meta.parse_nested_meta(|inner| {
                        if inner.path.is_ident("name") {
                            name = Some(inner.value()?.parse::<LitStr>()?.value());
                        } else if inner.path.is_ident("ty") {
                            ty = Some(inner.value()?.parse::<Type>()?);
                        } else {
                            return Err(inner.error("expected `name` or `ty`"));
                        }
                        Ok(())
                    })?;
                    match (name, ty) {
                        (Some(name), Some(ty)) => out.variants.push((name, ty)),
                        _ => return Err(meta.error("variant needs both `name` and `ty`")),
                    }
                } else {
                    return Err(meta.error("unsupported schema attribute on field"));
                }
                Ok(())
            })?;
        }
        Ok(out)
    }
}

/// Attributes of an enum variant (an enumeration constant)
#[derive(Default)]
pub struct ConstantAttrs {
    pub doc: Option<String>,
}

impl ConstantAttrs {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = ConstantAttrs::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("schema")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("doc") {
                    out.doc = Some(meta.value()?.parse::<LitStr>()?.value());
                    Ok(())
                } else {
                    Err(meta.error("unsupported schema attribute on enum variant"))
                }
            })?;
        }
        Ok(out)
    }
}

/// Join `///` comments into one documentation text
pub fn rustdoc(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .collect();

    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
