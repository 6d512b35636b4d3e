//! Type parser for converting Rust types to TypeRef token streams
//!
//! This module provides strict type parsing for the schema derive.
//! It returns errors with source location for unparseable types.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use schema_weld::SchemaPrimitive;
use syn::{Error, GenericArgument, PathArguments, Type};

/// Parse a Rust type into a TypeRef token stream.
///
/// # Errors
/// Returns a syn::Error with source location if a type cannot be mapped.
///
/// # Supported Types
/// - Primitives: integers, f32, f64, bool, String, str, char, ()
/// - Repeated: Vec<T>, VecDeque<T>, HashSet<T>, BTreeSet<T>, [T; N], [T]
/// - Bytes: Vec<u8>
/// - Optional: Option<T>
/// - Maps: HashMap<K, V>, BTreeMap<K, V>, IndexMap<K, V>
/// - Indirection: Box<T>, Arc<T>, Rc<T>, &T, &mut T
/// - Custom types: referenced by their `std::any::type_name`
pub fn rust_type_to_type_ref(ty: &Type) -> syn::Result<TokenStream> {
    match ty {
        Type::Path(type_path) => parse_path_type(ty, type_path),
        Type::Reference(type_ref) => {
            let inner = rust_type_to_type_ref(&type_ref.elem)?;
            Ok(quote! { ::schema_weld::TypeRef::boxed(#inner) })
        }
        Type::Tuple(type_tuple) => {
            if type_tuple.elems.is_empty() {
                Ok(primitive_tokens(SchemaPrimitive::Unit))
            } else {
                Err(Error::new_spanned(
                    type_tuple,
                    "schema-weld: Tuple types have no schema representation. \
                     Use a struct with named fields instead.",
                ))
            }
        }
        Type::Slice(type_slice) => {
            let inner = rust_type_to_type_ref(&type_slice.elem)?;
            Ok(quote! { ::schema_weld::TypeRef::list(#inner) })
        }
        Type::Array(type_array) => {
            let inner = rust_type_to_type_ref(&type_array.elem)?;
            Ok(quote! { ::schema_weld::TypeRef::list(#inner) })
        }
        Type::Paren(type_paren) => rust_type_to_type_ref(&type_paren.elem),
        Type::Group(type_group) => rust_type_to_type_ref(&type_group.elem),
        Type::BareFn(bare_fn) => Err(Error::new_spanned(
            bare_fn,
            "schema-weld: Bare function types are not supported. \
             Mark the field #[schema(transient)] or use a data type.",
        )),
        Type::ImplTrait(impl_trait) => Err(Error::new_spanned(
            impl_trait,
            "schema-weld: `impl Trait` types are not supported. \
             Use concrete types instead.",
        )),
        Type::TraitObject(trait_obj) => Err(Error::new_spanned(
            trait_obj,
            "schema-weld: Trait object types (`dyn Trait`) are not supported. \
             Use concrete types instead.",
        )),
        Type::Ptr(type_ptr) => Err(Error::new_spanned(
            type_ptr,
            "schema-weld: Raw pointers are not supported.",
        )),
        Type::Infer(infer) => Err(Error::new_spanned(
            infer,
            "schema-weld: Inferred types (`_`) are not supported. \
             Please specify the concrete type.",
        )),
        Type::Macro(type_macro) => Err(Error::new_spanned(
            type_macro,
            "schema-weld: Macro types are not supported. \
             Expand the macro or use a concrete type.",
        )),
        _ => Err(Error::new_spanned(
            ty,
            "schema-weld: Unsupported type. \
             This type cannot be mapped to a schema type.",
        )),
    }
}

/// Parse a Type::Path into TypeRef tokens
fn parse_path_type(ty: &Type, type_path: &syn::TypePath) -> syn::Result<TokenStream> {
    if type_path.qself.is_some() {
        return Err(Error::new_spanned(
            type_path,
            "schema-weld: Qualified paths (`<T as Trait>::X`) are not supported.",
        ));
    }

    let last_seg = type_path.path.segments.last().ok_or_else(|| {
        Error::new_spanned(type_path, "schema-weld: Empty type path encountered.")
    })?;
    let ident = last_seg.ident.to_string();

    if let Some(primitive) = SchemaPrimitive::from_rust_type(&ident) {
        return Ok(primitive_tokens(primitive));
    }

    if let PathArguments::AngleBracketed(args) = &last_seg.arguments {
        let inner_types: Vec<&Type> = args
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(inner_ty) => Some(inner_ty),
                _ => None,
            })
            .collect();

        if let Some(generic) = parse_generic_type(&ident, &inner_types)? {
            return Ok(generic);
        }
    }

    // Custom types are referenced by type name, matching the handle the
    // derive gives them
    Ok(quote! { ::schema_weld::TypeRef::of::<#ty>() })
}

/// Parse a container type with its inner types
fn parse_generic_type(ident: &str, inner_types: &[&Type]) -> syn::Result<Option<TokenStream>> {
    let tokens = match (ident, inner_types) {
        ("Vec", [inner]) if is_u8(inner) => primitive_tokens(SchemaPrimitive::Bytes),
        ("Option", [inner]) => {
            let inner = rust_type_to_type_ref(inner)?;
            quote! { ::schema_weld::TypeRef::optional(#inner) }
        }
        ("Vec" | "VecDeque" | "HashSet" | "BTreeSet" | "IndexSet", [inner]) => {
            let inner = rust_type_to_type_ref(inner)?;
            quote! { ::schema_weld::TypeRef::list(#inner) }
        }
        ("HashMap" | "BTreeMap" | "IndexMap", [key, value]) => {
            let key = rust_type_to_type_ref(key)?;
            let value = rust_type_to_type_ref(value)?;
            quote! { ::schema_weld::TypeRef::map(#key, #value) }
        }
        ("Box" | "Arc" | "Rc", [inner]) => {
            let inner = rust_type_to_type_ref(inner)?;
            quote! { ::schema_weld::TypeRef::boxed(#inner) }
        }
        _ => return Ok(None),
    };
    Ok(Some(tokens))
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.qself.is_none() && p.path.is_ident("u8"))
}

fn primitive_tokens(primitive: SchemaPrimitive) -> TokenStream {
    let variant = Ident::new(&format!("{:?}", primitive), Span::call_site());
    quote! { ::schema_weld::TypeRef::Primitive(::schema_weld::SchemaPrimitive::#variant) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn tokens(ty: Type) -> String {
        rust_type_to_type_ref(&ty).unwrap().to_string().replace(' ', "")
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(
            tokens(parse_quote!(String)),
            "::schema_weld::TypeRef::Primitive(::schema_weld::SchemaPrimitive::String)"
        );
        assert!(tokens(parse_quote!(i32)).ends_with("SchemaPrimitive::Int)"));
        assert!(tokens(parse_quote!(bool)).ends_with("SchemaPrimitive::Bool)"));
        assert!(tokens(parse_quote!(())).ends_with("SchemaPrimitive::Unit)"));
    }

    #[test]
    fn test_bytes() {
        assert!(tokens(parse_quote!(Vec<u8>)).ends_with("SchemaPrimitive::Bytes)"));
    }

    #[test]
    fn test_containers() {
        let option = tokens(parse_quote!(Option<Vec<String>>));
        assert!(option.starts_with("::schema_weld::TypeRef::optional(::schema_weld::TypeRef::list("));

        let map = tokens(parse_quote!(HashMap<String, Child>));
        assert!(map.starts_with("::schema_weld::TypeRef::map("));
        assert!(map.contains("TypeRef::of::<Child>()"));

        let boxed = tokens(parse_quote!(Box<Child>));
        assert!(boxed.starts_with("::schema_weld::TypeRef::boxed("));

        let reference = tokens(parse_quote!(&str));
        assert!(reference.starts_with("::schema_weld::TypeRef::boxed("));
    }

    #[test]
    fn test_custom_type() {
        assert_eq!(
            tokens(parse_quote!(model::FileStat)),
            "::schema_weld::TypeRef::of::<model::FileStat>()"
        );
    }

    #[test]
    fn test_unsupported_types_return_errors() {
        let ty: Type = parse_quote!(impl Iterator<Item = u32>);
        let err = rust_type_to_type_ref(&ty).unwrap_err();
        assert!(err.to_string().contains("impl Trait"));

        let ty: Type = parse_quote!((String, u32));
        assert!(rust_type_to_type_ref(&ty).is_err());
    }
}
