//! Implementation of `#[derive(SchemaType)]`

use crate::attrs::{rustdoc, ConstantAttrs, FieldAttrs, FieldCategory, TypeAttrs};
use crate::type_parser::rust_type_to_type_ref;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DataEnum, DataStruct, DeriveInput, Error, Fields, Visibility};

pub fn derive_schema_type_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "schema-weld: Generic types cannot be described. \
             Derive SchemaType on a concrete type instead.",
        ));
    }

    let attrs = TypeAttrs::parse(&input.attrs)?;
    let ident = &input.ident;
    let simple_name = ident.to_string();

    let members = match &input.data {
        Data::Struct(data) => struct_members(data, attrs.rustdoc)?,
        Data::Enum(data) => enum_members(data, attrs.rustdoc)?,
        Data::Union(data) => {
            return Err(Error::new_spanned(
                data.union_token,
                "schema-weld: Unions cannot be described.",
            ))
        }
    };

    let doc = if attrs.doc.is_some() {
        attrs.doc.clone()
    } else if attrs.rustdoc {
        rustdoc(&input.attrs)
    } else {
        None
    };

    let mut modifiers = Vec::new();
    if let Some(name) = &attrs.name {
        modifiers.push(quote! { .with_name(#name) });
    }
    if let Some(namespace) = &attrs.namespace {
        modifiers.push(quote! { .with_namespace(#namespace) });
    }
    if let Some(doc) = &doc {
        modifiers.push(quote! { .with_doc(#doc) });
    }
    if let Some(access) = attrs.access {
        let variant = syn::Ident::new(&format!("{:?}", access), proc_macro2::Span::call_site());
        modifiers.push(quote! { .with_access(::schema_weld::AccessMode::#variant) });
    }
    if attrs.transparent {
        modifiers.push(quote! { .transparent() });
    }
    if let Some(parent) = &attrs.extends {
        modifiers.push(quote! {
            .extends(<#parent as ::schema_weld::SchemaType>::schema_handle())
        });
    }

    Ok(quote! {
        impl ::schema_weld::SchemaType for #ident {
            fn schema_handle() -> ::schema_weld::TypeHandle {
                ::schema_weld::TypeHandle::new(::std::any::type_name::<Self>())
            }

            fn schema_node() -> ::schema_weld::TypeNode {
                ::schema_weld::TypeNode::new(
                    <Self as ::schema_weld::SchemaType>::schema_handle(),
                    #simple_name,
                )
                #(#modifiers)*
                .with_members(::std::vec![#(#members),*])
            }
        }

        ::schema_weld::register_type!(<#ident as ::schema_weld::SchemaType>::schema_node);
    })
}

fn struct_members(data: &DataStruct, adopt_rustdoc: bool) -> syn::Result<Vec<TokenStream>> {
    let fields = match &data.fields {
        Fields::Named(fields) => fields,
        Fields::Unit => return Ok(Vec::new()),
        Fields::Unnamed(fields) => {
            return Err(Error::new_spanned(
                fields,
                "schema-weld: Tuple structs have no member names. \
                 Use a struct with named fields instead.",
            ))
        }
    };

    let mut members = Vec::new();
    for field in &fields.named {
        let Some(name) = field.ident.as_ref() else {
            continue;
        };
        let name = name.to_string();
        let mut field_attrs = FieldAttrs::parse(&field.attrs)?;
        if adopt_rustdoc && field_attrs.docs.is_empty() {
            if let Some(text) = rustdoc(&field.attrs) {
                field_attrs.docs.push((None, text));
            }
        }

        // Transient members never contribute, so their types need not map
        let value_type = if field_attrs.category == Some(FieldCategory::Transient) {
            quote! { ::schema_weld::TypeRef::default() }
        } else {
            rust_type_to_type_ref(&field.ty)?
        };

        let mut modifiers = Vec::new();
        if matches!(field.vis, Visibility::Public(_)) {
            modifiers.push(quote! { .public() });
        }
        match field_attrs.category {
            Some(FieldCategory::Element) => modifiers.push(quote! { .element() }),
            Some(FieldCategory::Attribute) => modifiers.push(quote! { .attribute() }),
            Some(FieldCategory::Transient) => modifiers.push(quote! { .transient() }),
            None => {}
        }
        if let Some(override_name) = &field_attrs.name {
            modifiers.push(quote! { .named(#override_name) });
        }
        for (variant, text) in &field_attrs.docs {
            modifiers.push(match variant {
                Some(variant) => quote! { .with_variant_doc(#variant, #text) },
                None => quote! { .with_doc(#text) },
            });
        }
        for (discriminator, ty) in &field_attrs.variants {
            let type_ref = rust_type_to_type_ref(ty)?;
            modifiers.push(quote! { .variant(#discriminator, #type_ref) });
        }

        members.push(quote! {
            ::schema_weld::MemberNode::field(#name, #value_type)
            #(#modifiers)*
        });
    }
    Ok(members)
}

fn enum_members(data: &DataEnum, adopt_rustdoc: bool) -> syn::Result<Vec<TokenStream>> {
    let mut members = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new_spanned(
                &variant.fields,
                "schema-weld: Only unit variants map to enumeration values.",
            ));
        }
        let name = variant.ident.to_string();
        let constant = ConstantAttrs::parse(&variant.attrs)?;
        let doc = constant
            .doc
            .or_else(|| adopt_rustdoc.then(|| rustdoc(&variant.attrs)).flatten())
            .map(|text| quote! { .with_doc(#text) });
        members.push(quote! {
            ::schema_weld::MemberNode::enum_constant(#name) #doc
        });
    }
    Ok(members)
}
