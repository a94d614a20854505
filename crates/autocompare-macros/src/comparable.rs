// #[derive(Comparable)] implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{parse_quote, Attribute, Data, DeriveInput, Error, Fields, Visibility};

use crate::get_attribute;

#[derive(Default)]
struct CompareFlags {
    field: bool,
    skip: bool,
}

fn parse_compare_flags(attrs: &[Attribute]) -> Result<CompareFlags, Error> {
    let mut flags = CompareFlags::default();
    if let Some(attr) = get_attribute(attrs, "compare") {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("field") {
                flags.field = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                flags.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `field` or `skip`"))
            }
        })?;
    }
    Ok(flags)
}

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let type_name = name.to_string();

    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(Error::new_spanned(
            lifetime,
            "#[derive(Comparable)] does not support lifetime parameters",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(Error::new_spanned(
                    &input,
                    "#[derive(Comparable)] requires named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(Comparable)] only works on structs",
            ))
        }
    };

    // TypeId needs every type parameter to be 'static.
    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = generics.make_where_clause();
        for param in &type_params {
            where_clause.predicates.push(parse_quote!(#param: 'static));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut members = Vec::new();
    for field in fields {
        let flags = parse_compare_flags(&field.attrs)?;
        if flags.skip {
            continue;
        }

        let field_name = match field.ident.as_ref() {
            Some(ident) => ident.to_string(),
            None => return Err(Error::new_spanned(field, "expected a named field")),
        };
        let field_type = &field.ty;
        let kind = if flags.field {
            quote! { ::autocompare::__internal::MemberKind::Field }
        } else {
            quote! { ::autocompare::__internal::MemberKind::Property }
        };
        let public = if matches!(field.vis, Visibility::Public(_)) {
            quote! { .public() }
        } else {
            TokenStream::new()
        };

        members.push(quote! {
            .with_member(
                ::autocompare::__internal::MemberDescriptor::new(
                    #field_name,
                    ::autocompare::__internal::MemberType::of::<#field_type>(),
                )
                .with_kind(#kind)
                #public
            )
        });
    }

    let expanded = quote! {
        impl #impl_generics ::autocompare::__internal::Comparable for #name #ty_generics #where_clause {
            fn type_descriptor() -> ::autocompare::__internal::TypeDescriptor {
                ::autocompare::__internal::TypeDescriptor::new(
                    #type_name,
                    ::std::any::TypeId::of::<Self>(),
                )
                #(#members)*
            }
        }
    };

    Ok(expanded)
}
