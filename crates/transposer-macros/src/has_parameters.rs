//! Derive macro for the `HasParameters` trait.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, Type};

/// Derive the `HasParameters` trait for a struct.
///
/// Looks for a field marked with `#[parameters]` and generates the implementation.
pub fn derive_has_parameters_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    struct_name,
                    "HasParameters can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                struct_name,
                "HasParameters can only be derived for structs",
            ));
        }
    };

    let mut parameters_field: Option<(&Ident, &Type)> = None;

    for field in fields {
        if !field.attrs.iter().any(|attr| attr.path().is_ident("parameters")) {
            continue;
        }
        if parameters_field.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Only one field can be marked with #[parameters]",
            ));
        }
        let field_ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "Field must have a name"))?;
        parameters_field = Some((field_ident, &field.ty));
    }

    let (field_name, field_type) = parameters_field.ok_or_else(|| {
        syn::Error::new_spanned(
            struct_name,
            "No field marked with #[parameters]. Add #[parameters] to the field holding your parameter collection.",
        )
    })?;

    Ok(quote! {
        impl #impl_generics ::transposer_core::HasParameters for #struct_name #ty_generics #where_clause {
            type Parameters = #field_type;

            fn parameters(&self) -> &Self::Parameters {
                &self.#field_name
            }

            fn parameters_mut(&mut self) -> &mut Self::Parameters {
                &mut self.#field_name
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_marked_field() {
        let result = derive_has_parameters_impl(syn::parse_quote! {
            struct Plugin {
                parameters: MyParameters,
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_generates_impl() {
        let tokens = derive_has_parameters_impl(syn::parse_quote! {
            struct Plugin {
                #[parameters]
                parameters: MyParameters,
            }
        })
        .unwrap()
        .to_string();
        assert!(tokens.contains("HasParameters for Plugin"));
        assert!(tokens.contains("type Parameters = MyParameters"));
    }
}
