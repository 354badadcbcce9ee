//! Code generation for the derive macro.
//!
//! Emits the ID constants, the `Default` impl and the `Parameters` impl
//! from the validated IR. Generated paths are absolute (`::transposer_core`)
//! so the derive works regardless of the caller's imports.

use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::{FieldIR, ParameterFieldIR, ParameterKind, ParametersIR};

/// Generate all code for the derive macro.
pub fn generate(ir: &ParametersIR) -> TokenStream {
    let const_ids = generate_const_ids(ir);
    let default_impl = generate_default_impl(ir);
    let parameters_impl = generate_parameters_impl(ir);

    quote! {
        #const_ids
        #default_impl
        #parameters_impl
    }
}

/// Generate `PARAMETER_<FIELD>_ID` constants.
fn generate_const_ids(ir: &ParametersIR) -> TokenStream {
    let struct_name = &ir.struct_name;
    let (impl_generics, ty_generics, where_clause) = ir.generics.split_for_impl();

    let const_defs = ir.parameter_fields().map(|parameter| {
        let const_name = parameter.const_name();
        let hash = parameter.hash_id;
        let doc = format!("Host-facing ID of the `{}` parameter.", parameter.string_id);
        quote! {
            #[doc = #doc]
            pub const #const_name: ::transposer_core::ParameterId = #hash;
        }
    });

    quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#const_defs)*
        }
    }
}

/// Constructor expression for one parameter field.
fn parameter_constructor(parameter: &ParameterFieldIR) -> TokenStream {
    let name = &parameter.name;
    // Bounds and default were checked against i32 in validation.
    let default = parameter.default as i32;
    let start = parameter.range.start as i32;
    let end = parameter.range.end as i32;
    let const_name = parameter.const_name();

    let constructor = match parameter.kind {
        ParameterKind::Integer => quote! { new },
        ParameterKind::Semitones => quote! { semitones },
    };

    let short_name = parameter.short_name.as_ref().map(|short| {
        quote! { .with_short_name(#short) }
    });

    quote! {
        ::transposer_core::IntParameter::#constructor(#name, #default, #start..=#end)
            .with_id(Self::#const_name)
            #short_name
    }
}

fn generate_default_impl(ir: &ParametersIR) -> TokenStream {
    let struct_name = &ir.struct_name;
    let (impl_generics, ty_generics, where_clause) = ir.generics.split_for_impl();

    let initializers = ir.fields.iter().map(|field| match field {
        FieldIR::Parameter(parameter) => {
            let field_name = &parameter.field_name;
            let constructor = parameter_constructor(parameter);
            quote! { #field_name: #constructor }
        }
        FieldIR::Plain(field_name) => {
            quote! { #field_name: ::core::default::Default::default() }
        }
    });

    quote! {
        impl #impl_generics ::core::default::Default for #struct_name #ty_generics #where_clause {
            fn default() -> Self {
                Self {
                    #(#initializers,)*
                }
            }
        }
    }
}

fn generate_parameters_impl(ir: &ParametersIR) -> TokenStream {
    let struct_name = &ir.struct_name;
    let (impl_generics, ty_generics, where_clause) = ir.generics.split_for_impl();
    let count = ir.parameter_count();

    let refs: Vec<TokenStream> = ir
        .parameter_fields()
        .map(|parameter| {
            let field = &parameter.field_name;
            quote! { &self.#field as &dyn ::transposer_core::ParameterRef }
        })
        .collect();

    let by_id_checks = ir.parameter_fields().map(|parameter| {
        let field = &parameter.field_name;
        let const_name = parameter.const_name();
        quote! {
            if id == Self::#const_name {
                return ::std::option::Option::Some(&self.#field as &dyn ::transposer_core::ParameterRef);
            }
        }
    });

    quote! {
        impl #impl_generics ::transposer_core::Parameters for #struct_name #ty_generics #where_clause {
            fn count(&self) -> usize {
                #count
            }

            fn iter(&self) -> ::std::boxed::Box<dyn ::std::iter::Iterator<Item = &dyn ::transposer_core::ParameterRef> + '_> {
                ::std::boxed::Box::new([#(#refs),*].into_iter())
            }

            fn by_id(&self, id: ::transposer_core::ParameterId) -> ::std::option::Option<&dyn ::transposer_core::ParameterRef> {
                #(#by_id_checks)*
                ::std::option::Option::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn test_generated_items() {
        let ir = parse(syn::parse_quote! {
            struct P {
                #[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones", short_name = "Trn")]
                transpose: IntParameter,
                scratch: Vec<u8>,
            }
        })
        .unwrap();

        let tokens = generate(&ir).to_string();
        assert!(tokens.contains("PARAMETER_TRANSPOSE_ID"));
        assert!(tokens.contains("semitones"));
        assert!(tokens.contains("with_short_name"));
        assert!(tokens.contains("1usize"));
        assert!(tokens.contains("scratch"));
    }
}
