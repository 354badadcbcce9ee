//! Derive macros for the Transposer framework.
//!
//! - `#[derive(Parameters)]` builds a parameter collection from declarative
//!   field attributes, including its `Default` impl.
//! - `#[derive(HasParameters)]` wires a plugin or processor to the field
//!   holding that collection.
//!
//! # Example
//!
//! ```ignore
//! use transposer_core::IntParameter;
//! use transposer_macros::{HasParameters, Parameters};
//!
//! #[derive(Parameters)]
//! pub struct TransposerParameters {
//!     #[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones")]
//!     pub transpose: IntParameter,
//! }
//!
//! #[derive(Default, HasParameters)]
//! pub struct TransposerPlugin {
//!     #[parameters]
//!     parameters: TransposerParameters,
//! }
//! ```

use proc_macro::TokenStream;

mod codegen;
mod has_parameters;
mod ir;
mod parse;
mod range_eval;
mod validate;

/// Derive macro for parameter collections.
///
/// Generates:
/// - `Default`, constructing every parameter from its attributes
/// - the `Parameters` trait implementation (count, iter, by_id)
/// - `PARAMETER_<FIELD>_ID` constants holding each FNV-1a hashed ID
///
/// # Attributes
///
/// `#[parameter(...)]` on every `IntParameter` field:
///
/// | Key | Required | Meaning |
/// |-----|----------|---------|
/// | `id` | yes | String ID, hashed to the host-facing `u32` |
/// | `name` | yes | Display name |
/// | `default` | yes | Integer default, must lie inside `range` |
/// | `range` | yes | Inclusive integer range, e.g. `-12..=12` |
/// | `kind` | no | `"integer"` (default) or `"semitones"` |
/// | `short_name` | no | Short display name |
///
/// Fields without the attribute are initialized with `Default::default()`
/// and are not exposed to the host.
///
/// Duplicate IDs, ID hash collisions, empty ranges and out-of-range defaults
/// are compile errors.
#[proc_macro_derive(Parameters, attributes(parameter))]
pub fn derive_parameters(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match derive_parameters_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_parameters_impl(input: syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ir = parse::parse(input)?;
    validate::validate(&ir)?;
    Ok(codegen::generate(&ir))
}

/// Derive macro for the `HasParameters` trait.
///
/// Mark exactly one field with `#[parameters]`:
///
/// ```ignore
/// #[derive(HasParameters)]
/// pub struct TransposerProcessor {
///     #[parameters]
///     parameters: TransposerParameters,
/// }
/// ```
#[proc_macro_derive(HasParameters, attributes(parameters))]
pub fn derive_has_parameters(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    match has_parameters::derive_has_parameters_impl(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
