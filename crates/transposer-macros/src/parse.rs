//! AST parsing for the derive macro.
//!
//! Transforms `syn::DeriveInput` into [`ParametersIR`].

use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Field, Fields};

use crate::ir::{FieldIR, ParameterFieldIR, ParameterKind, ParametersIR, RangeSpec};
use crate::range_eval;
use transposer_core::fnv1a_32;

/// Parse a `DeriveInput` into our intermediate representation.
pub fn parse(input: DeriveInput) -> syn::Result<ParametersIR> {
    let data_struct = match &input.data {
        Data::Struct(s) => s,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs, not unions",
            ))
        }
    };

    let fields = match &data_struct.fields {
        Fields::Named(named) => &named.named,
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] only supports structs with named fields",
            ))
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[derive(Parameters)] requires at least one field",
            ))
        }
    };

    let mut parsed_fields = Vec::new();
    for field in fields {
        parsed_fields.push(parse_field(field)?);
    }

    if !parsed_fields
        .iter()
        .any(|f| matches!(f, FieldIR::Parameter(_)))
    {
        return Err(syn::Error::new_spanned(
            &input,
            "#[derive(Parameters)] requires at least one #[parameter] field",
        ));
    }

    Ok(ParametersIR {
        struct_name: input.ident.clone(),
        generics: input.generics.clone(),
        fields: parsed_fields,
    })
}

fn parse_field(field: &Field) -> syn::Result<FieldIR> {
    let field_name = field
        .ident
        .clone()
        .ok_or_else(|| syn::Error::new_spanned(field, "Field must have a name"))?;

    if let Some(attr) = field
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("parameter"))
    {
        return parse_parameter_field(field, field_name, attr).map(FieldIR::Parameter);
    }

    // A parameter type without the attribute would silently vanish from the host.
    if extract_type_name(&field.ty).as_deref() == Some("IntParameter") {
        return Err(syn::Error::new_spanned(
            field,
            "IntParameter field is missing #[parameter(id = \"...\", ...)] attribute",
        ));
    }

    Ok(FieldIR::Plain(field_name))
}

/// Parse a field with `#[parameter(...)]`.
///
/// `#[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones")]`
fn parse_parameter_field(
    field: &Field,
    field_name: syn::Ident,
    attr: &syn::Attribute,
) -> syn::Result<ParameterFieldIR> {
    if extract_type_name(&field.ty).as_deref() != Some("IntParameter") {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "#[parameter] can only be used on IntParameter fields",
        ));
    }

    let mut string_id: Option<String> = None;
    let mut name: Option<String> = None;
    let mut short_name: Option<String> = None;
    let mut default: Option<i64> = None;
    let mut range: Option<RangeSpec> = None;
    let mut kind = ParameterKind::default();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("id") {
            let value: syn::LitStr = meta.value()?.parse()?;
            string_id = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("name") {
            let value: syn::LitStr = meta.value()?.parse()?;
            name = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("short_name") {
            let value: syn::LitStr = meta.value()?.parse()?;
            short_name = Some(value.value());
            Ok(())
        } else if meta.path.is_ident("default") {
            let expr: syn::Expr = meta.value()?.parse()?;
            default = Some(range_eval::eval_int_expr(&expr)?);
            Ok(())
        } else if meta.path.is_ident("range") {
            range = Some(parse_range_spec(&meta)?);
            Ok(())
        } else if meta.path.is_ident("kind") {
            let value: syn::LitStr = meta.value()?.parse()?;
            let kind_str = value.value();
            kind = ParameterKind::from_str(&kind_str).ok_or_else(|| {
                syn::Error::new_spanned(
                    &value,
                    format!("unknown kind '{}'. Valid kinds: integer, semitones", kind_str),
                )
            })?;
            Ok(())
        } else {
            Err(meta.error("unknown attribute. Expected: id, name, short_name, default, range, kind"))
        }
    })?;

    let missing = |key: &str| {
        syn::Error::new_spanned(
            attr,
            format!(
                "#[parameter] on field `{}` requires {} attribute",
                field_name, key
            ),
        )
    };
    let string_id = string_id.ok_or_else(|| missing("id"))?;
    let name = name.ok_or_else(|| missing("name"))?;
    let default = default.ok_or_else(|| missing("default"))?;
    let range = range.ok_or_else(|| missing("range"))?;

    if string_id.is_empty() {
        return Err(syn::Error::new_spanned(attr, "parameter id cannot be empty"));
    }

    let hash_id = fnv1a_32(&string_id);

    Ok(ParameterFieldIR {
        field_name,
        string_id,
        hash_id,
        name,
        short_name,
        default,
        range,
        kind,
        span: attr.path().segments[0].ident.span(),
    })
}

/// Parse a range specification from `range = start..=end`.
fn parse_range_spec(meta: &syn::meta::ParseNestedMeta) -> syn::Result<RangeSpec> {
    let expr: syn::ExprRange = meta.value()?.parse().map_err(|_| {
        syn::Error::new(
            meta.path.span(),
            "range must be an inclusive range expression like `-12..=12`",
        )
    })?;

    let start_expr = expr
        .start
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(&expr, "range must have a start value"))?;
    let end_expr = expr
        .end
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(&expr, "range must have an end value"))?;

    if !matches!(expr.limits, syn::RangeLimits::Closed(_)) {
        return Err(syn::Error::new_spanned(
            &expr,
            "range must be inclusive (use ..= not ..)",
        ));
    }

    let (start, end) = range_eval::eval_int_range(start_expr, end_expr)?;

    Ok(RangeSpec {
        start,
        end,
        span: expr.span(),
    })
}

/// Extract the simple type name from a type (e.g., `IntParameter` from `transposer_core::IntParameter`).
fn extract_type_name(ty: &syn::Type) -> Option<String> {
    if let syn::Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return Some(segment.ident.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_declarative_field() {
        let ir = parse(syn::parse_quote! {
            struct P {
                #[parameter(id = "transpose", name = "Transpose", default = 0, range = -12..=12, kind = "semitones")]
                transpose: IntParameter,
                scratch: u32,
            }
        })
        .unwrap();

        assert_eq!(ir.fields.len(), 2);
        assert_eq!(ir.parameter_count(), 1);
        let parameter = ir.parameter_fields().next().unwrap();
        assert_eq!(parameter.string_id, "transpose");
        assert_eq!(parameter.hash_id, fnv1a_32("transpose"));
        assert_eq!((parameter.range.start, parameter.range.end), (-12, 12));
        assert_eq!(parameter.kind, ParameterKind::Semitones);
        assert_eq!(parameter.const_name().to_string(), "PARAMETER_TRANSPOSE_ID");
    }

    #[test]
    fn test_missing_attribute_is_an_error() {
        let result = parse(syn::parse_quote! {
            struct P {
                transpose: IntParameter,
            }
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_range_is_an_error() {
        let result = parse(syn::parse_quote! {
            struct P {
                #[parameter(id = "t", name = "T", default = 0)]
                t: IntParameter,
            }
        });
        let message = result.err().map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("range"));
    }

    #[test]
    fn test_exclusive_range_is_an_error() {
        let result = parse(syn::parse_quote! {
            struct P {
                #[parameter(id = "t", name = "T", default = 0, range = -12..12)]
                t: IntParameter,
            }
        });
        assert!(result.is_err());
    }
}
