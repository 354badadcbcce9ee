//! Semantic validation for the derive macro.

use std::collections::HashMap;

use crate::ir::{ParameterFieldIR, ParametersIR};

/// Validate the IR for semantic correctness.
pub fn validate(ir: &ParametersIR) -> syn::Result<()> {
    check_unique_string_ids(ir)?;
    check_no_hash_collisions(ir)?;
    for parameter in ir.parameter_fields() {
        validate_range(parameter)?;
        validate_default_in_range(parameter)?;
    }
    Ok(())
}

/// Check that all string IDs are unique.
fn check_unique_string_ids(ir: &ParametersIR) -> syn::Result<()> {
    let mut seen: HashMap<&str, &syn::Ident> = HashMap::new();

    for parameter in ir.parameter_fields() {
        if let Some(first_field) = seen.get(parameter.string_id.as_str()) {
            return Err(syn::Error::new(
                parameter.span,
                format!(
                    "Duplicate parameter id \"{}\": already used by field `{}`",
                    parameter.string_id, first_field
                ),
            ));
        }
        seen.insert(&parameter.string_id, &parameter.field_name);
    }

    Ok(())
}

/// Check that no two parameter IDs hash to the same value.
fn check_no_hash_collisions(ir: &ParametersIR) -> syn::Result<()> {
    let mut seen: HashMap<u32, &str> = HashMap::new();

    for parameter in ir.parameter_fields() {
        if let Some(first_id) = seen.get(&parameter.hash_id) {
            return Err(syn::Error::new(
                parameter.span,
                format!(
                    "Parameter ID hash collision: \"{}\" and \"{}\" both hash to 0x{:08x}. \
                     Rename one of these parameters to avoid the collision.",
                    parameter.string_id, first_id, parameter.hash_id
                ),
            ));
        }
        seen.insert(parameter.hash_id, &parameter.string_id);
    }

    Ok(())
}

/// Range must be non-empty and fit in `i32`.
fn validate_range(parameter: &ParameterFieldIR) -> syn::Result<()> {
    let range = &parameter.range;
    if range.start >= range.end {
        return Err(syn::Error::new(
            range.span,
            format!(
                "invalid range: start ({}) must be less than end ({})",
                range.start, range.end
            ),
        ));
    }
    if i32::try_from(range.start).is_err() || i32::try_from(range.end).is_err() {
        return Err(syn::Error::new(
            range.span,
            format!("range {}..={} does not fit in i32", range.start, range.end),
        ));
    }
    Ok(())
}

fn validate_default_in_range(parameter: &ParameterFieldIR) -> syn::Result<()> {
    let range = &parameter.range;
    if parameter.default < range.start || parameter.default > range.end {
        return Err(syn::Error::new(
            parameter.span,
            format!(
                "default value {} is outside range {}..={}",
                parameter.default, range.start, range.end
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    fn check(input: syn::DeriveInput) -> Result<(), String> {
        let ir = parse(input).map_err(|e| e.to_string())?;
        validate(&ir).map_err(|e| e.to_string())
    }

    #[test]
    fn test_accepts_valid_struct() {
        assert!(check(syn::parse_quote! {
            struct P {
                #[parameter(id = "coarse", name = "Coarse", default = 0, range = -12..=12)]
                coarse: IntParameter,
                #[parameter(id = "fine", name = "Fine", default = 0, range = -50..=50)]
                fine: IntParameter,
            }
        })
        .is_ok());
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let error = check(syn::parse_quote! {
            struct P {
                #[parameter(id = "t", name = "A", default = 0, range = 0..=1)]
                a: IntParameter,
                #[parameter(id = "t", name = "B", default = 0, range = 0..=1)]
                b: IntParameter,
            }
        })
        .unwrap_err();
        assert!(error.contains("Duplicate parameter id \"t\""));
    }

    #[test]
    fn test_rejects_default_outside_range() {
        let error = check(syn::parse_quote! {
            struct P {
                #[parameter(id = "t", name = "T", default = 13, range = -12..=12)]
                t: IntParameter,
            }
        })
        .unwrap_err();
        assert_eq!(error, "default value 13 is outside range -12..=12");
    }

    #[test]
    fn test_rejects_inverted_range() {
        let error = check(syn::parse_quote! {
            struct P {
                #[parameter(id = "t", name = "T", default = 0, range = 12..=-12)]
                t: IntParameter,
            }
        })
        .unwrap_err();
        assert!(error.starts_with("invalid range"));
    }
}
