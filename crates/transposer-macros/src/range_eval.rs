//! Compile-time evaluation of integer literals in parameter attributes.
//!
//! Handles the bounds of `range = -12..=12` and the `default = -3` value.

use syn::spanned::Spanned;

/// Evaluate an integer literal expression.
///
/// Accepts `12`, `-12` and parenthesized forms like `(-12)`.
pub fn eval_int_expr(expr: &syn::Expr) -> syn::Result<i64> {
    match expr {
        syn::Expr::Lit(lit) => match &lit.lit {
            syn::Lit::Int(i) => i.base10_parse::<i64>().map_err(|e| {
                syn::Error::new(i.span(), format!("invalid integer literal: {}", e))
            }),
            syn::Lit::Float(f) => Err(syn::Error::new(
                f.span(),
                "IntParameter values must be integer literals",
            )),
            other => Err(syn::Error::new(other.span(), "expected integer literal")),
        },

        syn::Expr::Unary(unary) if matches!(unary.op, syn::UnOp::Neg(_)) => {
            let inner = eval_int_expr(&unary.expr)?;
            inner
                .checked_neg()
                .ok_or_else(|| syn::Error::new(unary.span(), "integer literal overflows"))
        }

        syn::Expr::Paren(paren) => eval_int_expr(&paren.expr),

        _ => Err(syn::Error::new(
            expr.span(),
            "expected integer literal (e.g., `12`, `-12`)",
        )),
    }
}

/// Evaluate both bounds of an inclusive range.
pub fn eval_int_range(start: &syn::Expr, end: &syn::Expr) -> syn::Result<(i64, i64)> {
    Ok((eval_int_expr(start)?, eval_int_expr(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literals() {
        assert_eq!(eval_int_expr(&syn::parse_quote!(12)).unwrap(), 12);
        assert_eq!(eval_int_expr(&syn::parse_quote!(-12)).unwrap(), -12);
        assert_eq!(eval_int_expr(&syn::parse_quote!((-3))).unwrap(), -3);
    }

    #[test]
    fn test_rejects_non_integers() {
        assert!(eval_int_expr(&syn::parse_quote!(1.5)).is_err());
        assert!(eval_int_expr(&syn::parse_quote!(SOME_CONST)).is_err());
    }
}
