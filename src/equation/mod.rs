//! Equation text handling: normalization, splitting into the `M` and `N` parts, and building
//! their expression trees.

pub mod lexer;
mod normalize;
mod split;

use log::debug;

use crate::error::{AnalysisError, Result};
use crate::expr::Expr;
use crate::parser::parse_expr;

pub use normalize::{insert_implicit_multiplication, normalize_equation};
pub use split::{EquationParts, split_equation};

/// Free variables an equation may mention.
pub const VARIABLES: [&str; 2] = ["x", "y"];

/// Coefficient trees of `M(x,y) dx + N(x,y) dy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Equation {
    pub m: Expr,
    pub n: Expr,
}

/// Normalize, split and build in one step.
pub fn parse_equation(raw: &str) -> Result<Equation> {
    let normalized = normalize_equation(raw)?;
    debug!("normalized equation: {normalized}");
    let parts = split_equation(&normalized)?;
    debug!("split parts: M = {}, N = {}", parts.m, parts.n);
    build_equation(&parts)
}

pub fn build_equation(parts: &EquationParts) -> Result<Equation> {
    let m = build_part("M", &parts.m)?;
    let n = build_part("N", &parts.n)?;
    Ok(Equation { m, n })
}

fn build_part(label: &str, text: &str) -> Result<Expr> {
    let expr = parse_expr(text).map_err(|err| match err {
        AnalysisError::Parse(detail) => {
            AnalysisError::Parse(format!("{label} part `{text}`: {detail}"))
        }
        other => other,
    })?;

    if let Some(symbol) = expr
        .variables()
        .into_iter()
        .find(|name| !VARIABLES.contains(&name.as_str()))
    {
        return Err(AnalysisError::Parse(format!(
            "{label} part `{text}`: unknown symbol `{symbol}`, only x and y may appear"
        )));
    }

    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, neg, sub};

    #[test]
    fn builds_both_coefficients() {
        let eq = parse_equation("(x+y)dx + (x-y)dy").unwrap();
        assert_eq!(eq.m, add(Expr::var("x"), Expr::var("y")));
        assert_eq!(eq.n, sub(Expr::var("x"), Expr::var("y")));
    }

    #[test]
    fn negative_second_coefficient() {
        let eq = parse_equation("ydx-xdy").unwrap();
        assert_eq!(eq.m, Expr::var("y"));
        assert_eq!(eq.n, neg(Expr::var("x")));
    }

    #[test]
    fn foreign_symbols_are_parse_errors() {
        let err = parse_equation("z dx + y dy").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("unknown symbol `z`"));
    }
}
