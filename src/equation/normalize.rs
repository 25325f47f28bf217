use crate::error::{FormatError, Result};

use super::lexer::{Token, render, tokenize};

/// Rewrite loosely formatted equation text into the strict grammar: no whitespace, `^` for
/// powers, explicit `*` between adjacent operands, and no trailing `=0`.
///
/// Normalizing an already normalized string returns it unchanged.
pub fn normalize_equation(raw: &str) -> Result<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(FormatError::Empty.into());
    }

    let tokens = tokenize(&compact);
    if !tokens.iter().any(Token::is_marker) {
        return Err(FormatError::MissingMarker.into());
    }

    let mut tokens = insert_implicit_multiplication(tokens);
    while ends_with_zero_rhs(&tokens) {
        let len = tokens.len();
        tokens.truncate(len - 2);
    }

    Ok(render(&tokens))
}

/// Insert `*` wherever an operand is immediately followed by another operand.
pub fn insert_implicit_multiplication(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len() * 2);
    for token in tokens {
        if out
            .last()
            .is_some_and(|prev| prev.ends_value() && token.starts_value())
        {
            out.push(Token::Op('*'));
        }
        out.push(token);
    }
    out
}

fn ends_with_zero_rhs(tokens: &[Token]) -> bool {
    matches!(tokens, [.., Token::Equals, Token::Number(digits)] if is_zero_literal(digits))
}

fn is_zero_literal(digits: &str) -> bool {
    digits.chars().all(|c| c == '0' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    #[test]
    fn inserts_products_around_markers() {
        assert_eq!(normalize_equation("2xdx+3ydy=0").unwrap(), "2*x*dx+3*y*dy");
    }

    #[test]
    fn closing_paren_before_function() {
        assert_eq!(normalize_equation("sin(x)cos(y) dx + dy").unwrap(), "sin(x)*cos(y)*dx+dy");
    }

    #[test]
    fn strips_spaced_zero_rhs() {
        assert_eq!(normalize_equation("y dx - x dy = 0").unwrap(), "y*dx-x*dy");
    }

    #[test]
    fn keeps_nonzero_rhs() {
        assert_eq!(normalize_equation("ydx+xdy=1").unwrap(), "y*dx+x*dy=1");
    }

    #[test]
    fn empty_and_markerless_input() {
        assert_eq!(normalize_equation("   "), Err(AnalysisError::Format(FormatError::Empty)));
        assert_eq!(
            normalize_equation("x+y"),
            Err(AnalysisError::Format(FormatError::MissingMarker))
        );
    }
}
