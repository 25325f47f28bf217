use crate::error::{FormatError, Result};

use super::lexer::{Differential, Token, render, tokenize};

/// Coefficient substrings of `M dx + N dy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquationParts {
    pub m: String,
    pub n: String,
}

/// Divide a normalized equation at its `dx` and `dy` markers.
///
/// Either marker may come first. The second term may start with `+` (dropped) or `-` (kept
/// as part of the coefficient), and a `*` directly before a marker is dropped. An empty or
/// sign-only coefficient stands for `1` or `-1`.
pub fn split_equation(normalized: &str) -> Result<EquationParts> {
    let tokens = tokenize(normalized);
    let markers: Vec<(usize, Differential)> = tokens
        .iter()
        .enumerate()
        .filter_map(|(idx, token)| match token {
            Token::Marker(d) => Some((idx, *d)),
            _ => None,
        })
        .collect();

    let has = |wanted: Differential| markers.iter().any(|(_, d)| *d == wanted);
    if !has(Differential::Dx) || !has(Differential::Dy) {
        return Err(FormatError::MissingMarker.into());
    }

    let [(first, first_marker), (second, _)] = markers.as_slice() else {
        return Err(FormatError::Shape.into());
    };
    if second + 1 != tokens.len() {
        return Err(FormatError::Shape.into());
    }

    let leading = coefficient(&tokens[..*first])?;
    let trailing = coefficient(second_term(&tokens[first + 1..*second])?)?;

    let (m, n) = match first_marker {
        Differential::Dx => (leading, trailing),
        Differential::Dy => (trailing, leading),
    };
    Ok(EquationParts { m, n })
}

fn second_term(tokens: &[Token]) -> Result<&[Token]> {
    match tokens.first() {
        Some(Token::Op('+')) => Ok(&tokens[1..]),
        Some(Token::Op('*' | '/' | '^')) | Some(Token::Equals) => Err(FormatError::Shape.into()),
        _ => Ok(tokens),
    }
}

fn coefficient(tokens: &[Token]) -> Result<String> {
    let body = match tokens {
        [rest @ .., Token::Op('*')] => rest,
        _ => tokens,
    };
    Ok(match body {
        [] | [Token::Op('+')] => "1".to_string(),
        [Token::Op('-')] => "-1".to_string(),
        _ => render(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn parts(m: &str, n: &str) -> EquationParts {
        EquationParts {
            m: m.to_string(),
            n: n.to_string(),
        }
    }

    #[test]
    fn splits_standard_order() {
        assert_eq!(split_equation("(x+y)*dx+(x-y)*dy").unwrap(), parts("(x+y)", "(x-y)"));
    }

    #[test]
    fn keeps_minus_on_second_coefficient() {
        assert_eq!(split_equation("y*dx-x*dy").unwrap(), parts("y", "-x"));
    }

    #[test]
    fn swapped_markers_assign_by_name() {
        assert_eq!(split_equation("x*dy+y*dx").unwrap(), parts("y", "x"));
    }

    #[test]
    fn bare_markers_have_unit_coefficients() {
        assert_eq!(split_equation("dx-dy").unwrap(), parts("1", "-1"));
    }

    #[test]
    fn rejects_trailing_terms_and_repeats() {
        assert_eq!(split_equation("x*dx+y*dy+1"), Err(AnalysisError::Format(FormatError::Shape)));
        assert_eq!(
            split_equation("x*dx+y*dx+x*dy"),
            Err(AnalysisError::Format(FormatError::Shape))
        );
    }

    #[test]
    fn missing_dy_marker() {
        assert_eq!(
            split_equation("(x+y)*dx"),
            Err(AnalysisError::Format(FormatError::MissingMarker))
        );
    }
}
