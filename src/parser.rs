use crate::error::{AnalysisError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit1, multispace0};
use nom::combinator::{all_consuming, cut, map, map_res, opt, recognize};
use nom::error::{VerboseError, VerboseErrorKind, context};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::{Num, One};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parse an algebraic expression: `+ - * / ^`, parentheses, integer and decimal literals,
/// identifiers, and `sin cos tan exp log ln sqrt` applied to a parenthesised or primary argument.
///
/// Unary minus binds looser than `^`, so `-x^2` is `-(x^2)`; `^` is right-associative and
/// accepts a signed exponent (`x^-1`).
pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(AnalysisError::Parse(describe_error(input, &e)))
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(AnalysisError::Parse("unexpected end of input".to_string()))
        }
    }
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    alt((
        map(preceded(ws(char('-')), parse_unary), |expr| Expr::Neg(expr.boxed())),
        preceded(ws(char('+')), parse_unary),
        parse_pow,
    ))(input)
}

fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    let (rest, exp) = opt(preceded(ws(char('^')), parse_unary))(rest)?;
    match exp {
        Some(exp) => Ok((rest, Expr::Pow(base.boxed(), exp.boxed()))),
        None => Ok((rest, base)),
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    context(
        "operand",
        alt((parse_parens, parse_function, parse_number, parse_identifier)),
    )(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    preceded(ws(char('(')), cut(closed_by_paren))(input)
}

fn closed_by_paren(input: &str) -> ParseResult<'_, Expr> {
    let (rest, expr) = parse_add_sub(input)?;
    let (rest, _) = context("closing parenthesis", ws(char(')')))(rest)?;
    Ok((rest, expr))
}

fn parse_function(input: &str) -> ParseResult<'_, Expr> {
    let (rest, (name, arg)) = pair(
        alt((
            tag("sqrt"),
            tag("sin"),
            tag("cos"),
            tag("tan"),
            tag("exp"),
            tag("log"),
            tag("ln"),
        )),
        parse_primary,
    )(input)?;

    let expr = match name {
        "sqrt" => Expr::Pow(
            arg.boxed(),
            Expr::Constant(Rational::new(BigInt::one(), BigInt::from(2))).boxed(),
        ),
        "sin" => Expr::Sin(arg.boxed()),
        "cos" => Expr::Cos(arg.boxed()),
        "tan" => Expr::Tan(arg.boxed()),
        "exp" => Expr::Exp(arg.boxed()),
        _ => Expr::Log(arg.boxed()),
    };

    Ok((rest, expr))
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map_res(
        ws(recognize(pair(digit1, opt(pair(char('.'), digit1))))),
        decimal_to_rational,
    )(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| {
        Expr::Variable(s.to_string())
    })(input)
}

/// Read `123` or `1.25` as an exact rational.
fn decimal_to_rational(text: &str) -> std::result::Result<Expr, num_bigint::ParseBigIntError> {
    let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
    let numer = BigInt::from_str_radix(&format!("{whole}{frac}"), 10)?;
    let denom = BigInt::from(10).pow(frac.len() as u32);
    Ok(Expr::Constant(Rational::new(numer, denom)))
}

fn describe_error(input: &str, err: &VerboseError<&str>) -> String {
    let Some((rest, kind)) = err.errors.first() else {
        return "invalid expression".to_string();
    };
    let offset = input.len() - rest.len();
    let context = err.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(what) => Some(*what),
        _ => None,
    });
    let expected = match (context, kind) {
        (Some(what), _) => format!("expected {what}"),
        (None, VerboseErrorKind::Char(c)) => format!("expected `{c}`"),
        (None, _) => "unexpected input".to_string(),
    };
    match rest.chars().next() {
        Some(found) => format!("{expected} at position {offset}, found `{found}`"),
        None => format!("{expected} at end of input"),
    }
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{add, mul, neg, pow, rational};

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_eq!(parse_expr("-x^2").unwrap(), neg(pow(x(), Expr::integer(2))));
    }

    #[test]
    fn power_is_right_associative_with_signed_exponent() {
        assert_eq!(parse_expr("x^-1").unwrap(), pow(x(), neg(Expr::integer(1))));
        assert_eq!(
            parse_expr("2^3^2").unwrap(),
            pow(Expr::integer(2), pow(Expr::integer(3), Expr::integer(2)))
        );
    }

    #[test]
    fn decimals_are_exact() {
        assert_eq!(parse_expr("0.25*x").unwrap(), mul(Expr::Constant(rational(1, 4)), x()));
    }

    #[test]
    fn function_without_parentheses_takes_primary() {
        assert_eq!(parse_expr("sinx+1").unwrap(), add(Expr::Sin(x().boxed()), Expr::integer(1)));
    }

    #[test]
    fn sqrt_and_ln_are_sugar() {
        assert_eq!(parse_expr("sqrt(x)").unwrap(), pow(x(), Expr::Constant(rational(1, 2))));
        assert_eq!(parse_expr("ln(x)").unwrap(), Expr::Log(x().boxed()));
    }

    #[test]
    fn unbalanced_parenthesis_is_reported() {
        let err = parse_expr("(x+y").unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("closing parenthesis"), "{err}");
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(parse_expr("x)").is_err());
        assert!(parse_expr("x#").is_err());
        assert!(parse_expr("").is_err());
    }
}
