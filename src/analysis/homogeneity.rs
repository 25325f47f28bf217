//! Homogeneity by scaling: substitute `x -> t*x`, `y -> t*y` and check that the rational normal
//! form factors as `t^k` times a `t`-free expression.

use log::trace;

use crate::equation::VARIABLES;
use crate::expr::{Expr, Rational, mul, pow, sub};
use crate::polynomial::Polynomial;
use crate::simplify::{Canonicalizer, substitute_all};

/// How an expression responds to scaling its variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scaling {
    /// The expression is identically zero.
    Zero,
    Degree(Rational),
    Inconsistent,
}

/// Degree `k` such that `f(t*x, t*y) = t^k * f(x, y)` for every variable in [`VARIABLES`].
pub fn scaling_degree(expr: &Expr, canon: &mut Canonicalizer) -> Scaling {
    let t = Expr::var(scale_symbol(expr));
    let bindings: Vec<(&str, Expr)> = VARIABLES
        .iter()
        .map(|v| (*v, mul(t.clone(), Expr::var(*v))))
        .collect();
    let scaled = substitute_all(expr, &bindings);

    let form = canon.form(&scaled);
    if form.is_zero() {
        return Scaling::Zero;
    }

    let (Some(a), Some(b)) = (uniform_power(&form.num, &t), uniform_power(&form.den, &t)) else {
        trace!("{expr}: scale symbol does not factor out");
        return Scaling::Inconsistent;
    };
    let k = a - b;

    let residual = sub(scaled, mul(pow(t, Expr::Constant(k.clone())), expr.clone()));
    if canon.is_zero(&residual) {
        Scaling::Degree(k)
    } else {
        trace!("{expr}: f(tx,ty) - t^{k}*f(x,y) does not cancel");
        Scaling::Inconsistent
    }
}

/// The exponent of `t` shared by every term, provided `t` appears nowhere else.
fn uniform_power(poly: &Polynomial, t: &Expr) -> Option<Rational> {
    let name = t.as_variable()?;
    let mut shared: Option<Rational> = None;
    for (monomial, _) in poly.terms() {
        let hidden = monomial
            .factors()
            .any(|(atom, _)| atom != t && atom.contains_var(name));
        if hidden {
            return None;
        }
        let exp = monomial.exponent_of(t);
        match &shared {
            None => shared = Some(exp),
            Some(prev) if *prev == exp => {}
            Some(_) => return None,
        }
    }
    shared
}

/// `t`, or `t1`, `t2`, ... if the expression already mentions it.
fn scale_symbol(expr: &Expr) -> String {
    let used = expr.variables();
    std::iter::once("t".to_string())
        .chain((1..).map(|i| format!("t{i}")))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| "t".to_string())
}

/// The common degree of `m` and `n`, if both are homogeneous of the same degree.
///
/// An identically zero coefficient has no degree, so the equation is then not homogeneous.
pub fn check_homogeneity(m: &Expr, n: &Expr, canon: &mut Canonicalizer) -> Option<Rational> {
    let sm = scaling_degree(m, canon);
    let sn = scaling_degree(n, canon);
    trace!("scaling: M -> {sm:?}, N -> {sn:?}");
    match (sm, sn) {
        (Scaling::Degree(a), Scaling::Degree(b)) if a == b => Some(a),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::rational;
    use crate::parser::parse_expr;

    fn degree(input: &str) -> Scaling {
        let expr = parse_expr(input).expect("parse input");
        scaling_degree(&expr, &mut Canonicalizer::default())
    }

    #[test]
    fn polynomial_degrees() {
        assert_eq!(degree("x^2 + x*y"), Scaling::Degree(rational(2, 1)));
        assert_eq!(degree("7"), Scaling::Degree(rational(0, 1)));
        assert_eq!(degree("x^2 + y"), Scaling::Inconsistent);
    }

    #[test]
    fn quotients_and_roots() {
        assert_eq!(degree("x/(x+y)"), Scaling::Degree(rational(0, 1)));
        assert_eq!(degree("1/(x*y)"), Scaling::Degree(rational(-2, 1)));
        assert_eq!(degree("sqrt(x^2+y^2)"), Scaling::Degree(rational(1, 1)));
        assert_eq!(degree("sqrt(x)"), Scaling::Degree(rational(1, 2)));
    }

    #[test]
    fn transcendental_arguments_must_be_scale_free() {
        assert_eq!(degree("x*sin(y/x)"), Scaling::Degree(rational(1, 1)));
        assert_eq!(degree("exp(x)"), Scaling::Inconsistent);
        assert_eq!(degree("log(x)"), Scaling::Inconsistent);
    }

    #[test]
    fn zero_coefficient_has_no_degree() {
        assert_eq!(degree("x - x"), Scaling::Zero);
        let mut canon = Canonicalizer::default();
        let m = parse_expr("0").unwrap();
        let n = parse_expr("x^3").unwrap();
        assert_eq!(check_homogeneity(&m, &n, &mut canon), None);
        assert_eq!(check_homogeneity(&n, &m, &mut canon), None);
        assert_eq!(check_homogeneity(&m, &m, &mut canon), None);
        assert_eq!(check_homogeneity(&n, &n, &mut canon), Some(rational(3, 1)));
    }

    #[test]
    fn existing_t_is_avoided() {
        let expr = Expr::var("t");
        assert_eq!(scale_symbol(&expr), "t1");
    }
}
