use log::trace;

use crate::calculus::differentiate;
use crate::expr::Expr;
use crate::simplify::{Canonicalizer, simplify_with_limit};

/// Outcome of the exactness test `dM/dy = dN/dx`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exactness {
    pub dm_dy: Expr,
    pub dn_dx: Expr,
    pub is_exact: bool,
}

pub fn check_exactness(
    m: &Expr,
    n: &Expr,
    simplify_iterations: usize,
    canon: &mut Canonicalizer,
) -> Exactness {
    let dm_dy = simplify_with_limit(differentiate("y", m), simplify_iterations);
    let dn_dx = simplify_with_limit(differentiate("x", n), simplify_iterations);
    trace!("dM/dy = {dm_dy}, dN/dx = {dn_dx}");
    let is_exact = canon.equivalent(&dm_dy, &dn_dx);
    Exactness {
        dm_dy,
        dn_dx,
        is_exact,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;
    use crate::simplify::DEFAULT_SIMPLIFY_ITERATIONS;

    fn exact(m: &str, n: &str) -> bool {
        let m = parse_expr(m).unwrap();
        let n = parse_expr(n).unwrap();
        check_exactness(&m, &n, DEFAULT_SIMPLIFY_ITERATIONS, &mut Canonicalizer::default())
            .is_exact
    }

    #[test]
    fn gradient_fields_are_exact() {
        assert!(exact("2*x*y", "x^2"));
        assert!(exact("y*cos(x*y)", "x*cos(x*y)"));
        assert!(exact("exp(x)*y", "exp(x)"));
    }

    #[test]
    fn linear_coefficients() {
        assert!(exact("x+y", "x-2*y+1"));
        assert!(!exact("y", "-x"));
    }
}
