use crate::expr::Expr;
use num_rational::BigRational;
use num_traits::Signed;

/// Render `expr` with the fewest parentheses that still re-parse to the same tree shape.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) if r.is_integer() && !r.is_negative() => show_rational(r),
            Expr::Constant(r) => bracket(ctx, 2, show_rational(r)),

            Expr::Add(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "-" } else { "+" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Sub(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let s_b = pp(2, &b_inner);
                let body = format!("{s_a}{}{}", if neg_b { "+" } else { "-" }, s_b);
                bracket(ctx, 1, body)
            }

            Expr::Mul(_, _) => {
                let mut factors = Vec::new();
                collect_mul_factors(expr, &mut factors);
                let mut neg = false;
                let mut parts = Vec::with_capacity(factors.len());
                for factor in factors {
                    let (is_neg, inner) = split_neg(factor);
                    neg ^= is_neg;
                    parts.push(pp(3, &inner));
                }
                let body = parts.join("*");
                if neg {
                    bracket(ctx, 2, format!("-{}", bracket(3, 2, body)))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("{}/{}", pp(2, &a_inner), pp(3, &b_inner));
                if na ^ nb {
                    bracket(ctx, 2, format!("-({body})"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{}", pp(4, a), pp(3, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    pp(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", pp(3, &inner)))
                }
            }

            Expr::Sin(a) => format!("sin({})", pp(0, a)),
            Expr::Cos(a) => format!("cos({})", pp(0, a)),
            Expr::Tan(a) => format!("tan({})", pp(0, a)),
            Expr::Exp(a) => format!("exp({})", pp(0, a)),
            Expr::Log(a) => format!("log({})", pp(0, a)),
        }
    }

    pp(0, expr)
}

fn collect_mul_factors<'a>(expr: &'a Expr, out: &mut Vec<&'a Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            collect_mul_factors(a, out);
            collect_mul_factors(b, out);
        }
        other => out.push(other),
    }
}

fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

pub(crate) fn show_rational(r: &BigRational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
