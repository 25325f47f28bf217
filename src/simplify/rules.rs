//! Local rewrites for derivative trees: constant folding, identity elements, sign pushing and
//! the `exp`/`log` inverse pair. Like terms are not collected; the canonical form decides
//! equality.

use std::collections::HashMap;

use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{Expr, Rational, one, zero};

/// Default pass cap for [`simplify_fully`].
pub const DEFAULT_SIMPLIFY_ITERATIONS: usize = 64;

/// Constant powers are only evaluated up to this exponent.
const MAX_FOLD_POWER: u32 = 1024;

/// One bottom-up pass of local rewrites, memoized per call.
pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    pass(expr, &mut cache)
}

pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, DEFAULT_SIMPLIFY_ITERATIONS)
}

/// Repeat [`simplify`] until nothing changes or `max_iters` passes have run.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next = pass(current.clone(), &mut cache);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn pass(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }
    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(pass(*a, cache), pass(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(pass(*a, cache), pass(*b, cache)),
        Expr::Mul(a, b) => fold_mul(pass(*a, cache), pass(*b, cache)),
        Expr::Div(a, b) => fold_div(pass(*a, cache), pass(*b, cache)),
        Expr::Pow(a, b) => fold_pow(pass(*a, cache), pass(*b, cache)),
        Expr::Neg(a) => fold_neg(pass(*a, cache)),
        Expr::Sin(a) => odd_call(pass(*a, cache), Expr::Sin),
        Expr::Tan(a) => odd_call(pass(*a, cache), Expr::Tan),
        Expr::Cos(a) => match pass(*a, cache) {
            u if u.is_zero() => one(),
            Expr::Neg(u) => Expr::Cos(u),
            u => Expr::Cos(u.boxed()),
        },
        Expr::Exp(a) => match pass(*a, cache) {
            u if u.is_zero() => one(),
            Expr::Log(u) => *u,
            u => Expr::Exp(u.boxed()),
        },
        Expr::Log(a) => match pass(*a, cache) {
            u if u.is_one() => zero(),
            Expr::Exp(u) => *u,
            u => Expr::Log(u.boxed()),
        },
        leaf => leaf,
    };
    cache.insert(key, result.clone());
    result
}

pub fn simplify_add(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x + y),
        (a, b) if b.is_zero() => a,
        (a, b) if a.is_zero() => b,
        (a, Expr::Neg(b)) => simplify_sub(a, *b),
        (a, Expr::Constant(c)) if c.is_negative() => {
            Expr::Sub(a.boxed(), Expr::Constant(-c).boxed())
        }
        (a, b) => Expr::Add(a.boxed(), b.boxed()),
    }
}

pub fn simplify_sub(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x - y),
        (a, b) if b.is_zero() => a,
        (a, b) if a.is_zero() => fold_neg(b),
        (a, b) if a == b => zero(),
        (a, Expr::Neg(b)) => simplify_add(a, *b),
        (a, b) => Expr::Sub(a.boxed(), b.boxed()),
    }
}

fn fold_mul(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x * y),
        (a, b) if a.is_zero() || b.is_zero() => zero(),
        (a, b) if a.is_one() => b,
        (a, b) if b.is_one() => a,
        (Expr::Neg(a), b) => fold_neg(fold_mul(*a, b)),
        (a, Expr::Neg(b)) => fold_neg(fold_mul(a, *b)),
        // coefficients go in front
        (a, Expr::Constant(c)) => fold_mul(Expr::Constant(c), a),
        (Expr::Constant(c), b) if c == -Rational::one() => fold_neg(b),
        (Expr::Constant(x), Expr::Mul(l, r)) => match *l {
            Expr::Constant(y) => fold_mul(Expr::Constant(x * y), *r),
            l => Expr::Mul(Expr::Constant(x).boxed(), Expr::Mul(l.boxed(), r).boxed()),
        },
        (a, b) => Expr::Mul(a.boxed(), b.boxed()),
    }
}

fn fold_div(a: Expr, b: Expr) -> Expr {
    match (a, b) {
        (a, b) if b.is_zero() => Expr::Div(a.boxed(), b.boxed()),
        (Expr::Constant(x), Expr::Constant(y)) => Expr::Constant(x / y),
        (a, _) if a.is_zero() => zero(),
        (a, b) if b.is_one() => a,
        (a, b) if a == b => one(),
        (Expr::Neg(a), b) => fold_neg(fold_div(*a, b)),
        (a, Expr::Neg(b)) => fold_neg(fold_div(a, *b)),
        (a, Expr::Constant(c)) => fold_mul(Expr::Constant(c.recip()), a),
        (a, b) => Expr::Div(a.boxed(), b.boxed()),
    }
}

fn fold_pow(base: Expr, exp: Expr) -> Expr {
    match (base, exp) {
        (_, e) if e.is_zero() => one(),
        (b, e) if e.is_one() => b,
        (b, _) if b.is_one() => one(),
        (Expr::Constant(b), Expr::Constant(e)) => {
            let k = if e.is_integer() { e.to_integer().to_i32() } else { None };
            match k {
                Some(k) if k.unsigned_abs() <= MAX_FOLD_POWER && (k >= 0 || !b.is_zero()) => {
                    Expr::Constant(b.pow(k))
                }
                _ => Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed()),
            }
        }
        (b, e) => Expr::Pow(b.boxed(), e.boxed()),
    }
}

fn fold_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(c) => Expr::Constant(-c),
        Expr::Neg(inner) => *inner,
        other => Expr::Neg(other.boxed()),
    }
}

/// `f(0) = 0` and `f(-u) = -f(u)`.
fn odd_call(arg: Expr, ctor: fn(Box<Expr>) -> Expr) -> Expr {
    match arg {
        u if u.is_zero() => zero(),
        Expr::Neg(u) => fold_neg(ctor(u)),
        u => ctor(u.boxed()),
    }
}
