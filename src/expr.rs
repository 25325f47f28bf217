//! Expression tree definitions and helpers.

use std::collections::BTreeSet;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

pub type Rational = BigRational;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Expr {
    Variable(String),
    Constant(Rational),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Neg(Box<Expr>),
    Sin(Box<Expr>),
    Cos(Box<Expr>),
    Tan(Box<Expr>),
    Exp(Box<Expr>),
    Log(Box<Expr>),
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn constant(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::new(num.into(), den.into()))
    }

    pub fn integer(value: impl Into<BigInt>) -> Self {
        Expr::Constant(Rational::from_integer(value.into()))
    }

    pub fn rational(value: Rational) -> Self {
        Expr::Constant(value)
    }

    pub fn negate(self) -> Self {
        match self {
            Expr::Constant(r) => Expr::Constant(-r),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_zero())
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Constant(r) if r.is_one())
    }

    pub fn as_variable(&self) -> Option<&str> {
        if let Expr::Variable(name) = self {
            Some(name)
        } else {
            None
        }
    }

    pub fn as_constant(&self) -> Option<&Rational> {
        if let Expr::Constant(c) = self {
            Some(c)
        } else {
            None
        }
    }

    /// True when `var` occurs anywhere in the tree.
    pub fn contains_var(&self, var: &str) -> bool {
        match self {
            Expr::Variable(name) => name == var,
            Expr::Constant(_) => false,
            Expr::Add(a, b)
            | Expr::Sub(a, b)
            | Expr::Mul(a, b)
            | Expr::Div(a, b)
            | Expr::Pow(a, b) => a.contains_var(var) || b.contains_var(var),
            Expr::Neg(a)
            | Expr::Sin(a)
            | Expr::Cos(a)
            | Expr::Tan(a)
            | Expr::Exp(a)
            | Expr::Log(a) => a.contains_var(var),
        }
    }

    /// Names of all free variables, sorted.
    pub fn variables(&self) -> BTreeSet<String> {
        fn walk(expr: &Expr, out: &mut BTreeSet<String>) {
            match expr {
                Expr::Variable(name) => {
                    out.insert(name.clone());
                }
                Expr::Constant(_) => {}
                Expr::Add(a, b)
                | Expr::Sub(a, b)
                | Expr::Mul(a, b)
                | Expr::Div(a, b)
                | Expr::Pow(a, b) => {
                    walk(a, out);
                    walk(b, out);
                }
                Expr::Neg(a)
                | Expr::Sin(a)
                | Expr::Cos(a)
                | Expr::Tan(a)
                | Expr::Exp(a)
                | Expr::Log(a) => walk(a, out),
            }
        }

        let mut out = BTreeSet::new();
        walk(self, &mut out);
        out
    }

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn zero() -> Expr {
    Expr::Constant(Rational::zero())
}

pub fn one() -> Expr {
    Expr::Constant(Rational::one())
}

pub fn rational(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Pow(base.boxed(), exp.boxed())
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(a.boxed(), b.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(a.boxed())
}
