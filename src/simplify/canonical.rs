//! Rational normal form.
//!
//! Every expression is rewritten as `num / den` where both sides are expanded polynomials over
//! canonical atoms (variables, `sin/cos/tan/exp/log` of canonical arguments, and opaque powers).
//! Arithmetic on these forms is exact, so an expression is identically zero exactly when the
//! numerator of its form cancels to the zero polynomial, provided its atoms are algebraically
//! independent. Dependent atoms (`sin(x)^2 + cos(x)^2`) are not recognised and make the test
//! answer "not zero".

use std::collections::HashMap;

use log::trace;
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::expr::{Expr, Rational, sub, zero};
use crate::polynomial::{Monomial, Polynomial};

/// Default cap on the integer power of a sum that gets expanded.
pub const DEFAULT_MAX_EXPAND_POWER: u32 = 32;

/// Coefficients are raised to integer powers only up to this magnitude.
const MAX_COEFF_POWER: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalForm {
    pub num: Polynomial,
    pub den: Polynomial,
}

impl RationalForm {
    pub fn zero() -> Self {
        RationalForm::from_poly(Polynomial::zero())
    }

    pub fn one() -> Self {
        RationalForm::constant(Rational::one())
    }

    pub fn constant(c: Rational) -> Self {
        RationalForm::from_poly(Polynomial::constant(c))
    }

    pub fn from_poly(num: Polynomial) -> Self {
        RationalForm {
            num,
            den: Polynomial::one(),
        }
    }

    fn from_atom(atom: Expr, coeff: Rational) -> Self {
        RationalForm::from_poly(Polynomial::term(Monomial::atom(atom), coeff))
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero() && !self.den.is_zero()
    }

    pub fn as_constant(&self) -> Option<Rational> {
        let num = self.num.as_constant()?;
        let den = self.den.as_constant()?;
        if den.is_zero() {
            None
        } else {
            Some(num / den)
        }
    }

    /// The single atom `a` when the form is exactly `1 * a^1`.
    fn as_atom(&self) -> Option<&Expr> {
        match self.as_scaled_atom()? {
            (atom, coeff) if coeff.is_one() => Some(atom),
            _ => None,
        }
    }

    /// `(a, c)` when the form is exactly `c * a^1`.
    fn as_scaled_atom(&self) -> Option<(&Expr, &Rational)> {
        if !self.den.is_one() {
            return None;
        }
        let (monomial, coeff) = self.num.as_single_term()?;
        let mut factors = monomial.factors();
        match (factors.next(), factors.next()) {
            (Some((atom, exp)), None) if exp.is_one() => Some((atom, coeff)),
            _ => None,
        }
    }

    pub fn negate(self) -> Self {
        RationalForm {
            num: -self.num,
            den: self.den,
        }
    }

    pub fn to_expr(&self) -> Expr {
        let num = poly_to_expr(&self.num);
        if self.den.is_one() {
            num
        } else {
            Expr::Div(num.boxed(), poly_to_expr(&self.den).boxed())
        }
    }
}

/// Builds [`RationalForm`]s, memoizing every subexpression it has seen.
#[derive(Debug)]
pub struct Canonicalizer {
    max_expand_power: u32,
    cache: HashMap<Expr, RationalForm>,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Canonicalizer::new(DEFAULT_MAX_EXPAND_POWER)
    }
}

impl Canonicalizer {
    pub fn new(max_expand_power: u32) -> Self {
        Canonicalizer {
            max_expand_power,
            cache: HashMap::new(),
        }
    }

    pub fn form(&mut self, expr: &Expr) -> RationalForm {
        if let Some(hit) = self.cache.get(expr) {
            return hit.clone();
        }
        let result = self.build(expr);
        trace!("canonical form of {expr}: {}", result.to_expr());
        self.cache.insert(expr.clone(), result.clone());
        result
    }

    pub fn is_zero(&mut self, expr: &Expr) -> bool {
        self.form(expr).is_zero()
    }

    pub fn equivalent(&mut self, a: &Expr, b: &Expr) -> bool {
        self.is_zero(&sub(a.clone(), b.clone()))
    }

    fn build(&mut self, expr: &Expr) -> RationalForm {
        match expr {
            Expr::Variable(_) => RationalForm::from_atom(expr.clone(), Rational::one()),
            Expr::Constant(c) => RationalForm::constant(c.clone()),
            Expr::Add(a, b) => {
                let (fa, fb) = (self.form(a), self.form(b));
                self.add(fa, fb)
            }
            Expr::Sub(a, b) => {
                let (fa, fb) = (self.form(a), self.form(b));
                self.add(fa, fb.negate())
            }
            Expr::Mul(a, b) => {
                let (fa, fb) = (self.form(a), self.form(b));
                self.mul(fa, fb)
            }
            Expr::Div(a, b) => {
                let (fa, fb) = (self.form(a), self.form(b));
                self.div(fa, fb)
            }
            Expr::Pow(a, b) => {
                let (base, exp) = (self.form(a), self.form(b));
                match exp.as_constant() {
                    Some(k) => self.constant_power(base, &k),
                    None => {
                        // a^b = exp(b * log(a))
                        let log = self.log_of(base);
                        let arg = self.mul(exp, log);
                        self.exp_of(arg)
                    }
                }
            }
            Expr::Neg(a) => self.form(a).negate(),
            Expr::Sin(a) => {
                let arg = self.form(a);
                self.odd_call(arg, Expr::Sin)
            }
            Expr::Tan(a) => {
                let arg = self.form(a);
                self.odd_call(arg, Expr::Tan)
            }
            Expr::Cos(a) => {
                let arg = self.form(a);
                if arg.is_zero() {
                    return RationalForm::one();
                }
                let arg = if arg.num.is_negative_leading() {
                    arg.negate()
                } else {
                    arg
                };
                RationalForm::from_atom(Expr::Cos(arg.to_expr().boxed()), Rational::one())
            }
            Expr::Exp(a) => {
                let arg = self.form(a);
                self.exp_of(arg)
            }
            Expr::Log(a) => {
                let arg = self.form(a);
                self.log_of(arg)
            }
        }
    }

    fn add(&mut self, a: RationalForm, b: RationalForm) -> RationalForm {
        if a.is_zero() {
            return b;
        }
        if b.is_zero() {
            return a;
        }
        if a.den == b.den {
            return self.tidy(a.num + b.num, a.den);
        }
        let num = a.num * b.den.clone() + b.num * a.den.clone();
        self.tidy(num, a.den * b.den)
    }

    fn mul(&mut self, a: RationalForm, b: RationalForm) -> RationalForm {
        if a.is_zero() || b.is_zero() {
            return RationalForm::zero();
        }
        self.tidy(a.num * b.num, a.den * b.den)
    }

    fn div(&mut self, a: RationalForm, b: RationalForm) -> RationalForm {
        if b.is_zero() {
            let atom = Expr::Div(a.to_expr().boxed(), zero().boxed());
            return RationalForm::from_atom(atom, Rational::one());
        }
        let inverse = RationalForm {
            num: b.den,
            den: b.num,
        };
        self.mul(a, inverse)
    }

    fn constant_power(&mut self, base: RationalForm, k: &Rational) -> RationalForm {
        if k.is_zero() {
            return RationalForm::one();
        }
        if base.is_zero() {
            if k.is_positive() {
                return RationalForm::zero();
            }
            let atom = Expr::Pow(zero().boxed(), Expr::Constant(k.clone()).boxed());
            return RationalForm::from_atom(atom, Rational::one());
        }

        if k.is_integer() {
            let n = k.to_integer();
            if base.den.is_one() {
                if let Some((monomial, coeff)) = base.num.as_single_term() {
                    if let Some(c) = n.to_i32().and_then(|n| integer_power(coeff, n)) {
                        let monomial = monomial.pow(k);
                        return self.tidy(Polynomial::term(monomial, c), Polynomial::one());
                    }
                }
            }
            if let Some(n) = n.to_u32().filter(|n| *n <= self.max_expand_power) {
                let n = n as usize;
                return self.tidy(base.num.pow(n), base.den.pow(n));
            }
            if let Some(n) = (-n).to_u32().filter(|n| *n <= self.max_expand_power) {
                let n = n as usize;
                return self.tidy(base.den.pow(n), base.num.pow(n));
            }
        }

        self.power_atom(base, k)
    }

    /// `base^k` for a power that is not expanded: pull the monomial content and the rational
    /// scale out of numerator and denominator, and keep what remains as an opaque atom.
    fn power_atom(&mut self, base: RationalForm, k: &Rational) -> RationalForm {
        let (num_content, num_scale, num_rest) = split_content(&base.num);
        let (den_content, den_scale, den_rest) = split_content(&base.den);

        let mut monomial = num_content.mul(&den_content.inverse()).pow(k);
        let scale = num_scale / den_scale;
        let coeff = match exact_power(&scale, k) {
            Some(c) => c,
            None => {
                monomial = monomial.mul(&Monomial::power(Expr::Constant(scale), k.clone()));
                Rational::one()
            }
        };
        if !num_rest.is_one() {
            monomial = monomial.mul(&Monomial::power(poly_to_expr(&num_rest), k.clone()));
        }
        if !den_rest.is_one() {
            monomial = monomial.mul(&Monomial::power(poly_to_expr(&den_rest), -k.clone()));
        }
        self.tidy(Polynomial::term(monomial, coeff), Polynomial::one())
    }

    /// `f(-u) = -f(u)`; the argument is stored with a positive leading coefficient.
    fn odd_call(&mut self, arg: RationalForm, ctor: fn(Box<Expr>) -> Expr) -> RationalForm {
        if arg.is_zero() {
            return RationalForm::zero();
        }
        let (sign, arg) = if arg.num.is_negative_leading() {
            (-Rational::one(), arg.negate())
        } else {
            (Rational::one(), arg)
        };
        RationalForm::from_atom(ctor(arg.to_expr().boxed()), sign)
    }

    fn exp_of(&mut self, arg: RationalForm) -> RationalForm {
        if arg.is_zero() {
            return RationalForm::one();
        }
        // exp(c * log(u)) = u^c
        if let Some((Expr::Log(inner), c)) = arg.as_scaled_atom() {
            let (inner, c) = ((**inner).clone(), c.clone());
            let base = self.form(&inner);
            return self.constant_power(base, &c);
        }
        RationalForm::from_atom(Expr::Exp(arg.to_expr().boxed()), Rational::one())
    }

    fn log_of(&mut self, arg: RationalForm) -> RationalForm {
        if arg.as_constant().is_some_and(|c| c.is_one()) {
            return RationalForm::zero();
        }
        if let Some(Expr::Exp(inner)) = arg.as_atom() {
            let inner = (**inner).clone();
            return self.form(&inner);
        }
        RationalForm::from_atom(Expr::Log(arg.to_expr().boxed()), Rational::one())
    }

    fn tidy(&mut self, num: Polynomial, den: Polynomial) -> RationalForm {
        let num = self.settle(num);
        let den = self.settle(den);
        let (num, den) = if num.den.is_one() && den.den.is_one() {
            (num.num, den.num)
        } else {
            (num.num * den.den, num.den * den.num)
        };
        reduce(num, den)
    }

    /// Rewrite monomials that are not in normal form: integer powers of constant atoms,
    /// expandable integer powers of sums, and several or powered `exp` atoms.
    fn settle(&mut self, poly: Polynomial) -> RationalForm {
        if poly.terms().all(|(m, _)| self.is_settled(m)) {
            return RationalForm::from_poly(poly);
        }
        let mut total = RationalForm::zero();
        for (monomial, coeff) in poly.terms {
            let term = self.settle_term(&monomial, coeff);
            total = self.add(total, term);
        }
        total
    }

    fn is_settled(&self, monomial: &Monomial) -> bool {
        let mut exps = 0;
        for (atom, exp) in monomial.factors() {
            match atom {
                Expr::Constant(c) if exp.is_integer() => {
                    // powers too large to fold stay as atoms
                    if exp.to_integer().to_i32().and_then(|n| integer_power(c, n)).is_some() {
                        return false;
                    }
                }
                Expr::Exp(_) => {
                    exps += 1;
                    if !exp.is_one() || exps > 1 {
                        return false;
                    }
                }
                _ if self.expands(atom, exp) => return false,
                _ => {}
            }
        }
        true
    }

    fn expands(&self, atom: &Expr, exp: &Rational) -> bool {
        matches!(atom, Expr::Add(..) | Expr::Sub(..))
            && exp.is_integer()
            && exp.abs() <= Rational::from_integer(self.max_expand_power.into())
    }

    fn settle_term(&mut self, monomial: &Monomial, coeff: Rational) -> RationalForm {
        let mut form = RationalForm::constant(coeff);
        let mut rest = Monomial::one();
        let mut exp_args: Vec<(Expr, Rational)> = Vec::new();

        for (atom, exp) in monomial.factors() {
            match atom {
                Expr::Constant(c) if exp.is_integer() => {
                    let folded = exp
                        .to_integer()
                        .to_i32()
                        .and_then(|n| integer_power(c, n));
                    match folded {
                        Some(value) => {
                            form = self.mul(form, RationalForm::constant(value));
                        }
                        None => rest = rest.mul(&Monomial::power(atom.clone(), exp.clone())),
                    }
                }
                Expr::Exp(arg) => exp_args.push(((**arg).clone(), exp.clone())),
                _ if self.expands(atom, exp) => {
                    let base = self.form(atom);
                    let power = self.constant_power(base, exp);
                    form = self.mul(form, power);
                }
                _ => rest = rest.mul(&Monomial::power(atom.clone(), exp.clone())),
            }
        }

        if !exp_args.is_empty() {
            let mut combined = RationalForm::zero();
            for (arg, weight) in exp_args {
                let arg = self.form(&arg);
                let weighted = self.mul(arg, RationalForm::constant(weight));
                combined = self.add(combined, weighted);
            }
            let merged = self.exp_of(combined);
            form = self.mul(form, merged);
        }

        let rest = RationalForm::from_poly(Polynomial::term(rest, Rational::one()));
        self.mul(form, rest)
    }
}

/// Move the denominator's monomial content into the numerator, make the denominator's
/// leading coefficient 1, and collapse proportional numerator and denominator.
fn reduce(num: Polynomial, den: Polynomial) -> RationalForm {
    if num.is_zero() {
        return RationalForm::zero();
    }
    if den.is_zero() {
        return RationalForm { num, den };
    }

    let content = den.content().inverse();
    let mut num = num.mul_monomial(&content);
    let mut den = den.mul_monomial(&content);

    let lead = den.leading_coeff();
    if !lead.is_one() {
        let k = lead.recip();
        num = num.scale(&k);
        den = den.scale(&k);
    }

    if let Some(ratio) = proportion(&num, &den) {
        return RationalForm::constant(ratio);
    }
    RationalForm { num, den }
}

/// `Some(c)` when `num == c * den`.
fn proportion(num: &Polynomial, den: &Polynomial) -> Option<Rational> {
    if num.len() != den.len() {
        return None;
    }
    let (m_num, c_num) = num.terms().next()?;
    let (m_den, c_den) = den.terms().next()?;
    if m_num != m_den {
        return None;
    }
    let ratio = c_num / c_den;
    if *num == den.scale(&ratio) {
        Some(ratio)
    } else {
        None
    }
}

/// Split `p` into `content * scale * rest`, where `rest` has no monomial content and a leading
/// coefficient of `1` or `-1`.
fn split_content(p: &Polynomial) -> (Monomial, Rational, Polynomial) {
    let content = p.content();
    let rest = p.mul_monomial(&content.inverse());
    if let Some(c) = rest.as_constant() {
        return (content, c, Polynomial::one());
    }
    let scale = rest.leading_coeff().abs();
    let rest = rest.scale(&scale.recip());
    (content, scale, rest)
}

fn integer_power(base: &Rational, n: i32) -> Option<Rational> {
    if n.unsigned_abs() > MAX_COEFF_POWER && base.abs() != Rational::one() {
        return None;
    }
    if n < 0 && base.is_zero() {
        return None;
    }
    Some(base.pow(n))
}

/// `c^k` when it is rational.
fn exact_power(c: &Rational, k: &Rational) -> Option<Rational> {
    if c.is_one() {
        return Some(Rational::one());
    }
    let root_degree = k.denom().to_u32()?;
    let power = k.numer().to_i32()?;
    let numer = exact_root(c.numer(), root_degree)?;
    let denom = exact_root(c.denom(), root_degree)?;
    integer_power(&Rational::new(numer, denom), power)
}

fn exact_root(n: &BigInt, degree: u32) -> Option<BigInt> {
    if n.is_negative() && degree % 2 == 0 {
        return None;
    }
    let root = if n.is_negative() {
        -Roots::nth_root(&-n, degree)
    } else {
        Roots::nth_root(n, degree)
    };
    if root.pow(degree) == *n {
        Some(root)
    } else {
        None
    }
}

pub fn poly_to_expr(p: &Polynomial) -> Expr {
    let mut acc: Option<Expr> = None;
    for (monomial, coeff) in p.terms() {
        let term = monomial_to_expr(monomial, &coeff.abs());
        acc = Some(match (acc, coeff.is_negative()) {
            (None, false) => term,
            (None, true) => Expr::Neg(term.boxed()),
            (Some(prev), false) => Expr::Add(prev.boxed(), term.boxed()),
            (Some(prev), true) => Expr::Sub(prev.boxed(), term.boxed()),
        });
    }
    acc.unwrap_or_else(zero)
}

fn monomial_to_expr(monomial: &Monomial, coeff: &Rational) -> Expr {
    let mut factors: Vec<Expr> = Vec::new();
    if !coeff.is_one() || monomial.is_one() {
        factors.push(Expr::Constant(coeff.clone()));
    }
    for (atom, exp) in monomial.factors() {
        if exp.is_one() {
            factors.push(atom.clone());
        } else {
            factors.push(Expr::Pow(
                atom.clone().boxed(),
                Expr::Constant(exp.clone()).boxed(),
            ));
        }
    }
    let mut iter = factors.into_iter();
    let Some(first) = iter.next() else {
        return Expr::Constant(coeff.clone());
    };
    iter.fold(first, |acc, f| Expr::Mul(acc.boxed(), f.boxed()))
}

/// Rational normal form of `expr` with default limits.
pub fn rational_form(expr: &Expr) -> RationalForm {
    Canonicalizer::default().form(expr)
}

/// `expr` rewritten through its rational normal form.
pub fn canonicalize(expr: &Expr) -> Expr {
    rational_form(expr).to_expr()
}

pub fn is_identically_zero(expr: &Expr) -> bool {
    Canonicalizer::default().is_zero(expr)
}

pub fn equivalent(a: &Expr, b: &Expr) -> bool {
    Canonicalizer::default().equivalent(a, b)
}
