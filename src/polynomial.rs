//! Sparse multivariate polynomials with rational coefficients.
//!
//! Indeterminates ("atoms") are arbitrary expressions: variables, transcendental calls, or
//! opaque powers. Exponents are rational and may be negative, so a single monomial can stand
//! for `x^(1/2) * y^-1`.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::expr::{Expr, Rational};
use num_traits::{One, Signed, Zero};

/// Product of atoms raised to non-zero rational powers. The empty monomial is `1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial {
    powers: BTreeMap<Expr, Rational>,
}

impl Monomial {
    pub fn one() -> Self {
        Monomial::default()
    }

    pub fn atom(atom: Expr) -> Self {
        Monomial::power(atom, Rational::one())
    }

    pub fn power(atom: Expr, exp: Rational) -> Self {
        let mut powers = BTreeMap::new();
        if !exp.is_zero() {
            powers.insert(atom, exp);
        }
        Monomial { powers }
    }

    pub fn is_one(&self) -> bool {
        self.powers.is_empty()
    }

    pub fn exponent_of(&self, atom: &Expr) -> Rational {
        self.powers.get(atom).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn factors(&self) -> impl Iterator<Item = (&Expr, &Rational)> + '_ {
        self.powers.iter()
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut powers = self.powers.clone();
        for (atom, exp) in &other.powers {
            match powers.entry(atom.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(exp.clone());
                }
                Entry::Occupied(mut entry) => {
                    *entry.get_mut() += exp;
                    if entry.get().is_zero() {
                        entry.remove();
                    }
                }
            }
        }
        Monomial { powers }
    }

    pub fn pow(&self, k: &Rational) -> Monomial {
        if k.is_zero() {
            return Monomial::one();
        }
        Monomial {
            powers: self
                .powers
                .iter()
                .map(|(atom, exp)| (atom.clone(), exp * k))
                .collect(),
        }
    }

    pub fn inverse(&self) -> Monomial {
        self.pow(&-Rational::one())
    }

    /// Largest monomial dividing both, allowing negative exponents: each atom gets the
    /// smaller of its two exponents, with absent atoms counting as exponent zero.
    pub fn gcd(&self, other: &Monomial) -> Monomial {
        let mut powers = BTreeMap::new();
        for atom in self.powers.keys().chain(other.powers.keys()) {
            let a = self.exponent_of(atom);
            let b = other.exponent_of(atom);
            let low = if a < b { a } else { b };
            if !low.is_zero() {
                powers.insert(atom.clone(), low);
            }
        }
        Monomial { powers }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    pub(crate) terms: BTreeMap<Monomial, Rational>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Polynomial::default()
    }

    pub fn one() -> Self {
        Polynomial::constant(Rational::one())
    }

    pub fn constant(c: Rational) -> Self {
        Polynomial::term(Monomial::one(), c)
    }

    pub fn term(monomial: Monomial, coeff: Rational) -> Self {
        let mut terms = BTreeMap::new();
        if !coeff.is_zero() {
            terms.insert(monomial, coeff);
        }
        Polynomial { terms }
    }

    pub fn atom(atom: Expr) -> Self {
        Polynomial::term(Monomial::atom(atom), Rational::one())
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.as_constant().is_some_and(|c| c.is_one())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial, &Rational)> + '_ {
        self.terms.iter()
    }

    /// The value when the polynomial has no non-constant term.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.terms.len() {
            0 => Some(Rational::zero()),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    pub fn as_single_term(&self) -> Option<(&Monomial, &Rational)> {
        if self.terms.len() == 1 {
            self.terms.iter().next()
        } else {
            None
        }
    }

    /// Coefficient of the first term in monomial order.
    pub fn leading_coeff(&self) -> Rational {
        self.terms
            .values()
            .next()
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    /// Common monomial factor of all terms.
    pub fn content(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        iter.fold(first.clone(), |acc, m| acc.gcd(m))
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Polynomial::zero();
        }
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), c * k))
                .collect(),
        }
    }

    pub fn mul_monomial(&self, monomial: &Monomial) -> Self {
        Polynomial {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.mul(monomial), c.clone()))
                .collect(),
        }
    }

    pub fn pow(&self, exp: usize) -> Self {
        if exp == 0 {
            return Polynomial::one();
        }
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * base.clone();
            }
            n /= 2;
            if n > 0 {
                base = base.clone() * base;
            }
        }
        result
    }

    pub fn is_negative_leading(&self) -> bool {
        self.leading_coeff().is_negative()
    }

    fn add_term(&mut self, monomial: Monomial, coeff: Rational) {
        match self.terms.entry(monomial) {
            Entry::Vacant(entry) => {
                if !coeff.is_zero() {
                    entry.insert(coeff);
                }
            }
            Entry::Occupied(mut entry) => {
                *entry.get_mut() += coeff;
                if entry.get().is_zero() {
                    entry.remove();
                }
            }
        }
    }
}

impl std::ops::Add for Polynomial {
    type Output = Polynomial;
    fn add(self, rhs: Polynomial) -> Polynomial {
        let mut out = self;
        for (m, c) in rhs.terms {
            out.add_term(m, c);
        }
        out
    }
}

impl std::ops::Neg for Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        Polynomial {
            terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect(),
        }
    }
}

impl std::ops::Sub for Polynomial {
    type Output = Polynomial;
    fn sub(self, rhs: Polynomial) -> Polynomial {
        self + (-rhs)
    }
}

impl std::ops::Mul for Polynomial {
    type Output = Polynomial;
    fn mul(self, rhs: Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                out.add_term(ma.mul(mb), ca * cb);
            }
        }
        out
    }
}
