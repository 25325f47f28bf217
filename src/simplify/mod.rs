//! Symbolic simplification, canonical forms, and substitution utilities.

mod canonical;
mod rules;
mod substitute;

pub use canonical::{
    Canonicalizer, DEFAULT_MAX_EXPAND_POWER, RationalForm, canonicalize, equivalent,
    is_identically_zero, poly_to_expr, rational_form,
};
pub use rules::{
    DEFAULT_SIMPLIFY_ITERATIONS, simplify, simplify_add, simplify_fully, simplify_sub,
    simplify_with_limit,
};
pub use substitute::{substitute, substitute_all};
