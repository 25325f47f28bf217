//! Analyzer for first-order differential equations written as `M(x,y) dx + N(x,y) dy`:
//! reports whether the equation is homogeneous (and of which degree) and whether it is exact.

pub mod analysis;
pub mod calculus;
pub mod equation;
pub mod error;
pub mod expr;
pub mod format;
pub mod parser;
pub mod polynomial;
pub mod simplify;

pub use analysis::{AnalysisResult, Analyzer, AnalyzerOptions, analyze};
pub use calculus::differentiate;
pub use equation::{Equation, EquationParts, normalize_equation, parse_equation, split_equation};
pub use error::{AnalysisError, FormatError, Result};
pub use expr::{Expr, Rational, add, div, mul, neg, one, pow, rational, sub, zero};
pub use format::{pretty, pretty_analysis, pretty_analysis_details};
pub use parser::parse_expr;
pub use simplify::{
    canonicalize, equivalent, is_identically_zero, simplify, simplify_fully, simplify_with_limit,
    substitute,
};
