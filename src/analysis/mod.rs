//! The analysis pipeline: normalize, split, build, then test exactness and homogeneity.

mod exactness;
mod homogeneity;

use log::debug;

use crate::equation::{build_equation, normalize_equation, split_equation};
use crate::error::Result;
use crate::expr::{Expr, Rational};
use crate::simplify::{Canonicalizer, DEFAULT_MAX_EXPAND_POWER, DEFAULT_SIMPLIFY_ITERATIONS};

pub use exactness::{Exactness, check_exactness};
pub use homogeneity::{Scaling, check_homogeneity, scaling_degree};

/// Tuning knobs for [`Analyzer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Cap on the fixed-point simplification pass applied to the derivatives.
    pub simplify_iterations: usize,
    /// Largest integer power of a sum that is multiplied out during the identical-zero test.
    pub max_expand_power: u32,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions {
            simplify_iterations: DEFAULT_SIMPLIFY_ITERATIONS,
            max_expand_power: DEFAULT_MAX_EXPAND_POWER,
        }
    }
}

/// What the analyzer found out about `M dx + N dy`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalysisResult {
    pub is_homogeneous: bool,
    /// Present exactly when `is_homogeneous` holds.
    pub degree: Option<Rational>,
    pub is_exact: bool,
    pub m: Expr,
    pub n: Expr,
    pub dm_dy: Expr,
    pub dn_dx: Expr,
}

impl AnalysisResult {
    /// `Homogeneous`, `Degree` and `Exact` lines, as shown by the front end.
    pub fn summary(&self) -> String {
        crate::format::pretty_analysis(self).join("\n")
    }
}

/// Stateless entry point; one [`Analyzer`] may serve any number of calls.
#[derive(Clone, Debug, Default)]
pub struct Analyzer {
    options: AnalyzerOptions,
}

impl Analyzer {
    pub fn new(options: AnalyzerOptions) -> Self {
        Analyzer { options }
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let normalized = normalize_equation(text)?;
        debug!("normalized: {normalized}");
        let parts = split_equation(&normalized)?;
        debug!("M part: {}, N part: {}", parts.m, parts.n);
        let equation = build_equation(&parts)?;
        debug!("M = {}, N = {}", equation.m, equation.n);

        let mut canon = Canonicalizer::new(self.options.max_expand_power);

        let exactness = check_exactness(
            &equation.m,
            &equation.n,
            self.options.simplify_iterations,
            &mut canon,
        );
        debug!(
            "dM/dy = {}, dN/dx = {}, exact: {}",
            exactness.dm_dy, exactness.dn_dx, exactness.is_exact
        );

        let degree = check_homogeneity(&equation.m, &equation.n, &mut canon);
        match &degree {
            Some(k) => debug!("homogeneous of degree {k}"),
            None => debug!("not homogeneous"),
        }

        Ok(AnalysisResult {
            is_homogeneous: degree.is_some(),
            degree,
            is_exact: exactness.is_exact,
            m: equation.m,
            n: equation.n,
            dm_dy: exactness.dm_dy,
            dn_dx: exactness.dn_dx,
        })
    }
}

/// Analyze `text` with default options.
pub fn analyze(text: &str) -> Result<AnalysisResult> {
    Analyzer::default().analyze(text)
}
