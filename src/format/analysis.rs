use crate::analysis::AnalysisResult;
use crate::format::expr::show_rational;

/// Render an `AnalysisResult` into the three report lines.
pub fn pretty_analysis(result: &AnalysisResult) -> Vec<String> {
    let degree = match &result.degree {
        Some(k) => show_rational(k),
        None => "N/A".to_string(),
    };
    vec![
        format!("Homogeneous: {}", yes_no(result.is_homogeneous)),
        format!("Degree: {degree}"),
        format!("Exact: {}", yes_no(result.is_exact)),
    ]
}

/// The report lines followed by the coefficients and cross partials.
pub fn pretty_analysis_details(result: &AnalysisResult) -> Vec<String> {
    let mut lines = pretty_analysis(result);
    lines.push(format!("M = {}", result.m));
    lines.push(format!("N = {}", result.n));
    lines.push(format!("dM/dy = {}", result.dm_dy));
    lines.push(format!("dN/dx = {}", result.dn_dx));
    lines
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}
