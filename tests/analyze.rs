use odecheck::{
    AnalysisError, AnalysisResult, Analyzer, AnalyzerOptions, FormatError, analyze,
    normalize_equation, rational,
};

fn analyzed(input: &str) -> AnalysisResult {
    analyze(input).unwrap_or_else(|err| panic!("analyze {input}: {err}"))
}

fn assert_report(input: &str, degree: Option<(i64, i64)>, exact: bool) {
    let result = analyzed(input);
    let expected = degree.map(|(n, d)| rational(n, d));
    assert_eq!(result.degree, expected, "degree of {input}");
    assert_eq!(result.is_homogeneous, expected.is_some(), "homogeneity of {input}");
    assert_eq!(result.is_exact, exact, "exactness of {input}");
}

fn format_error(input: &str) -> FormatError {
    match analyze(input) {
        Err(AnalysisError::Format(err)) => err,
        other => panic!("expected a format error for {input:?}, got {other:?}"),
    }
}

#[test]
fn linear_coefficients_are_homogeneous_and_exact() {
    assert_report("(x+y)dx+(x-y)dy", Some((1, 1)), true);
}

#[test]
fn rotation_form_is_homogeneous_but_not_exact() {
    let result = analyzed("ydx-xdy");
    assert_eq!(result.degree, Some(rational(1, 1)));
    assert!(!result.is_exact);
    assert_eq!(result.m, odecheck::Expr::var("y"));
    assert_eq!(result.n, odecheck::neg(odecheck::Expr::var("x")));
}

#[test]
fn implicit_products_and_zero_rhs() {
    assert_eq!(normalize_equation("2xdx+3ydy=0").unwrap(), "2*x*dx+3*y*dy");
    assert_report("2xdx+3ydy=0", Some((1, 1)), true);
}

#[test]
fn quadratic_forms() {
    assert_report("2xy dx + x^2 dy", Some((2, 1)), true);
    assert_report("(x^2 + y^2) dx - 2xy dy", Some((2, 1)), false);
    assert_report("x**2 dx + y**2 dy = 0", Some((2, 1)), true);
    assert_report("x^2 dx + y dy", None, true);
}

#[test]
fn rational_and_radical_coefficients() {
    assert_report("x/(x+y) dx + y/(x+y) dy", Some((0, 1)), false);
    assert_report("sqrt(x^2+y^2) dx + x dy", Some((1, 1)), false);
    assert_report("sqrt(x) dx + sqrt(y) dy", Some((1, 2)), true);
    assert_report("1/x dx + 1/y dy", Some((-1, 1)), true);
}

#[test]
fn transcendental_coefficients() {
    assert_report("sin(y/x) dx + dy", Some((0, 1)), false);
    assert_report("exp(x) dx + y dy", None, true);
    assert_report("log(x) dx + dy", None, true);
    assert_report("y cos(xy) dx + x cos(xy) dy", None, true);
    assert_report("exp(x)y dx + exp(x) dy", None, true);
}

#[test]
fn zero_coefficient_is_not_homogeneous() {
    assert_report("0dx + x^3dy", None, false);
    assert_report("x dx + 0 dy", None, true);
    assert_report("0dx + 0dy", None, true);
}

#[test]
fn huge_constant_powers_are_analyzed() {
    assert_report("2^2000*x dx + y dy", Some((1, 1)), true);
    assert_report("x dx + 3^1500*y dy", Some((1, 1)), true);
}

#[test]
fn order_and_spacing_do_not_matter() {
    let reference = analyzed("(x+y)dx+(x-y)dy");
    for variant in [
        "(x - y) dy + (x + y) dx",
        "  ( x + y ) dx + ( x - y ) dy = 0 ",
        "(x+y)*dx+(x-y)*dy",
    ] {
        let result = analyzed(variant);
        assert_eq!(result.m, reference.m, "{variant}");
        assert_eq!(result.n, reference.n, "{variant}");
        assert_eq!(result.is_exact, reference.is_exact, "{variant}");
        assert_eq!(result.degree, reference.degree, "{variant}");
    }
}

#[test]
fn normalization_is_idempotent() {
    for input in [
        "2xdx+3ydy=0",
        "(x+y)dx + (x-y)dy",
        "sin(x)cos(y) dx + 3x(y+1) dy",
        "x**2dx - 0.5ydy",
    ] {
        let once = normalize_equation(input).unwrap();
        let twice = normalize_equation(&once).unwrap();
        assert_eq!(once, twice, "{input}");
    }
}

#[test]
fn structural_errors() {
    assert_eq!(format_error(""), FormatError::Empty);
    assert_eq!(format_error("   "), FormatError::Empty);
    assert_eq!(format_error("x + y"), FormatError::MissingMarker);
    assert_eq!(format_error("(x+y)dx"), FormatError::MissingMarker);
    assert_eq!(format_error("x dx + y dy + 1"), FormatError::Shape);
    assert_eq!(format_error("x dx + y dx + x dy"), FormatError::Shape);
}

#[test]
fn malformed_expressions_are_parse_errors() {
    let err = analyze("((x+y)dx + y dy").unwrap_err();
    assert!(err.is_parse(), "{err}");
    assert!(err.to_string().starts_with("cannot parse expression"));

    let err = analyze("z dx + y dy").unwrap_err();
    assert!(err.is_parse(), "{err}");
    assert!(err.to_string().contains("unknown symbol `z`"));
}

#[test]
fn summary_lines() {
    assert_eq!(analyzed("(x+y)dx+(x-y)dy").summary(), "Homogeneous: Yes\nDegree: 1\nExact: Yes");
    assert_eq!(analyzed("x^2 dx + y dy").summary(), "Homogeneous: No\nDegree: N/A\nExact: Yes");
    assert_eq!(
        analyzed("sqrt(x) dx + sqrt(y) dy").summary(),
        "Homogeneous: Yes\nDegree: 1/2\nExact: Yes"
    );
}

#[test]
fn options_are_respected() {
    let analyzer = Analyzer::new(AnalyzerOptions {
        simplify_iterations: 4,
        max_expand_power: 2,
    });
    assert_eq!(analyzer.options().max_expand_power, 2);
    let result = analyzer.analyze("(x+y)^3 dx + (x+y)^3 dy").unwrap();
    assert_eq!(result.degree, Some(rational(3, 1)));
    assert!(result.is_exact);
}
