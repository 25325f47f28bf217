use odecheck::{differentiate, equivalent, parse_expr, simplify_fully};

fn assert_diff_eq(var: &str, input: &str, expected: &str) {
    let expr = parse_expr(input).expect("parse input");
    let got = simplify_fully(differentiate(var, &expr));
    let expected_expr = parse_expr(expected).expect("parse expected");
    assert!(equivalent(&got, &expected_expr), "d/d{var} {input}: got {got}, expected {expected}");
}

#[test]
fn basic_vars_and_constants() {
    assert_diff_eq("x", "x", "1");
    assert_diff_eq("x", "y", "0");
    assert_diff_eq("x", "5", "0");
}

#[test]
fn polynomials_and_products() {
    assert_diff_eq("x", "x^3", "3*x^2");
    assert_diff_eq("x", "x*y", "y");
    assert_diff_eq("x", "2*x^2+3*x", "4*x+3");
    assert_diff_eq("y", "x^2*y^3 - x*y", "3*x^2*y^2 - x");
}

#[test]
fn quotients() {
    assert_diff_eq("y", "x/y", "-x/y^2");
    assert_diff_eq("x", "(x+y)/(x-y)", "-2*y/(x-y)^2");
}

#[test]
fn trig_and_exponentials() {
    assert_diff_eq("x", "sin(x)", "cos(x)");
    assert_diff_eq("x", "cos(x)", "-sin(x)");
    assert_diff_eq("x", "tan(x)", "1/cos(x)^2");
    assert_diff_eq("x", "exp(x^2)", "2*x*exp(x^2)");
    assert_diff_eq("y", "sin(x*y)", "x*cos(x*y)");
}

#[test]
fn general_power_rule() {
    assert_diff_eq("x", "x^x", "x^x*(log(x)+1)");
    assert_diff_eq("x", "log(x)", "1/x");
    assert_diff_eq("x", "sqrt(x^2+y^2)", "x/sqrt(x^2+y^2)");
}
