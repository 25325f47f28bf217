use crate::expr::Expr;

/// Substitute variable `var` with `replacement` throughout `expr`.
pub fn substitute(expr: &Expr, var: &str, replacement: &Expr) -> Expr {
    substitute_all(expr, &[(var, replacement.clone())])
}

/// Replace several variables at once. Replacements are not themselves rewritten, so
/// `x -> t*x, y -> t*y` scales both variables exactly once.
pub fn substitute_all(expr: &Expr, bindings: &[(&str, Expr)]) -> Expr {
    match expr {
        Expr::Variable(name) => bindings
            .iter()
            .find(|(var, _)| *var == name.as_str())
            .map(|(_, replacement)| replacement.clone())
            .unwrap_or_else(|| expr.clone()),
        Expr::Constant(_) => expr.clone(),
        Expr::Add(a, b) => Expr::Add(
            substitute_all(a, bindings).boxed(),
            substitute_all(b, bindings).boxed(),
        ),
        Expr::Sub(a, b) => Expr::Sub(
            substitute_all(a, bindings).boxed(),
            substitute_all(b, bindings).boxed(),
        ),
        Expr::Mul(a, b) => Expr::Mul(
            substitute_all(a, bindings).boxed(),
            substitute_all(b, bindings).boxed(),
        ),
        Expr::Div(a, b) => Expr::Div(
            substitute_all(a, bindings).boxed(),
            substitute_all(b, bindings).boxed(),
        ),
        Expr::Pow(a, b) => Expr::Pow(
            substitute_all(a, bindings).boxed(),
            substitute_all(b, bindings).boxed(),
        ),
        Expr::Neg(a) => Expr::Neg(substitute_all(a, bindings).boxed()),
        Expr::Sin(a) => Expr::Sin(substitute_all(a, bindings).boxed()),
        Expr::Cos(a) => Expr::Cos(substitute_all(a, bindings).boxed()),
        Expr::Tan(a) => Expr::Tan(substitute_all(a, bindings).boxed()),
        Expr::Exp(a) => Expr::Exp(substitute_all(a, bindings).boxed()),
        Expr::Log(a) => Expr::Log(substitute_all(a, bindings).boxed()),
    }
}
