use tracing::trace;

use crate::error::{DiffError, Result};
use crate::expr::{Expr, Node, add, div, log, mul, one, pow, sub, zero};

/// Symbolic derivative of `expr` with respect to the variable named `var`.
///
/// The result is a fresh tree built by the textbook rules; nothing is folded or
/// simplified, so `d/dx (x * y)` comes back as `((1 * y) + (x * 0))`.
pub fn differentiate(expr: &Expr, var: &str) -> Expr {
    trace!(var, %expr, "differentiating");
    Differentiator { var }.derive(expr)
}

/// Like [`differentiate`], taking the variable as an expression.
pub fn diff(expr: &Expr, wrt: &Expr) -> Result<Expr> {
    match wrt.as_variable() {
        Some(var) => Ok(differentiate(expr, var)),
        None => Err(DiffError::invalid_argument(format!(
            "cannot differentiate with respect to non-variable `{wrt}`"
        ))),
    }
}

/// Apply [`differentiate`] `n` times. `n == 0` returns `expr` itself.
pub fn nth_derivative(expr: &Expr, var: &str, n: usize) -> Expr {
    (0..n).fold(expr.clone(), |acc, _| differentiate(&acc, var))
}

struct Differentiator<'a> {
    var: &'a str,
}

impl Differentiator<'_> {
    fn derive(&self, expr: &Expr) -> Expr {
        match expr.node() {
            Node::Variable(name) if name == self.var => one(),
            Node::Variable(_) | Node::Constant(_) | Node::Zero | Node::One => zero(),

            Node::Add(terms) => Expr::from_node(Node::Add(self.derive_all(terms))),
            Node::Sub(terms) => Expr::from_node(Node::Sub(self.derive_all(terms))),
            Node::Mul(a, b) => self.product_rule(a, b),
            Node::Div(n, d) => self.quotient_rule(n, d),
            Node::Pow(base, exp) => self.power_rule(expr, base, exp),
            Node::Log(u) => div(self.derive(u), u),
        }
    }

    fn derive_all(&self, terms: &[Expr]) -> Vec<Expr> {
        terms.iter().map(|term| self.derive(term)).collect()
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        add(mul(self.derive(a), b), mul(a, self.derive(b)))
    }

    fn quotient_rule(&self, numerator: &Expr, denominator: &Expr) -> Expr {
        if numerator.is_constant() {
            let dd = self.derive(denominator);
            sub(zero(), div(mul(dd, numerator), pow(denominator, 2)))
        } else if denominator.is_constant() {
            div(self.derive(numerator), denominator)
        } else {
            let dn = self.derive(numerator);
            let dd = self.derive(denominator);
            div(
                sub(mul(dn, denominator), mul(numerator, dd)),
                pow(denominator, 2),
            )
        }
    }

    // `whole` is the `Pow` node itself, reused as the leading factor.
    fn power_rule(&self, whole: &Expr, base: &Expr, exp: &Expr) -> Expr {
        if base.is_constant() {
            mul(mul(whole, self.derive(exp)), log(base))
        } else if exp.is_constant() {
            div(mul(mul(whole, self.derive(base)), exp), base)
        } else {
            let db = self.derive(base);
            let de = self.derive(exp);
            mul(whole, add(mul(de, log(base)), div(mul(db, exp), base)))
        }
    }
}
