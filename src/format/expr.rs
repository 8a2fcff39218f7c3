use crate::expr::{Expr, Node, Op};

/// Fully parenthesized infix rendering.
///
/// Every composite node gets exactly one pair of parentheses, so the output is
/// unambiguous without any precedence rules. `log` is rendered as a call.
pub fn to_infix(expr: &Expr) -> String {
    let mut out = String::new();
    write_infix(&mut out, expr);
    out
}

fn write_infix(out: &mut String, expr: &Expr) {
    match expr.node() {
        Node::Variable(name) => out.push_str(name),
        Node::Constant(value) => out.push_str(&value.to_string()),
        Node::Zero => out.push('0'),
        Node::One => out.push('1'),

        Node::Add(terms) => joined(out, Op::Add, terms),
        Node::Sub(terms) => joined(out, Op::Sub, terms),
        Node::Mul(a, b) => joined(out, Op::Mul, [a, b]),
        Node::Div(a, b) => joined(out, Op::Div, [a, b]),
        Node::Pow(a, b) => joined(out, Op::Pow, [a, b]),

        Node::Log(a) => {
            out.push_str("log(");
            write_infix(out, a);
            out.push(')');
        }
    }
}

fn joined<'a>(out: &mut String, op: Op, terms: impl IntoIterator<Item = &'a Expr>) {
    out.push('(');
    for (i, term) in terms.into_iter().enumerate() {
        if i > 0 {
            out.push_str(op.glue());
        }
        write_infix(out, term);
    }
    out.push(')');
}
