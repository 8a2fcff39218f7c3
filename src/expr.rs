//! Expression tree definitions and builders.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::sync::{Arc, OnceLock};

use crate::error::{DiffError, Result};

/// Operator kinds a composite node can carry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Log,
}

impl Op {
    /// Text placed between operands when the node is rendered infix.
    pub fn glue(self) -> &'static str {
        match self {
            Op::Add => " + ",
            Op::Sub => " - ",
            Op::Mul => " * ",
            Op::Div => " / ",
            Op::Pow => " ** ",
            Op::Log => "",
        }
    }

    fn expected_arity(self) -> &'static str {
        match self {
            Op::Add | Op::Sub => "at least 1",
            Op::Mul | Op::Div | Op::Pow => "exactly 2",
            Op::Log => "exactly 1",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Op::Add => "Add",
            Op::Sub => "Sub",
            Op::Mul => "Mul",
            Op::Div => "Div",
            Op::Pow => "Pow",
            Op::Log => "Log",
        };
        f.write_str(name)
    }
}

/// A single tree node. Obtained through [`Expr::node`]; new trees are built with
/// the builder functions in this module so operand counts always hold.
#[derive(Clone, PartialEq, Debug)]
pub enum Node {
    Variable(String),
    Constant(f64),
    Zero,
    One,
    Add(Vec<Expr>),
    Sub(Vec<Expr>),
    Mul(Expr, Expr),
    Div(Expr, Expr),
    Pow(Expr, Expr),
    Log(Expr),
}

/// Immutable, shareable handle to an expression tree.
///
/// Cloning is a reference-count bump; subtrees are shared, never mutated.
#[derive(Clone)]
pub struct Expr(Arc<Node>);

static ZERO: OnceLock<Expr> = OnceLock::new();
static ONE: OnceLock<Expr> = OnceLock::new();

/// The interned exact zero. Every call returns the same allocation.
pub fn zero() -> Expr {
    ZERO.get_or_init(|| Expr::from_node(Node::Zero)).clone()
}

/// The interned exact one. Every call returns the same allocation.
pub fn one() -> Expr {
    ONE.get_or_init(|| Expr::from_node(Node::One)).clone()
}

impl Expr {
    pub(crate) fn from_node(node: Node) -> Self {
        Expr(Arc::new(node))
    }

    /// Literal constant leaf.
    pub fn number(value: f64) -> Self {
        Expr::from_node(Node::Constant(value))
    }

    /// Build a composite node from an operand list, checking the operand count.
    pub fn from_operands(op: Op, operands: Vec<Expr>) -> Result<Self> {
        let node = match (op, operands.as_slice()) {
            (Op::Add, [_, ..]) => Node::Add(operands.clone()),
            (Op::Sub, [_, ..]) => Node::Sub(operands.clone()),
            (Op::Mul, [a, b]) => Node::Mul(a.clone(), b.clone()),
            (Op::Div, [a, b]) => Node::Div(a.clone(), b.clone()),
            (Op::Pow, [a, b]) => Node::Pow(a.clone(), b.clone()),
            (Op::Log, [a]) => Node::Log(a.clone()),
            _ => {
                return Err(DiffError::InvalidArity {
                    op,
                    expected: op.expected_arity(),
                    got: operands.len(),
                });
            }
        };
        Ok(Expr::from_node(node))
    }

    pub fn node(&self) -> &Node {
        &self.0
    }

    /// True when both handles point at the same allocation.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub fn op(&self) -> Option<Op> {
        match self.node() {
            Node::Add(_) => Some(Op::Add),
            Node::Sub(_) => Some(Op::Sub),
            Node::Mul(..) => Some(Op::Mul),
            Node::Div(..) => Some(Op::Div),
            Node::Pow(..) => Some(Op::Pow),
            Node::Log(_) => Some(Op::Log),
            Node::Variable(_) | Node::Constant(_) | Node::Zero | Node::One => None,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        if let Node::Variable(name) = self.node() {
            Some(name)
        } else {
            None
        }
    }

    /// Numeric value of a literal leaf (`Constant`, `Zero` or `One`).
    pub fn as_number(&self) -> Option<f64> {
        match self.node() {
            Node::Constant(value) => Some(*value),
            Node::Zero => Some(0.0),
            Node::One => Some(1.0),
            _ => None,
        }
    }

    /// True only for a literal `Constant` leaf; the interned `Zero`/`One` are
    /// symbolic leaves and do not count.
    pub fn is_constant(&self) -> bool {
        matches!(self.node(), Node::Constant(_))
    }

    pub fn is_leaf(&self) -> bool {
        self.op().is_none()
    }

    pub fn pow(self, exponent: impl Into<Expr>) -> Expr {
        pow(self, exponent)
    }

    pub fn ln(self) -> Expr {
        log(self)
    }

    pub fn derivative(&self, var: &str) -> Expr {
        crate::calculus::differentiate(self, var)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Expr::ptr_eq(self, other) || self.0 == other.0
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::to_infix(self))
    }
}

/// Named symbolic variable. The name must be non-empty and must not read as a
/// number, so a variable never prints like a constant.
pub fn variable(name: &str) -> Result<Expr> {
    validate_name(name)?;
    Ok(Expr::from_node(Node::Variable(name.to_owned())))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(DiffError::invalid_argument("variable name must not be empty"));
    }
    if name.parse::<f64>().is_ok() {
        return Err(DiffError::invalid_argument(format!(
            "variable name `{name}` reads as a number"
        )));
    }
    Ok(())
}

/// Coerce a literal into a constant leaf; an existing expression passes through.
pub fn constant(value: impl Into<Expr>) -> Expr {
    value.into()
}

pub fn add(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Add(vec![a.into(), b.into()]))
}

pub fn sub(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Sub(vec![a.into(), b.into()]))
}

pub fn mul(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Mul(a.into(), b.into()))
}

pub fn div(a: impl Into<Expr>, b: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Div(a.into(), b.into()))
}

pub fn pow(base: impl Into<Expr>, exponent: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Pow(base.into(), exponent.into()))
}

/// Natural logarithm.
pub fn log(a: impl Into<Expr>) -> Expr {
    Expr::from_node(Node::Log(a.into()))
}

pub fn add_all<I>(terms: I) -> Result<Expr>
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::from_operands(Op::Add, terms.into_iter().map(Into::into).collect())
}

pub fn sub_all<I>(terms: I) -> Result<Expr>
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    Expr::from_operands(Op::Sub, terms.into_iter().map(Into::into).collect())
}

impl From<&Expr> for Expr {
    fn from(expr: &Expr) -> Self {
        expr.clone()
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::number(value)
    }
}

impl From<f32> for Expr {
    fn from(value: f32) -> Self {
        Expr::number(value.into())
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::number(value.into())
    }
}

impl From<u32> for Expr {
    fn from(value: u32) -> Self {
        Expr::number(value.into())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::number(value as f64)
    }
}

macro_rules! impl_binary_ops {
    ($lhs:ty, $rhs:ty) => {
        impl Add<$rhs> for $lhs {
            type Output = Expr;
            fn add(self, rhs: $rhs) -> Expr {
                add(self, rhs)
            }
        }
        impl Sub<$rhs> for $lhs {
            type Output = Expr;
            fn sub(self, rhs: $rhs) -> Expr {
                sub(self, rhs)
            }
        }
        impl Mul<$rhs> for $lhs {
            type Output = Expr;
            fn mul(self, rhs: $rhs) -> Expr {
                mul(self, rhs)
            }
        }
        impl Div<$rhs> for $lhs {
            type Output = Expr;
            fn div(self, rhs: $rhs) -> Expr {
                div(self, rhs)
            }
        }
    };
}

impl_binary_ops!(Expr, Expr);
impl_binary_ops!(Expr, &Expr);
impl_binary_ops!(&Expr, Expr);
impl_binary_ops!(&Expr, &Expr);
impl_binary_ops!(Expr, f64);
impl_binary_ops!(&Expr, f64);
impl_binary_ops!(Expr, i32);
impl_binary_ops!(&Expr, i32);

// Literal on the left.
impl_binary_ops!(f64, Expr);
impl_binary_ops!(f64, &Expr);
impl_binary_ops!(i32, Expr);
impl_binary_ops!(i32, &Expr);

// No folding: `-x` stays `0 - x`.
impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        sub(zero(), self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        sub(zero(), self)
    }
}
