//! Direct numeric evaluation of expression trees.

mod gradient;

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::marker::PhantomData;

use num_traits::{Float, NumCast};
use tracing::debug;

use crate::error::{DiffError, Result};
use crate::expr::{Expr, Node};

pub use gradient::{Gradient, GradientBuilder, make_gradient};

/// Source of numeric values for the variables of a tree.
pub trait Bindings<T> {
    fn value_of(&self, name: &str) -> Option<T>;
}

impl<T: Copy, S: BuildHasher> Bindings<T> for HashMap<String, T, S> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy, S: BuildHasher> Bindings<T> for HashMap<&str, T, S> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy> Bindings<T> for BTreeMap<String, T> {
    fn value_of(&self, name: &str) -> Option<T> {
        self.get(name).copied()
    }
}

impl<T: Copy> Bindings<T> for [(&str, T)] {
    fn value_of(&self, name: &str) -> Option<T> {
        self.iter()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| *value)
    }
}

impl<T: Copy, const N: usize> Bindings<T> for [(&str, T); N] {
    fn value_of(&self, name: &str) -> Option<T> {
        self.as_slice().value_of(name)
    }
}

/// What to do when evaluation hits a mathematically undefined operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPolicy {
    /// Let IEEE semantics decide (infinities and NaN flow out).
    #[default]
    Propagate,
    /// Reject division by zero, log of a non-positive number, `0 ** negative`
    /// and a negative base with a non-integer exponent.
    Strict,
}

/// Recursive interpreter over a tree.
pub struct Evaluator<'a, T, B: ?Sized> {
    bindings: &'a B,
    policy: DomainPolicy,
    _value: PhantomData<T>,
}

impl<'a, T, B> Evaluator<'a, T, B>
where
    T: Float,
    B: Bindings<T> + ?Sized,
{
    pub fn new(bindings: &'a B) -> Self {
        Evaluator {
            bindings,
            policy: DomainPolicy::default(),
            _value: PhantomData,
        }
    }

    pub fn with_policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn eval(&self, expr: &Expr) -> Result<T> {
        match expr.node() {
            Node::Variable(name) => self.bindings.value_of(name).ok_or_else(|| {
                DiffError::invalid_argument(format!("no value bound to variable `{name}`"))
            }),
            Node::Constant(value) => <T as NumCast>::from(*value).ok_or_else(|| {
                DiffError::invalid_argument(format!("constant {value} is not representable"))
            }),
            Node::Zero => Ok(T::zero()),
            Node::One => Ok(T::one()),

            Node::Add(terms) => terms
                .iter()
                .try_fold(T::zero(), |acc, term| self.eval(term).map(|v| acc + v)),
            // A single operand evaluates to itself; more operands fold left.
            Node::Sub(terms) => {
                let mut values = terms.iter().map(|term| self.eval(term));
                match values.next() {
                    Some(first) => values.try_fold(first?, |acc, v| v.map(|v| acc - v)),
                    None => Ok(T::zero()),
                }
            }
            Node::Mul(a, b) => Ok(self.eval(a)? * self.eval(b)?),
            Node::Div(a, b) => self.divide(self.eval(a)?, self.eval(b)?),
            Node::Pow(a, b) => self.power(self.eval(a)?, self.eval(b)?),
            Node::Log(a) => self.logarithm(self.eval(a)?),
        }
    }

    fn divide(&self, numerator: T, denominator: T) -> Result<T> {
        if self.policy == DomainPolicy::Strict && denominator.is_zero() {
            return Err(self.reject("division by zero"));
        }
        Ok(numerator / denominator)
    }

    fn power(&self, base: T, exponent: T) -> Result<T> {
        if self.policy == DomainPolicy::Strict {
            if base.is_zero() && exponent < T::zero() {
                return Err(self.reject("zero raised to a negative power"));
            }
            if base < T::zero() && exponent.fract() != T::zero() {
                return Err(self.reject("negative base raised to a non-integer power"));
            }
        }
        Ok(base.powf(exponent))
    }

    fn logarithm(&self, value: T) -> Result<T> {
        if self.policy == DomainPolicy::Strict && value <= T::zero() {
            return Err(self.reject("logarithm of a non-positive value"));
        }
        Ok(value.ln())
    }

    fn reject(&self, what: &str) -> DiffError {
        debug!(what, "rejected undefined operation");
        DiffError::domain(what)
    }
}

/// Evaluate `expr` with IEEE semantics for undefined operations.
pub fn evaluate<B>(expr: &Expr, bindings: &B) -> Result<f64>
where
    B: Bindings<f64> + ?Sized,
{
    Evaluator::new(bindings).eval(expr)
}
