use num_traits::Float;
use tracing::debug;

use super::{Bindings, DomainPolicy, Evaluator};
use crate::calculus::differentiate;
use crate::error::{DiffError, Result};
use crate::expr::{Expr, variable};

const DEFAULT_PLACEHOLDER_PREFIX: &str = "arg";

/// Numeric partial derivative of a symbolic function.
///
/// Built once from the function; each call interprets the stored derivative
/// tree against the given arguments.
#[derive(Clone, Debug)]
pub struct Gradient {
    placeholders: Vec<String>,
    arg_index: usize,
    function: Expr,
    derivative: Expr,
    policy: DomainPolicy,
}

/// Configures and builds a [`Gradient`].
///
/// ```
/// use symdiff::{DomainPolicy, GradientBuilder};
///
/// # fn main() -> symdiff::Result<()> {
/// let g = GradientBuilder::new(2)
///     .arg_index(1)
///     .domain_policy(DomainPolicy::Strict)
///     .build(|args| &args[0] - args[1].clone().pow(&args[0]))?;
/// assert_eq!(g.call(&[1.0, 2.0])?, -1.0);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct GradientBuilder {
    arity: usize,
    arg_index: usize,
    placeholder_prefix: String,
    policy: DomainPolicy,
}

impl GradientBuilder {
    pub fn new(arity: usize) -> Self {
        GradientBuilder {
            arity,
            arg_index: 0,
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_owned(),
            policy: DomainPolicy::default(),
        }
    }

    /// Position of the argument to differentiate with respect to.
    pub fn arg_index(mut self, index: usize) -> Self {
        self.arg_index = index;
        self
    }

    /// Placeholder variables are named `{prefix}0`, `{prefix}1`, ...
    pub fn placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    pub fn domain_policy(mut self, policy: DomainPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build<F>(self, f: F) -> Result<Gradient>
    where
        F: FnOnce(&[Expr]) -> Expr,
    {
        if self.arg_index >= self.arity {
            return Err(DiffError::invalid_argument(format!(
                "argument index {} out of range for a function of {} argument(s)",
                self.arg_index, self.arity
            )));
        }

        let placeholders: Vec<String> = (0..self.arity)
            .map(|i| format!("{}{i}", self.placeholder_prefix))
            .collect();
        let args = placeholders
            .iter()
            .map(|name| variable(name))
            .collect::<Result<Vec<_>>>()?;

        let function = f(&args);
        let derivative = differentiate(&function, &placeholders[self.arg_index]);
        debug!(
            arity = self.arity,
            arg_index = self.arg_index,
            %function,
            %derivative,
            "built gradient"
        );

        Ok(Gradient {
            placeholders,
            arg_index: self.arg_index,
            function,
            derivative,
            policy: self.policy,
        })
    }
}

/// Gradient of `f` (a function of `arity` arguments) with respect to argument
/// `arg_index`, with default placeholder names and IEEE domain behaviour.
pub fn make_gradient<F>(arity: usize, f: F, arg_index: usize) -> Result<Gradient>
where
    F: FnOnce(&[Expr]) -> Expr,
{
    GradientBuilder::new(arity).arg_index(arg_index).build(f)
}

impl Gradient {
    pub fn arity(&self) -> usize {
        self.placeholders.len()
    }

    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// The symbolic function, in terms of the placeholders.
    pub fn function(&self) -> &Expr {
        &self.function
    }

    pub fn derivative(&self) -> &Expr {
        &self.derivative
    }

    pub fn call(&self, args: &[f64]) -> Result<f64> {
        self.eval(args)
    }

    pub fn eval<T: Float>(&self, args: &[T]) -> Result<T> {
        if args.len() != self.arity() {
            return Err(DiffError::invalid_argument(format!(
                "gradient expects {} argument(s), got {}",
                self.arity(),
                args.len()
            )));
        }
        let bindings = Positional {
            names: &self.placeholders,
            values: args,
        };
        Evaluator::new(&bindings)
            .with_policy(self.policy)
            .eval(&self.derivative)
    }

    pub fn into_fn(self) -> impl Fn(&[f64]) -> Result<f64> {
        move |args: &[f64]| self.call(args)
    }
}

struct Positional<'a, T> {
    names: &'a [String],
    values: &'a [T],
}

impl<T: Copy> Bindings<T> for Positional<'_, T> {
    fn value_of(&self, name: &str) -> Option<T> {
        let index = self.names.iter().position(|n| n == name)?;
        self.values.get(index).copied()
    }
}
