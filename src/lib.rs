//! Symbolic differentiation of scalar expression trees.
//!
//! Trees are built from variables, literal constants and the operators add,
//! subtract, multiply, divide, power and natural log. [`differentiate`] produces
//! the exact derivative as a new tree, and [`make_gradient`] turns a
//! tree-building closure into a numeric partial derivative that is evaluated by
//! walking the derivative tree directly.
//!
//! ```
//! use symdiff::{differentiate, variable};
//!
//! # fn main() -> symdiff::Result<()> {
//! let x = variable("x")?;
//! let y = variable("y")?;
//! let f = &x - y.clone().pow(&x);
//! let df_dx = differentiate(&f, "x");
//! assert_eq!(
//!     df_dx.to_string(),
//!     "(1 - ((y ** x) * ((1 * log(y)) + ((0 * x) / y))))"
//! );
//! # Ok(())
//! # }
//! ```

pub mod calculus;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;

pub use calculus::{diff, differentiate, nth_derivative};
pub use error::{DiffError, Result};
pub use eval::{
    Bindings, DomainPolicy, Evaluator, Gradient, GradientBuilder, evaluate, make_gradient,
};
pub use expr::{
    Expr, Node, Op, add, add_all, constant, div, log, mul, one, pow, sub, sub_all, variable, zero,
};
pub use format::to_infix;
