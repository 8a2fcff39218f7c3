//! Formatting helpers for rendering expressions.

pub mod expr;

pub use expr::to_infix;
