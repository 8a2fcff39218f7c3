//! Calculus routines.

pub mod differentiate;

pub use differentiate::{diff, differentiate, nth_derivative};
