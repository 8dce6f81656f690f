//! Numeric building blocks for scoreline probability models: the Poisson point probability, a
//! dense matrix to hold scoreline grids, and a few probability and I/O utilities.

pub mod file;
pub mod linear;
pub mod poisson;
pub mod probs;
pub mod timed;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
