pub mod cache;
pub mod domain;
pub mod predict;
pub mod print;
pub mod provider;
pub mod rate;
pub mod scoregrid;

#[doc = include_str!("../../README.md")]
#[cfg(doc)]
fn readme() {}
