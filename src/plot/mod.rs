//! Non-interactive terminal plots.

pub mod ascii;

pub use ascii::*;
