//! Input data providers.
//!
//! - `seed`: the built-in observation table used when no CSV is supplied

pub mod seed;

pub use seed::*;
