//! Compiler and stack-machine evaluator for boolean mask expressions such as
//! `(#1 || #2) && !#3`, where `#N` stands for the N-th caller-supplied input.

#![warn(missing_debug_implementations)]
#![deny(missing_docs)]

mod analyze;
mod compile;
mod error;
mod plane;
mod program;
mod scan;
mod token;
mod vm;

pub use analyze::*;
pub use compile::*;
pub use error::*;
pub use plane::*;
pub use program::*;
pub use scan::*;
pub use token::*;
pub use vm::*;
