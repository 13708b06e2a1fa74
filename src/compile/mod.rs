//! Layout compiler: drives a document through dialect routing, parsing and
//! dispatch, materializing a container tree.

mod core;

pub use core::{CompileOutput, Compiler, Pass};
