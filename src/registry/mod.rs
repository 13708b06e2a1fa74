//! Function dispatch: built-in table plus caller overrides.

mod core;

pub use core::{Builtin, DispatchRegistry, OverrideFn};
