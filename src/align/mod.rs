//! Alignment strategy applied when placing content into a column.

mod core;

pub use core::{Alignment, wrap};
