//! Dialect detection and line routing.

mod core;

pub use core::{Dialect, ROW_KEYWORD, decide, is_border_line};
