//! Line parsers for the two layout dialects.

pub mod call;
pub mod table;

pub use call::{Param, ParsedCall, parse_line};
