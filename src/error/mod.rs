//! Error module orchestrator.
//!
//! Downstream code imports the crate error surface from here while the
//! definitions live in the private `types` module.

mod types;

pub use types::{PanelError, Result};
