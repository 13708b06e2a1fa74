//! Built-in content providers invoked through the dispatch registry.
//!
//! Every provider reads through the per-pass data cache, honors the active
//! alignment, and substitutes [`PLACEHOLDER`] when its upstream source
//! is unavailable; a failed fetch never aborts the render.

mod core;

pub use core::{
    PLACEHOLDER, aligned_slot, battery, date, events, forecast, greeting, reminders, space, stat,
    sun, text, weather, weather2, week,
};
