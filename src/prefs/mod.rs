//! Typed preference store feeding the content providers.

mod core;

pub use core::{
    FieldMeta, LabelPrefs, LocalePrefs, PanelPrefs, Preferences, TemperatureUnit, UnitPrefs,
    field_catalog,
};
