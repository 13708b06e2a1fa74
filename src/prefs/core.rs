use serde::{Deserialize, Serialize};

use crate::error::{PanelError, Result};

/// Temperature unit content providers format with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalePrefs {
    /// chrono format string for the `date` function.
    pub date_format: String,
    /// chrono format string for times (events, sunrise/sunset).
    pub time_format: String,
}

impl Default for LocalePrefs {
    fn default() -> Self {
        Self {
            date_format: "%A, %B %e".to_string(),
            time_format: "%H:%M".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitPrefs {
    pub temperature: TemperatureUnit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPrefs {
    /// Content line budget in display cells before truncation.
    pub max_line_cells: usize,
    pub event_count: usize,
    pub task_count: usize,
    pub forecast_days: usize,
}

impl Default for PanelPrefs {
    fn default() -> Self {
        Self {
            max_line_cells: 32,
            event_count: 5,
            task_count: 5,
            forecast_days: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelPrefs {
    /// Morning, afternoon, evening, night, in that order.
    pub greetings: Vec<String>,
    pub week: String,
    pub sunrise: String,
    pub sunset: String,
}

impl Default for LabelPrefs {
    fn default() -> Self {
        Self {
            greetings: vec![
                "Good morning".to_string(),
                "Good afternoon".to_string(),
                "Good evening".to_string(),
                "Good night".to_string(),
            ],
            week: "Week".to_string(),
            sunrise: "Sunrise".to_string(),
            sunset: "Sunset".to_string(),
        }
    }
}

/// Typed, nested preference store consumed by content providers.
///
/// Every field has a default, so a missing file, a partial file and an empty
/// `{}` all yield a working configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub locale: LocalePrefs,
    pub units: UnitPrefs,
    pub panel: PanelPrefs,
    pub labels: LabelPrefs,
}

impl Preferences {
    /// Read a preference file from disk, accepting either the JSON format
    /// or the historical flat `key=value` format.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        if raw.trim_start().starts_with('{') {
            Self::from_json(&raw)
        } else {
            Ok(Self::from_legacy_flat(&raw))
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| PanelError::Prefs(err.to_string()))
    }

    /// Migrate the historical flat `key=value` preference file.
    ///
    /// Lines starting with `#` are comments. Unknown keys and unparseable
    /// values fall back to the field default rather than failing, matching
    /// how devices tolerated hand-edited files.
    pub fn from_legacy_flat(raw: &str) -> Self {
        let mut prefs = Self::default();
        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            prefs.apply_legacy(key.trim(), value.trim());
        }
        prefs
    }

    fn apply_legacy(&mut self, key: &str, value: &str) {
        match key {
            "dateFormat" => self.locale.date_format = value.to_string(),
            "timeFormat" => self.locale.time_format = value.to_string(),
            "tempUnit" => {
                self.units.temperature = match value {
                    "F" | "f" | "fahrenheit" => TemperatureUnit::Fahrenheit,
                    _ => TemperatureUnit::Celsius,
                }
            }
            "maxLineChars" => {
                if let Ok(cells) = value.parse() {
                    self.panel.max_line_cells = cells;
                }
            }
            "eventCount" => {
                if let Ok(count) = value.parse() {
                    self.panel.event_count = count;
                }
            }
            "taskCount" => {
                if let Ok(count) = value.parse() {
                    self.panel.task_count = count;
                }
            }
            "forecastDays" => {
                if let Ok(days) = value.parse() {
                    self.panel.forecast_days = days;
                }
            }
            "greetings" => {
                let words: Vec<String> = value
                    .split(',')
                    .map(|w| w.trim().to_string())
                    .filter(|w| !w.is_empty())
                    .collect();
                if !words.is_empty() {
                    self.labels.greetings = words;
                }
            }
            "weekLabel" => self.labels.week = value.to_string(),
            "sunriseLabel" => self.labels.sunrise = value.to_string(),
            "sunsetLabel" => self.labels.sunset = value.to_string(),
            _ => {}
        }
    }
}

/// Per-field metadata for preference editors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMeta {
    /// Dotted path into [`Preferences`].
    pub key: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
}

const FIELD_CATALOG: &[FieldMeta] = &[
    FieldMeta {
        key: "locale.date_format",
        label: "Date format",
        hint: "chrono strftime pattern, e.g. %A, %B %e",
    },
    FieldMeta {
        key: "locale.time_format",
        label: "Time format",
        hint: "chrono strftime pattern, e.g. %H:%M",
    },
    FieldMeta {
        key: "units.temperature",
        label: "Temperature unit",
        hint: "celsius or fahrenheit",
    },
    FieldMeta {
        key: "panel.max_line_cells",
        label: "Line width",
        hint: "content truncation budget in display cells",
    },
    FieldMeta {
        key: "panel.event_count",
        label: "Events shown",
        hint: "default count for the events function",
    },
    FieldMeta {
        key: "panel.task_count",
        label: "Reminders shown",
        hint: "default count for the reminders function",
    },
    FieldMeta {
        key: "panel.forecast_days",
        label: "Forecast days",
        hint: "default span for the forecast function",
    },
    FieldMeta {
        key: "labels.greetings",
        label: "Greetings",
        hint: "morning, afternoon, evening, night",
    },
    FieldMeta {
        key: "labels.week",
        label: "Week label",
        hint: "prefix for the ISO week number",
    },
    FieldMeta {
        key: "labels.sunrise",
        label: "Sunrise label",
        hint: "prefix for the sunrise time",
    },
    FieldMeta {
        key: "labels.sunset",
        label: "Sunset label",
        hint: "prefix for the sunset time",
    },
];

/// Metadata for every editable preference field.
pub fn field_catalog() -> &'static [FieldMeta] {
    FIELD_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let prefs = Preferences::from_json("{}").unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.panel.event_count, 5);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let prefs =
            Preferences::from_json(r#"{"units": {"temperature": "fahrenheit"}}"#).unwrap();
        assert_eq!(prefs.units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.locale, LocalePrefs::default());
    }

    #[test]
    fn invalid_json_is_a_prefs_error() {
        assert!(Preferences::from_json("not json").is_err());
    }

    #[test]
    fn legacy_flat_file_migrates() {
        let prefs = Preferences::from_legacy_flat(
            "# device prefs\n\
             tempUnit=F\n\
             eventCount=3\n\
             weekLabel=KW\n\
             greetings=Moin, Tach, Nabend, Nacht\n\
             unknownKey=whatever\n\
             forecastDays=oops\n",
        );
        assert_eq!(prefs.units.temperature, TemperatureUnit::Fahrenheit);
        assert_eq!(prefs.panel.event_count, 3);
        assert_eq!(prefs.labels.week, "KW");
        assert_eq!(prefs.labels.greetings[1], "Tach");
        // Unparseable value keeps the default.
        assert_eq!(prefs.panel.forecast_days, 3);
    }

    #[test]
    fn load_detects_the_file_format() {
        let dir = std::env::temp_dir();
        let json_path = dir.join("glance_prefs_test.json");
        std::fs::write(&json_path, r#"{"panel": {"task_count": 2}}"#).unwrap();
        let prefs = Preferences::load(&json_path).unwrap();
        assert_eq!(prefs.panel.task_count, 2);

        let flat_path = dir.join("glance_prefs_test.conf");
        std::fs::write(&flat_path, "taskCount=7\n").unwrap();
        let prefs = Preferences::load(&flat_path).unwrap();
        assert_eq!(prefs.panel.task_count, 7);

        assert!(Preferences::load(dir.join("glance_prefs_missing")).is_err());
    }

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<_> = field_catalog().iter().map(|f| f.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), field_catalog().len());
    }
}
