use std::collections::HashMap;

use crate::align::Alignment;
use crate::compile::Pass;
use crate::content;
use crate::error::Result;
use crate::logging::{LogLevel, event_with_fields, json_str};
use crate::parse::Param;

const TARGET: &str = "glance::dispatch";

/// Caller-supplied replacement for (or addition to) a built-in function.
///
/// Overrides receive the live pass; `Pass::column` yields the column under
/// the cursor and `content::aligned_slot` applies the active alignment the
/// same way built-ins do.
pub type OverrideFn = Box<dyn Fn(&mut Pass<'_>, Option<&Param>) -> Result<()> + Send + Sync>;

/// Functions every layout document can call without registration.
///
/// Structural and alignment keywords go through the same table as content:
/// `row` and `column` mutate the cursors, `left`/`right`/`center` mutate the
/// alignment state, everything else places content into the current column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Row,
    Column,
    Left,
    Right,
    Center,
    Space,
    Date,
    Week,
    Greeting,
    Events,
    Reminders,
    Weather,
    Weather2,
    Forecast,
    Battery,
    Sun,
    Text,
    Stat,
}

impl Builtin {
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "row" => Builtin::Row,
            "column" => Builtin::Column,
            "left" => Builtin::Left,
            "right" => Builtin::Right,
            "center" => Builtin::Center,
            "space" => Builtin::Space,
            "date" => Builtin::Date,
            "week" => Builtin::Week,
            "greeting" => Builtin::Greeting,
            "events" => Builtin::Events,
            "reminders" => Builtin::Reminders,
            "weather" => Builtin::Weather,
            "weather2" => Builtin::Weather2,
            "forecast" => Builtin::Forecast,
            "battery" => Builtin::Battery,
            "sun" => Builtin::Sun,
            "text" => Builtin::Text,
            "stat" => Builtin::Stat,
            _ => return None,
        })
    }
}

/// Name-to-function table: caller overrides layered over the built-ins,
/// overrides checked first. Immutable for the duration of a pass.
#[derive(Default)]
pub struct DispatchRegistry {
    overrides: HashMap<String, OverrideFn>,
}

impl DispatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut Pass<'_>, Option<&Param>) -> Result<()> + Send + Sync + 'static,
    {
        self.overrides.insert(name.into(), Box::new(handler));
    }

    /// Whether `name` would dispatch to anything. The ASCII-table scanner
    /// uses this to tell content cells apart from widths and fill.
    pub fn resolves(&self, name: &str) -> bool {
        self.overrides.contains_key(name) || Builtin::lookup(name).is_some()
    }

    /// Resolve and invoke `name`. Returns `false` (and does nothing) when
    /// the name resolves to neither an override nor a built-in; stray
    /// tokens in a layout must not break the render.
    pub fn dispatch(
        &self,
        pass: &mut Pass<'_>,
        name: &str,
        param: Option<&Param>,
    ) -> Result<bool> {
        if let Some(handler) = self.overrides.get(name) {
            pass.metrics.record_dispatch(true);
            handler(pass, param)?;
            return Ok(true);
        }

        let Some(builtin) = Builtin::lookup(name) else {
            pass.metrics.record_dispatch(false);
            if let Some(logger) = pass.logger {
                let _ = logger.log_event(event_with_fields(
                    LogLevel::Debug,
                    TARGET,
                    "unresolved_name",
                    [json_str("name", name)],
                ));
            }
            return Ok(false);
        };

        pass.metrics.record_dispatch(true);
        match builtin {
            Builtin::Row => pass.begin_row(param.and_then(Param::as_size)),
            Builtin::Column => pass.begin_column(param.and_then(Param::as_size))?,
            Builtin::Left => pass.ctx.alignment = Alignment::Left,
            Builtin::Right => pass.ctx.alignment = Alignment::Right,
            Builtin::Center => pass.ctx.alignment = Alignment::Center,
            Builtin::Space => content::space(pass, param)?,
            Builtin::Date => content::date(pass, param)?,
            Builtin::Week => content::week(pass, param)?,
            Builtin::Greeting => content::greeting(pass, param)?,
            Builtin::Events => content::events(pass, param)?,
            Builtin::Reminders => content::reminders(pass, param)?,
            Builtin::Weather => content::weather(pass, param)?,
            Builtin::Weather2 => content::weather2(pass, param)?,
            Builtin::Forecast => content::forecast(pass, param)?,
            Builtin::Battery => content::battery(pass, param)?,
            Builtin::Sun => content::sun(pass, param)?,
            Builtin::Text => content::text(pass, param)?,
            Builtin::Stat => content::stat(pass, param)?,
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_covers_reserved_names() {
        for name in [
            "row",
            "column",
            "left",
            "right",
            "center",
            "space",
            "date",
            "week",
            "greeting",
            "events",
            "reminders",
            "weather",
            "weather2",
            "forecast",
            "battery",
            "sun",
            "text",
            "stat",
        ] {
            assert!(Builtin::lookup(name).is_some(), "missing builtin {name}");
        }
        assert_eq!(Builtin::lookup("foo"), None);
        assert_eq!(Builtin::lookup("Row"), None);
    }

    #[test]
    fn overrides_resolve_ahead_of_builtins() {
        let mut registry = DispatchRegistry::new();
        assert!(!registry.resolves("steps"));
        registry.register(
            "steps",
            |_pass: &mut Pass<'_>, _param: Option<&Param>| -> Result<()> { Ok(()) },
        );
        assert!(registry.resolves("steps"));
        assert!(registry.resolves("date"));
    }
}
