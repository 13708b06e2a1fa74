use std::fmt::Write as _;

use chrono::{Datelike, Timelike};

use crate::align;
use crate::compile::Pass;
use crate::data::Condition;
use crate::error::Result;
use crate::parse::Param;
use crate::prefs::TemperatureUnit;
use crate::tree::NodeHandle;
use crate::width::clip_to_width;

/// Placeholder shown when an upstream source is unavailable.
pub const PLACEHOLDER: &str = "-";

/// Wrap the current column with the active alignment and return the slot
/// content should be added to. Overrides use this to place output exactly
/// like built-ins do.
pub fn aligned_slot(pass: &mut Pass<'_>) -> Result<NodeHandle> {
    let column = pass.column()?;
    Ok(align::wrap(pass.surface, column, pass.ctx.alignment))
}

pub fn space(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let column = pass.column()?;
    let size = param.and_then(Param::as_size);
    pass.surface.add_spacer(column, size);
    Ok(())
}

pub fn date(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let now = pass.cache.now(pass.data);
    let text = strftime(now.format(&pass.prefs.locale.date_format), PLACEHOLDER);
    pass.surface.add_text(slot, &text);
    Ok(())
}

pub fn week(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let number = pass.cache.now(pass.data).iso_week().week();
    let text = format!("{} {}", pass.prefs.labels.week, number);
    pass.surface.add_text(slot, &text);
    Ok(())
}

pub fn greeting(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let hour = pass.cache.now(pass.data).hour();
    let labels = &pass.prefs.labels.greetings;
    let text = labels
        .get(greeting_index(hour))
        .or_else(|| labels.first())
        .cloned()
        .unwrap_or_default();
    pass.surface.add_text(slot, &text);
    Ok(())
}

pub fn events(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let count = param
        .and_then(Param::as_index)
        .unwrap_or(pass.prefs.panel.event_count);

    match pass.cache.events(pass.data) {
        Some(entries) => {
            for entry in entries.iter().take(count) {
                let time = strftime(
                    entry.start.format(&pass.prefs.locale.time_format),
                    "--:--",
                );
                let line = clip_to_width(
                    &format!("{time} {}", entry.title),
                    pass.prefs.panel.max_line_cells,
                );
                pass.surface.add_text(slot, &line);
            }
        }
        None => fallback(pass, slot, "events"),
    }
    Ok(())
}

pub fn reminders(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let count = param
        .and_then(Param::as_index)
        .unwrap_or(pass.prefs.panel.task_count);

    match pass.cache.tasks(pass.data) {
        Some(tasks) => {
            for task in tasks.iter().take(count) {
                let line = match task.due {
                    Some(due) => {
                        format!("{} · {}", task.title, strftime(due.format("%b %e"), "?"))
                    }
                    None => task.title.clone(),
                };
                let line = clip_to_width(&line, pass.prefs.panel.max_line_cells);
                pass.surface.add_text(slot, &line);
            }
        }
        None => fallback(pass, slot, "reminders"),
    }
    Ok(())
}

pub fn weather(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    match pass.cache.weather(pass.data) {
        Some(report) => {
            pass.surface.add_image(slot, report.condition.icon());
            let line = format!(
                "{} {}",
                format_temp(report.temperature_c, pass.prefs.units.temperature),
                report.condition.label()
            );
            pass.surface.add_text(slot, &line);
        }
        None => {
            pass.surface.add_image(slot, Condition::Unknown.icon());
            fallback(pass, slot, "weather");
        }
    }
    Ok(())
}

/// Tomorrow's outlook: the first forecast day after today, or the first
/// entry when the feed carries no dates beyond today.
pub fn weather2(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let today = pass.cache.now(pass.data).date_naive();
    let outlook = pass.cache.outlook(pass.data);
    let tomorrow = outlook
        .as_ref()
        .and_then(|days| days.iter().find(|d| d.date > today).or_else(|| days.first()))
        .cloned();

    match tomorrow {
        Some(day) => {
            pass.surface.add_image(slot, day.condition.icon());
            let unit = pass.prefs.units.temperature;
            let line = format!(
                "{} / {} {}",
                format_temp(day.low_c, unit),
                format_temp(day.high_c, unit),
                day.condition.label()
            );
            pass.surface.add_text(slot, &line);
        }
        None => {
            pass.surface.add_image(slot, Condition::Unknown.icon());
            fallback(pass, slot, "weather2");
        }
    }
    Ok(())
}

pub fn forecast(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let span = param
        .and_then(Param::as_index)
        .unwrap_or(pass.prefs.panel.forecast_days);

    match pass.cache.outlook(pass.data) {
        Some(days) if !days.is_empty() => {
            let unit = pass.prefs.units.temperature;
            for day in days.iter().take(span) {
                let name = strftime(day.date.format("%a"), "---");
                let line = format!(
                    "{name} {} {}",
                    format_temp(day.low_c, unit),
                    format_temp(day.high_c, unit)
                );
                pass.surface.add_text(slot, &line);
            }
        }
        _ => fallback(pass, slot, "forecast"),
    }
    Ok(())
}

pub fn battery(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    match pass.cache.battery(pass.data) {
        Some(level) => {
            let marker = if level.charging { " +" } else { "" };
            let line = format!("{}%{marker}", level.percent);
            pass.surface.add_text(slot, &line);
        }
        None => fallback(pass, slot, "battery"),
    }
    Ok(())
}

pub fn sun(pass: &mut Pass<'_>, _param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    match pass.cache.sun(pass.data) {
        Some(times) => {
            let fmt = &pass.prefs.locale.time_format;
            let sunrise = strftime(times.sunrise.format(fmt), "--:--");
            let sunset = strftime(times.sunset.format(fmt), "--:--");
            let rise_line = format!("{} {sunrise}", pass.prefs.labels.sunrise);
            let set_line = format!("{} {sunset}", pass.prefs.labels.sunset);
            pass.surface.add_text(slot, &rise_line);
            pass.surface.add_text(slot, &set_line);
        }
        None => fallback(pass, slot, "sun"),
    }
    Ok(())
}

pub fn text(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let value = match param {
        Some(Param::Text(value)) => value.clone(),
        Some(Param::Int(value)) => value.to_string(),
        None => return Ok(()),
    };
    let line = clip_to_width(&value, pass.prefs.panel.max_line_cells);
    pass.surface.add_text(slot, &line);
    Ok(())
}

pub fn stat(pass: &mut Pass<'_>, param: Option<&Param>) -> Result<()> {
    let slot = aligned_slot(pass)?;
    let samples = pass.cache.stats(pass.data);
    let sample = match (samples.as_deref(), param) {
        (Some(samples), Some(Param::Text(label))) => samples
            .iter()
            .find(|s| s.label.eq_ignore_ascii_case(label)),
        (Some(samples), Some(param @ Param::Int(_))) => {
            param.as_index().and_then(|index| samples.get(index))
        }
        (Some(samples), None) => samples.first(),
        (None, _) => None,
    }
    .cloned();

    match sample {
        Some(sample) => {
            pass.surface.add_text(slot, &sample.value);
            pass.surface.add_text(slot, &sample.label);
        }
        None => fallback(pass, slot, "stat"),
    }
    Ok(())
}

fn fallback(pass: &mut Pass<'_>, slot: NodeHandle, what: &str) {
    pass.record_fallback(what);
    pass.surface.add_text(slot, PLACEHOLDER);
}

fn greeting_index(hour: u32) -> usize {
    match hour {
        5..=11 => 0,
        12..=16 => 1,
        17..=21 => 2,
        _ => 3,
    }
}

fn format_temp(celsius: f32, unit: TemperatureUnit) -> String {
    let value = match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };
    format!("{}°", value.round() as i32)
}

/// Render a chrono `DelayedFormat` without panicking on malformed
/// preference patterns; bad patterns yield `fallback`.
fn strftime(formatted: impl std::fmt::Display, fallback: &str) -> String {
    let mut out = String::new();
    if write!(out, "{formatted}").is_ok() {
        out
    } else {
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn greeting_index_buckets_the_day() {
        assert_eq!(greeting_index(5), 0);
        assert_eq!(greeting_index(11), 0);
        assert_eq!(greeting_index(12), 1);
        assert_eq!(greeting_index(16), 1);
        assert_eq!(greeting_index(17), 2);
        assert_eq!(greeting_index(21), 2);
        assert_eq!(greeting_index(22), 3);
        assert_eq!(greeting_index(4), 3);
    }

    #[test]
    fn temperatures_round_per_unit() {
        assert_eq!(format_temp(12.3, TemperatureUnit::Celsius), "12°");
        assert_eq!(format_temp(-0.4, TemperatureUnit::Celsius), "0°");
        assert_eq!(format_temp(12.3, TemperatureUnit::Fahrenheit), "54°");
    }

    #[test]
    fn malformed_patterns_fall_back() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
        assert_eq!(strftime(date.format("%a"), "---"), "Sat");
        assert_eq!(strftime(date.format("%!"), "---"), "---");
    }
}
