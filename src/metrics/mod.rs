//! Counters accumulated over a single compile pass.

use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

#[derive(Debug, Default, Clone)]
pub struct PassMetrics {
    lines: u64,
    rows: u64,
    columns: u64,
    dispatches: u64,
    resolved: u64,
    misses: u64,
    fallbacks: u64,
}

impl PassMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_line(&mut self) {
        self.lines = self.lines.saturating_add(1);
    }

    pub fn record_row(&mut self) {
        self.rows = self.rows.saturating_add(1);
    }

    pub fn record_column(&mut self) {
        self.columns = self.columns.saturating_add(1);
    }

    pub fn record_dispatch(&mut self, resolved: bool) {
        self.dispatches = self.dispatches.saturating_add(1);
        if resolved {
            self.resolved = self.resolved.saturating_add(1);
        } else {
            self.misses = self.misses.saturating_add(1);
        }
    }

    /// A content provider substituted its placeholder because upstream data
    /// was unavailable.
    pub fn record_fallback(&mut self) {
        self.fallbacks = self.fallbacks.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lines: self.lines,
            rows: self.rows,
            columns: self.columns,
            dispatches: self.dispatches,
            resolved: self.resolved,
            misses: self.misses,
            fallbacks: self.fallbacks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub lines: u64,
    pub rows: u64,
    pub columns: u64,
    pub dispatches: u64,
    pub resolved: u64,
    pub misses: u64,
    pub fallbacks: u64,
}

impl MetricsSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("lines".to_string(), json!(self.lines));
        map.insert("rows".to_string(), json!(self.rows));
        map.insert("columns".to_string(), json!(self.columns));
        map.insert("dispatches".to_string(), json!(self.dispatches));
        map.insert("resolved".to_string(), json!(self.resolved));
        map.insert("misses".to_string(), json!(self.misses));
        map.insert("fallbacks".to_string(), json!(self.fallbacks));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "pass_metrics", self.as_fields())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut metrics = PassMetrics::new();
        metrics.record_line();
        metrics.record_line();
        metrics.record_row();
        metrics.record_dispatch(true);
        metrics.record_dispatch(false);
        metrics.record_fallback();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.lines, 2);
        assert_eq!(snapshot.rows, 1);
        assert_eq!(snapshot.dispatches, 2);
        assert_eq!(snapshot.resolved, 1);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.fallbacks, 1);
    }

    #[test]
    fn snapshot_exposes_loggable_fields() {
        let mut metrics = PassMetrics::new();
        metrics.record_column();
        let fields = metrics.snapshot().as_fields();
        assert_eq!(fields.get("columns"), Some(&json!(1)));
        assert_eq!(fields.get("misses"), Some(&json!(0)));
    }
}
