//! Per-pass cursor state threaded explicitly through parsing and dispatch.

use std::collections::BTreeMap;

use crate::align::Alignment;
use crate::tree::NodeHandle;

/// One buffered entry of an ASCII-table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    /// Switch the active alignment before the next call.
    Align(Alignment),
    /// Dispatch a named function into the column.
    Call(String),
    /// Flexible vertical gap between content blocks.
    Spacer,
}

/// Column discovered while scanning an ASCII-table row section.
///
/// Built up across the content lines of one section and consumed when the
/// closing border line is read. Item order is significant; it is replayed in
/// sequence to populate the materialized column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    pub width: Option<u32>,
    pub items: Vec<Item>,
}

impl ColumnSpec {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.items.is_empty()
    }

    /// Record a spacer request, collapsing consecutive spacers into one.
    pub fn push_spacer(&mut self) {
        if !matches!(self.items.last(), Some(Item::Spacer)) {
            self.items.push(Item::Spacer);
        }
    }
}

/// Mutable state owned by one compile pass.
///
/// At most one row and one column cursor are live at a time; the interpreter
/// never nests deeper than root → row → column. Nothing here survives the
/// pass, so compilers are freely instantiable side by side.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// Row currently receiving columns, if any.
    pub row: Option<NodeHandle>,
    /// Column currently receiving content, if any.
    pub column: Option<NodeHandle>,
    /// Alignment applied to subsequent content placements.
    pub alignment: Alignment,
    /// ASCII-table column buffer, keyed by pipe position within the line.
    pub columns: BTreeMap<usize, ColumnSpec>,
    /// Set when a border closed a populated row section; the next content
    /// line materializes a fresh row lazily so back-to-back borders never
    /// produce an empty row.
    pub row_pending: bool,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacers_deduplicate() {
        let mut spec = ColumnSpec::default();
        spec.push_spacer();
        spec.push_spacer();
        spec.items.push(Item::Call("date".to_string()));
        spec.push_spacer();

        assert_eq!(
            spec.items,
            vec![
                Item::Spacer,
                Item::Call("date".to_string()),
                Item::Spacer,
            ]
        );
    }

    #[test]
    fn empty_spec_reports_empty() {
        let mut spec = ColumnSpec::default();
        assert!(spec.is_empty());
        spec.width = Some(90);
        assert!(!spec.is_empty());
    }
}
