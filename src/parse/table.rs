//! ASCII-table lines: bordered row sections with pipe-delimited columns.
//!
//! The scanner buffers columns discovered on content lines into the pass
//! context and materializes them when the closing border is read. Dots are
//! visual fill and are deleted before any other handling.
//!
//! Known grammar ambiguity, kept for document compatibility: a content line
//! is treated as a width-declaration (setup) line whenever it contains any
//! digit, so an unresolvable cell value containing a digit is read as a
//! width rather than content.

use crate::align::Alignment;
use crate::compile::Pass;
use crate::context::Item;
use crate::error::Result;
use crate::registry::DispatchRegistry;

/// Feed one trimmed, non-blank line to the table scanner.
pub fn feed(pass: &mut Pass<'_>, registry: &DispatchRegistry, raw: &str) -> Result<()> {
    let normalized: String = raw.chars().filter(|&c| c != '.').collect();
    let line = normalized.trim();

    if is_border(line) {
        return flush(pass, registry);
    }

    // Rows materialize lazily on the first content line of a section.
    if pass.ctx.row_pending || pass.ctx.row.is_none() {
        pass.begin_row(None);
    }

    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() < 3 {
        return Ok(());
    }

    let is_setup = line.chars().any(|c| c.is_ascii_digit());
    let last = segments.len() - 1;
    // The first and last fragments are document margin, not columns.
    for (index, segment) in segments.iter().enumerate().take(last).skip(1) {
        let trimmed = segment.trim();
        let spec = pass.ctx.columns.entry(index).or_default();

        if registry.resolves(trimmed) {
            spec.items.push(Item::Align(infer_alignment(segment)));
            spec.items.push(Item::Call(trimmed.to_string()));
        } else if is_setup {
            if let Ok(width) = trimmed.parse::<u32>() {
                spec.width = Some(width);
            }
        } else if trimmed.is_empty() {
            spec.push_spacer();
        }
    }

    Ok(())
}

/// Materialize every buffered column under the current row and replay its
/// items in order. Called on each border line and at end of document.
pub fn flush(pass: &mut Pass<'_>, registry: &DispatchRegistry) -> Result<()> {
    let buffered = std::mem::take(&mut pass.ctx.columns);
    let mut created = false;

    for (_, spec) in buffered {
        if spec.is_empty() {
            continue;
        }
        pass.begin_column(spec.width)?;
        for item in spec.items {
            match item {
                Item::Align(alignment) => pass.ctx.alignment = alignment,
                Item::Spacer => {
                    let column = pass.column()?;
                    pass.surface.add_spacer(column, None);
                }
                Item::Call(name) => {
                    registry.dispatch(pass, &name, None)?;
                }
            }
        }
        created = true;
    }

    if created {
        pass.ctx.row_pending = true;
    }
    Ok(())
}

fn is_border(line: &str) -> bool {
    !line.is_empty() && line.starts_with('-') && line.ends_with('-')
}

/// Infer alignment from where the trimmed text sits inside its segment:
/// padding on both sides centers, leading-only pushes right, anything else
/// is left.
fn infer_alignment(segment: &str) -> Alignment {
    let trimmed = segment.trim();
    let start = match segment.find(trimmed) {
        Some(index) => index,
        None => 0,
    };
    let leading = start > 0;
    let trailing = trimmed.len() < segment.len() - start;

    match (leading, trailing) {
        (true, true) => Alignment::Center,
        (true, false) => Alignment::Right,
        _ => Alignment::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_boundaries() {
        assert_eq!(infer_alignment("date"), Alignment::Left);
        assert_eq!(infer_alignment("date   "), Alignment::Left);
        assert_eq!(infer_alignment("   date"), Alignment::Right);
        assert_eq!(infer_alignment("  date  "), Alignment::Center);
        assert_eq!(infer_alignment(" date "), Alignment::Center);
    }

    #[test]
    fn border_needs_dash_ends() {
        assert!(is_border("-----"));
        assert!(is_border("-"));
        assert!(!is_border("| date |"));
        assert!(!is_border(""));
    }
}
