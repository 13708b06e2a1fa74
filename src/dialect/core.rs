/// The two mutually exclusive layout grammars.
///
/// A document starts as `Unknown` and is routed line by line: border lines
/// commit it to `AsciiTable`, which is terminal: later lines that look like
/// call syntax (including ones containing the row keyword) stay table
/// content. A line containing the row keyword first commits `CallStyle`; a
/// document that never disambiguates keeps `Unknown` and is parsed as call
/// syntax throughout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    #[default]
    Unknown,
    CallStyle,
    AsciiTable,
}

impl Dialect {
    /// Whether lines in this state go through the ASCII-table scanner.
    pub fn is_table(self) -> bool {
        matches!(self, Dialect::AsciiTable)
    }
}

/// Keyword whose presence marks a call-style document.
pub const ROW_KEYWORD: &str = "row";

/// A trimmed line that opens and closes with a dash, filled only with dashes
/// and dots (dots are visual fill throughout the table grammar).
pub fn is_border_line(line: &str) -> bool {
    let mut chars = line.chars();
    match (chars.next(), line.chars().last()) {
        (Some('-'), Some('-')) => line.chars().all(|c| c == '-' || c == '.'),
        _ => false,
    }
}

/// Advance the dialect state for one trimmed, non-blank line.
///
/// Call-style documents keep their layouts free of dash borders, so the
/// table trigger stays decisive until the table dialect is reached; once
/// there, nothing changes it back.
pub fn decide(current: Dialect, line: &str) -> Dialect {
    match current {
        Dialect::AsciiTable => Dialect::AsciiTable,
        _ if is_border_line(line) => Dialect::AsciiTable,
        Dialect::Unknown if line.contains(ROW_KEYWORD) => Dialect::CallStyle,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn border_lines_require_dash_ends() {
        assert!(is_border_line("-----------"));
        assert!(is_border_line("-...-...-"));
        assert!(is_border_line("--"));
        assert!(!is_border_line("-- x --"));
        assert!(!is_border_line(".----."));
        assert!(!is_border_line(""));
        assert!(!is_border_line("row"));
    }

    #[test]
    fn row_keyword_commits_call_style() {
        assert_eq!(decide(Dialect::Unknown, "row"), Dialect::CallStyle);
        assert_eq!(decide(Dialect::Unknown, "row(120)"), Dialect::CallStyle);
        assert_eq!(decide(Dialect::Unknown, "date"), Dialect::Unknown);
    }

    #[test]
    fn border_commits_table_style() {
        assert_eq!(decide(Dialect::Unknown, "-----"), Dialect::AsciiTable);
        assert_eq!(decide(Dialect::CallStyle, "-----"), Dialect::AsciiTable);
    }

    #[test]
    fn table_style_is_terminal() {
        assert_eq!(decide(Dialect::AsciiTable, "row"), Dialect::AsciiTable);
        assert_eq!(decide(Dialect::AsciiTable, "| date |"), Dialect::AsciiTable);
    }
}
