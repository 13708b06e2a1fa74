//! Call-style lines: one `name` or `name(param)` per line.

/// Parameter attached to a call. Numeric text becomes `Int`; anything else
/// is passed through as `Text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    Int(i64),
    Text(String),
}

impl Param {
    /// Non-negative integer coerced into a surface size, if it fits.
    pub fn as_size(&self) -> Option<u32> {
        match self {
            Param::Int(value) => u32::try_from(*value).ok(),
            Param::Text(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Param::Int(value) => usize::try_from(*value).ok(),
            Param::Text(_) => None,
        }
    }
}

/// One dispatch request decoded from a call-style line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCall {
    pub name: String,
    pub param: Option<Param>,
}

/// Decode one trimmed, non-blank call-style line.
///
/// An older list syntax allowed a trailing comma after each entry; exactly
/// one is stripped before the line is split on the first `(`.
pub fn parse_line(line: &str) -> ParsedCall {
    let line = line.trim();
    let line = line.strip_suffix(',').unwrap_or(line).trim_end();

    match line.split_once('(') {
        None => ParsedCall {
            name: line.to_string(),
            param: None,
        },
        Some((name, rest)) => {
            let raw = rest.strip_suffix(')').unwrap_or(rest);
            let param = match raw.trim().parse::<i64>() {
                Ok(value) => Param::Int(value),
                Err(_) => Param::Text(raw.to_string()),
            };
            ParsedCall {
                name: name.trim().to_string(),
                param: Some(param),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_has_no_param() {
        assert_eq!(
            parse_line("week"),
            ParsedCall {
                name: "week".to_string(),
                param: None,
            }
        );
    }

    #[test]
    fn integer_params_are_typed() {
        assert_eq!(
            parse_line("events(3)"),
            ParsedCall {
                name: "events".to_string(),
                param: Some(Param::Int(3)),
            }
        );
    }

    #[test]
    fn legacy_trailing_comma_is_equivalent() {
        assert_eq!(parse_line("events(3),"), parse_line("events(3)"));
        assert_eq!(parse_line("week,"), parse_line("week"));
    }

    #[test]
    fn non_numeric_params_fall_back_to_text() {
        assert_eq!(
            parse_line("text(back in 5)"),
            ParsedCall {
                name: "text".to_string(),
                param: Some(Param::Text("back in 5".to_string())),
            }
        );
    }

    #[test]
    fn missing_close_paren_is_tolerated() {
        assert_eq!(
            parse_line("events(3"),
            ParsedCall {
                name: "events".to_string(),
                param: Some(Param::Int(3)),
            }
        );
    }

    #[test]
    fn sizes_reject_negative_values() {
        assert_eq!(Param::Int(90).as_size(), Some(90));
        assert_eq!(Param::Int(-1).as_size(), None);
        assert_eq!(Param::Text("90".to_string()).as_size(), None);
    }
}
