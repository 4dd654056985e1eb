//! Minimal comma-separated codec.
//!
//! Cells containing a comma, a double quote, CR or LF are wrapped in double
//! quotes with embedded quotes doubled. Rows end in CRLF; the reader accepts
//! LF, CRLF and a missing final terminator, skips blank lines and strips a
//! leading UTF-8 byte order mark.

/// Line terminator for written rows.
pub(crate) const TERMINATOR: &str = "\r\n";

/// Quote a cell if it needs it.
pub(crate) fn escape(cell: &str) -> String {
    if cell.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Encode one row including its terminator.
///
/// A row that is a single empty cell is written as `""` so it does not read
/// back as a blank line.
pub(crate) fn encode_row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cells: Vec<String> = cells.into_iter().map(|c| escape(c.as_ref())).collect();
    let mut line = match cells.as_slice() {
        [only] if only.is_empty() => "\"\"".to_string(),
        _ => cells.join(","),
    };
    line.push_str(TERMINATOR);
    line
}

/// A parse failure, with the 1-based line the offending row starts on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParseError {
    pub line: usize,
    pub message: &'static str,
}

/// Parse a whole file into rows of cells.
pub(crate) fn parse(text: &str) -> Result<Vec<Vec<String>>, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    // Whether the current cell opened with a quote; text after the closing
    // quote is appended verbatim.
    let mut quoted = false;
    let mut line = 1;
    let mut row_start = 1;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    cell.push(c);
                }
                _ => cell.push(c),
            }
            continue;
        }

        match c {
            '"' if cell.is_empty() && !quoted => {
                in_quotes = true;
                quoted = true;
            }
            ',' => {
                row.push(std::mem::take(&mut cell));
                quoted = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                finish_row(&mut rows, &mut row, &mut cell, quoted);
                quoted = false;
                line += 1;
                row_start = line;
            }
            _ => cell.push(c),
        }
    }

    if in_quotes {
        return Err(ParseError {
            line: row_start,
            message: "unterminated quoted cell",
        });
    }
    finish_row(&mut rows, &mut row, &mut cell, quoted);
    Ok(rows)
}

fn finish_row(rows: &mut Vec<Vec<String>>, row: &mut Vec<String>, cell: &mut String, quoted: bool) {
    if row.is_empty() && cell.is_empty() && !quoted {
        return;
    }
    row.push(std::mem::take(cell));
    rows.push(std::mem::take(row));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_cells_are_not_quoted() {
        assert_eq!(escape("273.1"), "273.1");
        assert_eq!(escape(""), "");
    }

    #[test]
    fn special_cells_are_quoted() {
        assert_eq!(escape("a,b"), "\"a,b\"");
        assert_eq!(escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn encode_row_appends_crlf() {
        assert_eq!(encode_row(["a", "b,c", ""]), "a,\"b,c\",\r\n");
    }

    #[test]
    fn encode_lone_empty_cell_is_quoted() {
        assert_eq!(encode_row([""]), "\"\"\r\n");
        assert_eq!(parse(&encode_row([""])).unwrap(), vec![vec![String::new()]]);
        assert_eq!(encode_row(["", ""]), ",\r\n");
    }

    #[test]
    fn parse_mixed_terminators_and_blank_lines() {
        let rows = parse("a,b\r\n1,2\n\n3,4").unwrap();
        assert_eq!(
            rows,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["1".to_string(), "2".to_string()],
                vec!["3".to_string(), "4".to_string()],
            ]
        );
    }

    #[test]
    fn parse_quoted_cells() {
        let encoded = encode_row(["North Sea, Block 9", "said \"ok\"", "line1\nline2"]);
        let rows = parse(&encoded).unwrap();
        assert_eq!(
            rows,
            vec![vec![
                "North Sea, Block 9".to_string(),
                "said \"ok\"".to_string(),
                "line1\nline2".to_string(),
            ]]
        );
    }

    #[test]
    fn parse_keeps_trailing_empty_cell() {
        let rows = parse("a,b,\r\n").unwrap();
        assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string(), String::new()]]);
    }

    #[test]
    fn parse_quoted_empty_row_is_kept() {
        let rows = parse("\"\"\n").unwrap();
        assert_eq!(rows, vec![vec![String::new()]]);
    }

    #[test]
    fn parse_strips_bom() {
        let rows = parse("\u{feff}Project\nA\n").unwrap();
        assert_eq!(rows[0], vec!["Project".to_string()]);
    }

    #[test]
    fn parse_unterminated_quote_reports_row_start() {
        let err = parse("a,b\n1,\"open\n2,3\n").unwrap_err();
        assert_eq!(err.line, 2);
    }
}
