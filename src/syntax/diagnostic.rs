// src/syntax/diagnostic.rs
use std::fmt;

/// A syntax error with enough context to print a caret excerpt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    pub message: String,
    pub source_line: String,
}

impl Diagnostic {
    /// Builds a diagnostic from a zero-based row and byte column into `source`.
    #[must_use]
    pub fn at(filename: &str, source: &str, row: usize, byte_col: usize, message: String) -> Self {
        let source_line = source.lines().nth(row).unwrap_or("").to_string();
        let column = source_line
            .get(..byte_col)
            .map_or(byte_col, |prefix| prefix.chars().count())
            + 1;
        Self {
            filename: filename.to_string(),
            line: row + 1,
            column,
            message,
            source_line,
        }
    }

    /// Whitespace that lines a caret up under `column`, keeping tabs as tabs.
    fn caret_indent(&self) -> String {
        self.source_line
            .chars()
            .chain(std::iter::repeat(' '))
            .take(self.column.saturating_sub(1))
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:{}", self.filename, self.line)?;
        writeln!(f, "{}", self.source_line)?;
        writeln!(f, "{}^", self.caret_indent())?;
        writeln!(f)?;
        write!(
            f,
            "SyntaxError: {} ({}:{})",
            self.message, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_one_based() {
        let d = Diagnostic::at("a.js", "let a;\nlet = 1;\n", 1, 4, "Unexpected token `=`".into());
        assert_eq!(d.line, 2);
        assert_eq!(d.column, 5);
        assert_eq!(d.source_line, "let = 1;");
    }

    #[test]
    fn test_column_counts_chars_not_bytes() {
        let d = Diagnostic::at("a.js", "const é = ;", 0, 11, "x".into());
        assert_eq!(d.column, 11);
    }

    #[test]
    fn test_render_excerpt() {
        let d = Diagnostic::at("/p/a.js", "\tfoo(;", 0, 5, "Unexpected token `;`".into());
        let text = d.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "/p/a.js:1");
        assert_eq!(lines[1], "\tfoo(;");
        assert_eq!(lines[2], "\t    ^");
        assert_eq!(lines[4], "SyntaxError: Unexpected token `;` (1:6)");
    }

    #[test]
    fn test_row_past_end_is_empty_line() {
        let d = Diagnostic::at("a.js", "", 3, 0, "Unexpected end of input".into());
        assert_eq!(d.line, 4);
        assert_eq!(d.column, 1);
        assert!(d.source_line.is_empty());
    }
}
