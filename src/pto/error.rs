//! Error types for reading pto scripts
//!
//! Every failure of a parse is reported through [`ParseError`]. Nothing in the
//! parser panics on bad input; the only panics are the index assertions of the
//! getter layer, which signal a caller bug rather than a malformed script.

use std::fmt;
use std::ops::Range;

/// Errors that can occur while reading a pto script
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The script file does not exist
    FileNotFound(String),
    /// The script file exists but could not be read
    FileUnreadable { path: String, reason: String },
    /// Another parse is already running on the same parser
    ParserBusy,
    /// A record list could not grow
    OutOfMemory,
    /// A line could not be parsed
    Syntax(SyntaxError),
    /// The input contained no section lines at all
    EmptyInput,
    /// The input never declared the `p` project line
    MissingProject,
    /// An image index points past the end of the image list
    DanglingReference {
        row: usize,
        what: String,
        index: usize,
        image_count: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ParseError::FileUnreadable { path, reason } => {
                write!(f, "Cannot read {}: {}", path, reason)
            }
            ParseError::ParserBusy => write!(f, "Parser busy: another script is being parsed"),
            ParseError::OutOfMemory => write!(f, "Out of memory while growing a record list"),
            ParseError::Syntax(err) => write!(f, "{}", err),
            ParseError::EmptyInput => write!(f, "Script contains no parseable lines"),
            ParseError::MissingProject => write!(f, "Script has no 'p' project line"),
            ParseError::DanglingReference {
                row,
                what,
                index,
                image_count,
            } => write!(
                f,
                "line {}: {} refers to image {} but the script has {} image(s)",
                row, what, index, image_count
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

/// A malformed token, located in its source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// 1-based physical line number
    pub row: usize,
    /// 1-based column of the first byte of the offending token
    pub column: usize,
    /// Length of the offending token in bytes
    pub length: usize,
    /// Text of the offending token
    pub token: String,
    /// The full source line
    pub line: String,
    pub message: String,
}

impl SyntaxError {
    /// Build an error for the byte range `span` of `line`
    pub fn at(row: usize, line: &str, span: Range<usize>, message: impl Into<String>) -> Self {
        let start = span.start.min(line.len());
        let end = span.end.clamp(start, line.len());
        Self {
            row,
            column: start + 1,
            length: (end - start).max(1),
            token: line.get(start..end).unwrap_or_default().to_string(),
            line: line.to_string(),
            message: message.into(),
        }
    }

    /// The caret run printed under the source line
    pub fn underline(&self) -> String {
        let indent: String = self
            .line
            .get(..self.column - 1)
            .unwrap_or_default()
            .chars()
            .map(|c| if c == '\t' { '\t' } else { ' ' })
            .collect();
        format!("{}{}", indent, "^".repeat(self.length))
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.row, self.column, self.message
        )?;
        writeln!(f, "{}", self.line)?;
        write!(f, "{}", self.underline())
    }
}

/// A problem found inside a single line, before the row is known
///
/// Section reducers work on one line at a time and report byte spans; the
/// parser loop turns them into [`SyntaxError`]s with the line context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Range<usize>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(span: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn into_syntax_error(self, row: usize, line: &str) -> SyntaxError {
        SyntaxError::at(row, line, self.span, self.message)
    }
}
