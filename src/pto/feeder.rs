//! Line feeder
//!
//! Reads a script one physical line at a time into a bounded buffer and hands
//! out characters of the current line. It keeps the row and column
//! bookkeeping used by diagnostics.
//!
//! Lines longer than the configured limit are cut at the last character
//! boundary that fits. This is a known limitation of the format reader, not
//! something the feeder tries to repair; a warning is logged for each cut.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::warn;

use super::error::ParseError;

/// Default maximum number of bytes kept from one line
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1000;

/// Pull interface over the lines of a script
pub struct LineFeeder<R> {
    reader: R,
    buffer: String,
    limit: usize,
    row: usize,
    cursor: usize,
    column: usize,
    source: String,
}

impl LineFeeder<BufReader<File>> {
    /// Open `path` for reading
    pub fn open(path: impl AsRef<Path>, limit: usize) -> Result<Self, ParseError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ParseError::FileNotFound(display.clone()),
            _ => ParseError::FileUnreadable {
                path: display.clone(),
                reason: e.to_string(),
            },
        })?;
        Ok(Self::from_reader(BufReader::new(file), limit).named(display))
    }
}

impl<R: BufRead> LineFeeder<R> {
    pub fn from_reader(reader: R, limit: usize) -> Self {
        Self {
            reader,
            buffer: String::new(),
            limit: limit.max(1),
            row: 0,
            cursor: 0,
            column: 0,
            source: "<input>".to_string(),
        }
    }

    /// Name used in I/O error messages
    pub fn named(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Load the next line. Returns `false` at end of input.
    pub fn advance_line(&mut self) -> Result<bool, ParseError> {
        self.buffer.clear();
        self.cursor = 0;
        self.column = 0;

        let read = self
            .reader
            .read_line(&mut self.buffer)
            .map_err(|e| ParseError::FileUnreadable {
                path: self.source.clone(),
                reason: e.to_string(),
            })?;
        if read == 0 {
            return Ok(false);
        }
        self.row += 1;

        if self.buffer.ends_with('\n') {
            self.buffer.pop();
            if self.buffer.ends_with('\r') {
                self.buffer.pop();
            }
        }

        if self.buffer.len() > self.limit {
            let mut cut = self.limit;
            while !self.buffer.is_char_boundary(cut) {
                cut -= 1;
            }
            warn!(
                row = self.row,
                length = self.buffer.len(),
                limit = self.limit,
                "line truncated"
            );
            self.buffer.truncate(cut);
        }
        Ok(true)
    }

    /// Next character of the current line, `None` at end of line
    pub fn next_char(&mut self) -> Option<char> {
        let c = self.buffer[self.cursor..].chars().next()?;
        self.column = self.cursor;
        self.cursor += c.len_utf8();
        Some(c)
    }

    /// The current line, without its terminator
    pub fn line(&self) -> &str {
        &self.buffer
    }

    /// The part of the current line not yet pulled by [`next_char`](Self::next_char)
    pub fn rest(&self) -> &str {
        &self.buffer[self.cursor..]
    }

    /// Byte offset of [`rest`](Self::rest) within the line
    pub fn rest_offset(&self) -> usize {
        self.cursor
    }

    /// 1-based number of the current line
    pub fn row(&self) -> usize {
        self.row
    }

    /// Byte offset of the most recently returned character
    pub fn column(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn feeder(source: &str, limit: usize) -> LineFeeder<Cursor<Vec<u8>>> {
        LineFeeder::from_reader(Cursor::new(source.as_bytes().to_vec()), limit)
    }

    #[test]
    fn test_lines_and_rows() {
        let mut f = feeder("p w10\r\n# note\n\ni w1", DEFAULT_MAX_LINE_LENGTH);
        assert!(f.advance_line().unwrap());
        assert_eq!((f.row(), f.line()), (1, "p w10"));
        assert!(f.advance_line().unwrap());
        assert_eq!((f.row(), f.line()), (2, "# note"));
        assert!(f.advance_line().unwrap());
        assert_eq!((f.row(), f.line()), (3, ""));
        assert!(f.advance_line().unwrap());
        assert_eq!((f.row(), f.line()), (4, "i w1"));
        assert!(!f.advance_line().unwrap());
    }

    #[test]
    fn test_next_char_tracks_column() {
        let mut f = feeder("ab c", DEFAULT_MAX_LINE_LENGTH);
        f.advance_line().unwrap();
        assert_eq!(f.next_char(), Some('a'));
        assert_eq!(f.column(), 0);
        assert_eq!(f.next_char(), Some('b'));
        assert_eq!(f.column(), 1);
        assert_eq!(f.rest(), " c");
        assert_eq!(f.rest_offset(), 2);
        f.next_char();
        f.next_char();
        assert_eq!(f.column(), 3);
        assert_eq!(f.next_char(), None);
    }

    #[test]
    fn test_long_lines_are_truncated() {
        let mut f = feeder("abcdefghij\nxyz\n", 4);
        f.advance_line().unwrap();
        assert_eq!(f.line(), "abcd");
        f.advance_line().unwrap();
        assert_eq!(f.line(), "xyz");
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let mut f = feeder("aé", 2);
        f.advance_line().unwrap();
        assert_eq!(f.line(), "a");
    }

    #[test]
    fn test_open_missing_file() {
        let err = LineFeeder::open("/definitely/not/here.pto", 10)
            .err()
            .unwrap();
        assert!(matches!(err, ParseError::FileNotFound(_)));
    }
}
