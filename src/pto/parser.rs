//! Grammar parser for pto scripts
//!
//! The parser is a state machine over physical lines. The first non-blank
//! character of a line selects the section:
//!
//!     p       project (output canvas)
//!     i       one input image
//!     m, o    stitcher and optimizer settings
//!     v       optimizer variables
//!     c       one control point
//!     k       one mask
//!
//! Indentation before the keyword is skipped. A keyword only counts when it
//! is followed by whitespace or the end of the line. Every other non-blank
//! line, `#` comments included, is kept verbatim and attached to the next
//! record the parser creates. Whatever is still pending at the end of input
//! becomes the script's ending comments.
//!
//! The rest of a section line is scanned into tokens, grouped into entries by
//! [`cursor::Cursor`] and handed to the reducer of that section in
//! [`sections`].
//!
//! A [`Parser`] runs one parse at a time. A second parse started while the
//! first is still reading fails with [`ParseError::ParserBusy`].

pub mod cursor;
pub(crate) mod sections;

#[cfg(test)]
mod tests;

use std::io::BufRead;
use std::mem;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use super::config::ParserConfig;
use super::error::{Diagnostic, ParseError};
use super::feeder::LineFeeder;
use super::lexer::scan;
use super::projection::project;
use super::records::RecordList;
use super::script::Script;
use super::types::PtoType;
use super::validate::validate_references;
use cursor::{Cursor, Entry};
use sections::Reduced;

/// Section selected by the first character of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Project,
    Image,
    Optimize,
    Variables,
    ControlPoint,
    Mask,
}

impl Section {
    fn from_keyword(c: char) -> Option<Self> {
        match c {
            'p' => Some(Section::Project),
            'i' => Some(Section::Image),
            'm' | 'o' => Some(Section::Optimize),
            'v' => Some(Section::Variables),
            'c' => Some(Section::ControlPoint),
            'k' => Some(Section::Mask),
            _ => None,
        }
    }
}

/// Pto script parser
pub struct Parser {
    config: ParserConfig,
    busy: AtomicBool,
}

/// Releases the parser's busy flag when a parse ends, however it ends
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

impl Parser {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            busy: AtomicBool::new(false),
        }
    }

    fn acquire(&self) -> Result<BusyGuard<'_>, ParseError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| ParseError::ParserBusy)?;
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Parse a script file into the domain model
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<PtoType, ParseError> {
        let script = self.load_script(path)?;
        Ok(project(&script, None))
    }

    /// Parse script text into the domain model
    pub fn parse_str(&self, source: &str) -> Result<PtoType, ParseError> {
        let script = self.read_script(source.as_bytes())?;
        Ok(project(&script, None))
    }

    /// Parse a script file into the raw [`Script`]
    pub fn load_script(&self, path: impl AsRef<Path>) -> Result<Script, ParseError> {
        let _guard = self.acquire()?;
        let feeder = LineFeeder::open(path, self.config.max_line_length)?;
        self.run(feeder)
    }

    /// Parse a script from any buffered reader into the raw [`Script`]
    pub fn read_script<R: BufRead>(&self, reader: R) -> Result<Script, ParseError> {
        let _guard = self.acquire()?;
        let feeder = LineFeeder::from_reader(reader, self.config.max_line_length);
        self.run(feeder)
    }

    fn run<R: BufRead>(&self, mut feeder: LineFeeder<R>) -> Result<Script, ParseError> {
        let mut script = Script::default();
        let mut pending: RecordList<String> = RecordList::new();
        let mut seen_section = false;
        let mut seen_project = false;

        while feeder.advance_line()? {
            if feeder.line().trim().is_empty() {
                continue;
            }
            let Some(section) = read_keyword(&mut feeder) else {
                pending.push(feeder.line().to_string())?;
                continue;
            };

            let row = feeder.row();
            debug!(row, column = feeder.column(), ?section, "section line");
            seen_section = true;
            if section == Section::Project {
                if !seen_project {
                    script.pano.row = row;
                }
                seen_project = true;
            }

            let line = feeder.line();
            let syntax = |d: Diagnostic| ParseError::Syntax(d.into_syntax_error(row, line));
            let lexemes = scan(feeder.rest(), feeder.rest_offset()).map_err(syntax)?;
            let mut cursor = Cursor::new(line, lexemes);
            self.reduce_line(&mut script, &mut pending, section, row, &mut cursor)
                .map_err(|e| match e {
                    LineError::Diagnostic(d) => syntax(d),
                    LineError::Fatal(e) => e,
                })?;
        }

        if !seen_section {
            return Err(ParseError::EmptyInput);
        }
        if !seen_project {
            return Err(ParseError::MissingProject);
        }
        script.ending_comments = pending;

        if self.config.validate_references {
            validate_references(&script)?;
        }

        info!(
            images = script.images.len(),
            control_points = script.ctrl_points.len(),
            masks = script.masks.len(),
            variables = script.vars.len(),
            "parsed script"
        );
        Ok(script)
    }

    fn reduce_line(
        &self,
        script: &mut Script,
        pending: &mut RecordList<String>,
        section: Section,
        row: usize,
        cursor: &mut Cursor<'_>,
    ) -> Result<(), LineError> {
        match section {
            Section::Project => {
                let pano = &mut script.pano;
                pano.prev_comments.append(pending)?;
                let unmatched = reduce_entries(cursor, pano, sections::reduce_project)?;
                self.keep_unmatched(&mut pano.unmatched, unmatched)?;
            }
            Section::Image => {
                let image = script.images.grow()?;
                image.row = row;
                image.prev_comments = mem::take(pending);
                let unmatched = reduce_entries(cursor, image, sections::reduce_image)?;
                self.keep_unmatched(&mut image.unmatched, unmatched)?;
            }
            Section::Optimize => {
                let optimize = &mut script.optimize;
                optimize.prev_comments.append(pending)?;
                let unmatched = reduce_entries(cursor, optimize, sections::reduce_optimize)?;
                self.keep_unmatched(&mut optimize.unmatched, unmatched)?;
            }
            Section::Variables => {
                while let Some(entry) = cursor.next_entry()? {
                    if entry.is_opaque() {
                        continue;
                    }
                    let (name, image) = sections::optimizer_variable(&entry)?;
                    let var = script.vars.grow()?;
                    var.prev_comments = mem::take(pending);
                    var.row = row;
                    var.name = name.to_string();
                    var.image = image;
                }
            }
            Section::ControlPoint => {
                let point = script.ctrl_points.grow()?;
                point.row = row;
                point.prev_comments = mem::take(pending);
                reduce_entries(cursor, point, sections::reduce_control_point)?;
            }
            Section::Mask => {
                let mask = script.masks.grow()?;
                mask.row = row;
                mask.prev_comments = mem::take(pending);
                reduce_entries(cursor, mask, sections::reduce_mask)?;
            }
        }
        Ok(())
    }

    fn keep_unmatched(
        &self,
        list: &mut RecordList<String>,
        unmatched: Vec<&str>,
    ) -> Result<(), ParseError> {
        if self.config.keep_unmatched_parameters {
            for raw in unmatched {
                list.push(raw.to_string())?;
            }
        }
        Ok(())
    }
}

/// Failure inside one line, before the line context is attached
enum LineError {
    Diagnostic(Diagnostic),
    Fatal(ParseError),
}

impl From<Diagnostic> for LineError {
    fn from(d: Diagnostic) -> Self {
        LineError::Diagnostic(d)
    }
}

impl From<ParseError> for LineError {
    fn from(e: ParseError) -> Self {
        LineError::Fatal(e)
    }
}

/// Pull the section keyword off the current line, past any indentation
fn read_keyword<R: BufRead>(feeder: &mut LineFeeder<R>) -> Option<Section> {
    let mut c = feeder.next_char()?;
    while c == ' ' || c == '\t' {
        c = feeder.next_char()?;
    }
    let section = Section::from_keyword(c)?;
    match feeder.rest().chars().next() {
        None => Some(section),
        Some(c) if c.is_whitespace() => Some(section),
        Some(_) => None,
    }
}

/// Feed every entry of a line to `reduce`, returning the raw text of the
/// entries it did not recognise
fn reduce_entries<'a, T>(
    cursor: &mut Cursor<'a>,
    record: &mut T,
    reduce: fn(&mut T, &Entry) -> Result<Reduced, Diagnostic>,
) -> Result<Vec<&'a str>, Diagnostic> {
    let mut unmatched = Vec::new();
    while let Some(entry) = cursor.next_entry()? {
        if entry.is_opaque() || reduce(record, &entry)? == Reduced::Unmatched {
            unmatched.push(entry.raw);
        }
    }
    Ok(unmatched)
}
