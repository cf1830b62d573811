//! Reader for Hugin panorama project scripts
//!
//! A `.pto` script is read line by line into a raw [`Script`], which is then
//! projected into the serializable [`PtoType`] model:
//!
//!     path -> feeder -> lexer -> parser -> Script -> getters -> projection -> PtoType
//!
//! Masks and optimizer variables are moved onto the image they name during
//! projection. One that names an image the script does not have is dropped
//! with a warning, so [`PtoType::mask_count`] can be lower than the number of
//! `k` lines. Enable `parser.validate_references` to reject such scripts
//! instead.
//!
//! [`parse`] runs the whole chain with default settings. Callers that need
//! their own settings, or several parses at once, create a [`Parser`] each.
//!
//! ```rust,ignore
//! let pto = pto::parse("project.pto")?;
//! for image in &pto.images {
//!     println!("{} {:?}", image.file_name, image.field_of_view);
//! }
//! ```

pub mod config;
pub mod error;
pub mod feeder;
pub mod getters;
pub mod lexer;
pub mod output_format;
pub mod parser;
pub mod processor;
pub mod projection;
pub mod records;
pub mod script;
pub mod types;
pub mod validate;

use once_cell::sync::Lazy;
use std::path::Path;

pub use error::{ParseError, SyntaxError};
pub use parser::Parser;
pub use projection::project;
pub use script::Script;
pub use types::{FormatVersion, LinkedValue, PtoType};

/// The parser behind [`parse`] and [`parse_script`]
static GLOBAL_PARSER: Lazy<Parser> = Lazy::new(Parser::default);

/// Parse the script at `path` into the domain model
///
/// Uses one process-wide parser: a call made while another call of
/// [`parse`] or [`parse_script`] is still running fails with
/// [`ParseError::ParserBusy`].
pub fn parse(path: impl AsRef<Path>) -> Result<PtoType, ParseError> {
    GLOBAL_PARSER.parse_file(path)
}

/// Parse the script at `path` into the raw [`Script`]
pub fn parse_script(path: impl AsRef<Path>) -> Result<Script, ParseError> {
    GLOBAL_PARSER.load_script(path)
}
