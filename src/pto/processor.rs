//! Rendering of parsed projects for tools
//!
//! Runs a parse with a given [`Parser`] and renders the projected document in
//! one of the [`OutputFormat`]s. The `pto` binary is a thin shell around
//! [`process_file`].

use serde::Deserialize;
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;

use super::error::ParseError;
use super::parser::Parser;
use super::types::PtoType;

/// How a projected document is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

impl OutputFormat {
    pub fn from_string(name: &str) -> Result<Self, ProcessingError> {
        match name {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "summary" => Ok(OutputFormat::Summary),
            _ => Err(ProcessingError::InvalidFormat(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Summary => "summary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OutputFormat::Json => "The whole project as pretty-printed JSON",
            OutputFormat::Yaml => "The whole project as YAML",
            OutputFormat::Summary => "A short human readable overview",
        }
    }

    pub fn available_formats() -> Vec<OutputFormat> {
        vec![OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Summary]
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    Parse(ParseError),
    Config(String),
    InvalidFormat(String),
    Serialize(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::Parse(err) => write!(f, "{}", err),
            ProcessingError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ProcessingError::InvalidFormat(name) => write!(f, "Invalid format: {}", name),
            ProcessingError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl From<ParseError> for ProcessingError {
    fn from(err: ParseError) -> Self {
        ProcessingError::Parse(err)
    }
}

/// Parse the script at `path` and render it
pub fn process_file<P: AsRef<Path>>(
    path: P,
    parser: &Parser,
    format: OutputFormat,
) -> Result<String, ProcessingError> {
    let pto = parser.parse_file(path)?;
    render(&pto, format)
}

/// Render an already projected document
pub fn render(pto: &PtoType, format: OutputFormat) -> Result<String, ProcessingError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(pto)
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| ProcessingError::Serialize(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(pto).map_err(|e| ProcessingError::Serialize(e.to_string()))
        }
        OutputFormat::Summary => Ok(summary(pto)),
    }
}

fn summary(pto: &PtoType) -> String {
    let mut out = String::new();
    let project = &pto.project;
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        "project: {:?} {}x{}, fov {}",
        project.projection, project.size.width, project.size.height, project.field_of_view
    );
    let _ = writeln!(out, "output: {:?}", project.file_format.file_type);
    let _ = writeln!(out, "images: {}", pto.images.len());
    for image in &pto.images {
        let _ = writeln!(
            out,
            "  {} {} {}x{} {:?}",
            image.id, image.file_name, image.size.width, image.size.height, image.lens_projection
        );
    }
    let _ = writeln!(out, "control points: {}", pto.control_points.len());
    let _ = writeln!(out, "masks: {}", pto.mask_count());
    let _ = writeln!(out, "optimizer variables: {}", pto.optimisation_count());
    let _ = writeln!(out, "version: {:?}", pto.version);
    out
}
