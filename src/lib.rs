//! # pto
//!
//! A parser for Hugin panorama project scripts (`.pto`).
//!
//! The reader lives in the [`pto`](mod@pto) module; the most used items are
//! re-exported here. [`logger`] sets up log output for applications.

pub mod logger;
pub mod pto;

pub use crate::pto::{
    parse, parse_script, project, FormatVersion, LinkedValue, ParseError, Parser, PtoType,
    Script, SyntaxError,
};
