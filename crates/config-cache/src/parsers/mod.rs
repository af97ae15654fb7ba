//! Format parsers
//!
//! Each parser reads a whole file and converts it into a [`Config`](crate::Config).
//! Read failures surface as [`Error::Io`](crate::Error::Io); invalid UTF-8,
//! syntax and shape problems as [`Error::ConfigParse`](crate::Error::ConfigParse).

pub mod ini;
pub mod json;
pub mod yaml;

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read the whole file. Only a failed read is an I/O error; content that is
/// not UTF-8 is malformed input for `format`.
fn read_text(path: &Path, format: &str) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    String::from_utf8(bytes).map_err(|e| Error::parse(path, format, e.to_string()))
}

/// Report a document-shape error against the file it came from.
fn shape_error(path: &Path, format: &str, err: Error) -> Error {
    match err {
        Error::Structure { .. } => Error::parse(path, format, err.to_string()),
        other => other,
    }
}
