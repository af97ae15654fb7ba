//! JSON parser using serde_json

use std::path::Path;

use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::error::{Error, Result};

pub fn parse_file(path: &Path) -> Result<Config> {
    let content = super::read_text(path, "JSON")?;
    parse_str(&content, path)
}

pub fn parse_str(source: &str, path: &Path) -> Result<Config> {
    let value: JsonValue =
        serde_json::from_str(source).map_err(|e| Error::parse(path, "JSON", e.to_string()))?;
    Config::try_from(value).map_err(|e| super::shape_error(path, "JSON", e))
}
