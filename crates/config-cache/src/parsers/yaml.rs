//! YAML parser using serde_yaml

use std::path::Path;

use serde_yaml::Value as YamlValue;

use crate::config::Config;
use crate::error::{Error, Result};

pub fn parse_file(path: &Path) -> Result<Config> {
    let content = super::read_text(path, "YAML")?;
    parse_str(&content, path)
}

/// Parse YAML source; `path` is only used for error reporting.
pub fn parse_str(source: &str, path: &Path) -> Result<Config> {
    let mut value: YamlValue =
        serde_yaml::from_str(source).map_err(|e| Error::parse(path, "YAML", e.to_string()))?;
    // `<<` merge keys are not resolved by the deserializer.
    value
        .apply_merge()
        .map_err(|e| Error::parse(path, "YAML", e.to_string()))?;
    Config::try_from(value).map_err(|e| super::shape_error(path, "YAML", e))
}
