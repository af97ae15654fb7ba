//! Command implementations
//!
//! Each command returns the text to print so it can be tested without a
//! process boundary.

use std::path::Path;
use std::sync::Arc;

use config_cache::{Config, OnMissing, ParserChoice, Value, get_instance};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::cli::ValueKind;
use crate::error::Result;

fn load(dir: &Path, file: &str, parser: Option<&str>) -> Result<Arc<Config>> {
    let reader = get_instance(dir, None)?;
    debug!(directory = %reader.directory().display(), file, "Loading config");
    let config = reader.read_config(file, parser.map(ParserChoice::from), OnMissing::Raise)?;
    Ok(config)
}

/// Print the value at `key` using the typed getter for `kind`.
pub fn run_get(
    dir: &Path,
    file: &str,
    key: &str,
    parser: Option<&str>,
    kind: ValueKind,
) -> Result<String> {
    let config = load(dir, file, parser)?;
    let rendered = match kind {
        ValueKind::Str => match config.lookup(key)? {
            Value::Scalar(scalar) => scalar.to_string(),
            other => serde_json::to_string(&JsonValue::from(other))?,
        },
        ValueKind::Int => config.require_int(key)?.to_string(),
        ValueKind::Float => config.require_float(key)?.to_string(),
        ValueKind::Bool => config.require_boolean(key)?.to_string(),
        ValueKind::Json => {
            let items: Vec<JsonValue> = config
                .get_json(key, "[]")?
                .iter()
                .map(JsonValue::from)
                .collect();
            serde_json::to_string(&items)?
        }
    };
    Ok(rendered)
}

/// Render the whole file as pretty JSON.
pub fn run_dump(dir: &Path, file: &str, parser: Option<&str>) -> Result<String> {
    let config = load(dir, file, parser)?;
    Ok(serde_json::to_string_pretty(&JsonValue::from(&*config))?)
}

/// Name the parser the resolution rules pick for `file`.
pub fn run_detect(dir: &Path, file: &str) -> Result<String> {
    let reader = get_instance(dir, None)?;
    Ok(reader.resolve_parser(file, None)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("app.yaml"),
            "server:\n  port: \"8080\"\n  debug: on\n  hosts: [a, b]\n",
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_get_str_and_int() {
        let temp = fixture();
        assert_eq!(
            run_get(temp.path(), "app.yaml", "server.port", None, ValueKind::Str).unwrap(),
            "8080"
        );
        assert_eq!(
            run_get(temp.path(), "app.yaml", "server.port", None, ValueKind::Int).unwrap(),
            "8080"
        );
    }

    #[test]
    fn test_get_sequence_as_json() {
        let temp = fixture();
        assert_eq!(
            run_get(temp.path(), "app.yaml", "server.hosts", None, ValueKind::Str).unwrap(),
            r#"["a","b"]"#
        );
        assert_eq!(
            run_get(temp.path(), "app.yaml", "server.hosts", None, ValueKind::Json).unwrap(),
            r#"["a","b"]"#
        );
    }

    #[test]
    fn test_get_bool_literal() {
        let temp = fixture();
        assert_eq!(
            run_get(temp.path(), "app.yaml", "server.debug", None, ValueKind::Bool).unwrap(),
            "true"
        );
    }

    #[test]
    fn test_get_missing_key_fails() {
        let temp = fixture();
        assert!(run_get(temp.path(), "app.yaml", "server.nope", None, ValueKind::Str).is_err());
    }

    #[test]
    fn test_detect() {
        let temp = fixture();
        assert_eq!(run_detect(temp.path(), "x.conf").unwrap(), "ini");
        assert_eq!(run_detect(temp.path(), "app.yaml").unwrap(), "yaml");
    }
}
