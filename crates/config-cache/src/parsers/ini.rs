//! INI parser using rust-ini
//!
//! Each section becomes a top-level mapping of string leaves. Option names
//! are folded to lowercase; values are kept verbatim (no quote or escape
//! processing) so JSON list literals such as `["a","b"]` survive intact.
//! Options that appear before the first section header become top-level
//! leaves. The `[DEFAULT]` section is skipped and its options are not copied
//! into other sections.

use std::collections::BTreeMap;
use std::path::Path;

use ini::{Ini, ParseOption};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::value::{Scalar, Value};

const DEFAULT_SECTION: &str = "DEFAULT";

pub fn parse_file(path: &Path) -> Result<Config> {
    let content = super::read_text(path, "INI")?;
    parse_str(&content, path)
}

pub fn parse_str(source: &str, path: &Path) -> Result<Config> {
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(source, options)
        .map_err(|e| Error::parse(path, "INI", e.to_string()))?;

    let mut top_level: BTreeMap<String, Value> = BTreeMap::new();
    // Repeated section headers merge into one mapping.
    let mut sections: BTreeMap<String, BTreeMap<String, Value>> = BTreeMap::new();

    for (section, properties) in ini.iter() {
        if section == Some(DEFAULT_SECTION) {
            continue;
        }
        let entries = properties
            .iter()
            .map(|(key, value)| (key.to_lowercase(), Value::Scalar(Scalar::from(value))));
        match section {
            Some(name) => sections.entry(name.to_string()).or_default().extend(entries),
            None => top_level.extend(entries),
        }
    }

    Ok(top_level
        .into_iter()
        .chain(
            sections
                .into_iter()
                .map(|(name, entries)| (name, Value::Mapping(entries.into_iter().collect()))),
        )
        .collect())
}
