//! Parser registry: format identifiers and dispatch

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parsers;

/// Supported configuration formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Yaml,
    Ini,
    Json,
}

/// Registered format identifiers, in detection order.
const IDENTIFIERS: [(&str, Format); 4] = [
    ("yaml", Format::Yaml),
    ("ini", Format::Ini),
    ("conf", Format::Ini),
    ("json", Format::Json),
];

impl Format {
    /// Look up an identifier in the registry table. Matching is exact.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        IDENTIFIERS
            .iter()
            .find(|(name, _)| *name == identifier)
            .map(|(_, format)| *format)
    }

    /// All registered identifiers with their formats.
    pub fn identifiers() -> impl Iterator<Item = (&'static str, Format)> {
        IDENTIFIERS.into_iter()
    }

    /// Detect format from the file name extension.
    ///
    /// Only the registered identifiers match, so `config.yml` yields `None`.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let (_, extension) = name.rsplit_once('.')?;
        Self::from_identifier(extension)
    }

    /// Detect format from a leading comment line such as `# -*- ini -*-`.
    ///
    /// The line must start with `#`; the first identifier found anywhere in
    /// it wins, so the match is by substring.
    pub fn from_comment_line(line: &str) -> Option<Self> {
        let line = line.to_lowercase();
        if !line.starts_with('#') {
            return None;
        }
        IDENTIFIERS
            .iter()
            .find(|(name, _)| line.contains(name))
            .map(|(_, format)| *format)
    }

    /// Canonical identifier for this format.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Ini => "ini",
            Self::Json => "json",
        }
    }

    /// Parse the file at `path` with this format's parser.
    pub fn parse_file(&self, path: &Path) -> Result<Config> {
        match self {
            Self::Yaml => parsers::yaml::parse_file(path),
            Self::Ini => parsers::ini::parse_file(path),
            Self::Json => parsers::json::parse_file(path),
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_identifier(s).ok_or_else(|| Error::UnknownParser(s.to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parser requested by a caller: a format directly, or its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserChoice {
    Format(Format),
    Name(String),
}

impl ParserChoice {
    pub fn resolve(&self) -> Result<Format> {
        match self {
            Self::Format(format) => Ok(*format),
            Self::Name(name) => name.parse(),
        }
    }
}

impl From<Format> for ParserChoice {
    fn from(format: Format) -> Self {
        Self::Format(format)
    }
}

impl From<&str> for ParserChoice {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ParserChoice {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("yaml", Some(Format::Yaml))]
    #[case("ini", Some(Format::Ini))]
    #[case("conf", Some(Format::Ini))]
    #[case("json", Some(Format::Json))]
    #[case("yml", None)]
    #[case("YAML", None)]
    fn test_from_identifier(#[case] id: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_identifier(id), expected);
    }

    #[rstest]
    #[case("settings.json", Some(Format::Json))]
    #[case("app.conf", Some(Format::Ini))]
    #[case("archive.tar.yaml", Some(Format::Yaml))]
    #[case("config.yml", None)]
    #[case("config", None)]
    fn test_from_extension(#[case] name: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_extension(Path::new(name)), expected);
    }

    #[rstest]
    #[case("# format: INI\n", Some(Format::Ini))]
    #[case("# this is json\n", Some(Format::Json))]
    #[case("# configuration\n", Some(Format::Ini))]
    #[case("; ini comment\n", None)]
    #[case("# nothing here\n", None)]
    fn test_from_comment_line(#[case] line: &str, #[case] expected: Option<Format>) {
        assert_eq!(Format::from_comment_line(line), expected);
    }

    #[test]
    fn test_parser_choice_resolve() {
        assert_eq!(ParserChoice::from("conf").resolve().unwrap(), Format::Ini);
        assert_eq!(
            ParserChoice::from(Format::Json).resolve().unwrap(),
            Format::Json
        );
        assert!(matches!(
            ParserChoice::from("toml").resolve(),
            Err(Error::UnknownParser(name)) if name == "toml"
        ));
    }

    #[test]
    fn test_default_is_yaml() {
        assert_eq!(Format::default(), Format::Yaml);
        assert_eq!(Format::Yaml.to_string(), "yaml");
    }
}
