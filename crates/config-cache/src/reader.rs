//! Per-directory cached configuration reader
//!
//! A [`CachedConfigReader`] is rooted at one directory. Reading a file picks
//! a parser by priority:
//!
//! 1. the parser passed to [`read_config`](CachedConfigReader::read_config),
//! 2. the file extension,
//! 3. a first line starting with `#` that mentions a format identifier,
//! 4. the reader's default parser.
//!
//! Parsed files are cached by name until [`reload`](CachedConfigReader::reload).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{Format, ParserChoice};

/// What to do when a configuration file cannot be read.
#[derive(Debug, Clone, PartialEq)]
pub enum OnMissing {
    /// Cache and return this mapping instead.
    Default(Config),
    /// Fail with [`Error::Configuration`].
    Raise,
}

impl Default for OnMissing {
    fn default() -> Self {
        Self::Default(Config::new())
    }
}

/// Reads and caches configuration files from a single directory.
#[derive(Debug)]
pub struct CachedConfigReader {
    directory: PathBuf,
    default_parser: Format,
    cache: RwLock<HashMap<String, Arc<Config>>>,
}

impl CachedConfigReader {
    /// Parser used when a reader is created without one.
    pub const DEFAULT_PARSER: Format = Format::Yaml;

    /// Create a reader for `directory`.
    ///
    /// Prefer [`ReaderRegistry::get_instance`](crate::ReaderRegistry::get_instance),
    /// which normalizes the directory and shares one reader per path.
    pub fn new(directory: impl Into<PathBuf>, default_parser: Format) -> Self {
        Self {
            directory: directory.into(),
            default_parser,
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn default_parser(&self) -> Format {
        self.default_parser
    }

    /// Pick the parser for `name` according to the priority rules.
    pub fn resolve_parser(&self, name: &str, parser: Option<&ParserChoice>) -> Result<Format> {
        match parser {
            Some(choice) => choice.resolve(),
            None => Ok(self.detect_format(&self.directory.join(name))),
        }
    }

    /// Detect the format of the file at `path` without an explicit choice.
    pub fn detect_format(&self, path: &Path) -> Format {
        if let Some(format) = Format::from_extension(path) {
            return format;
        }
        if let Some(format) = first_line(path)
            .as_deref()
            .and_then(Format::from_comment_line)
        {
            debug!(path = %path.display(), %format, "Format detected from first line");
            return format;
        }
        self.default_parser
    }

    /// Read `name` from the cache, parsing it on first access.
    ///
    /// If the file cannot be read, `on_missing` decides between failing with
    /// [`Error::Configuration`] and caching a default mapping. Parse errors
    /// are returned as they are and nothing is cached.
    pub fn read_config(
        &self,
        name: &str,
        parser: Option<ParserChoice>,
        on_missing: OnMissing,
    ) -> Result<Arc<Config>> {
        if let Some(config) = self.cached(name) {
            debug!(name, "Config cache hit");
            return Ok(config);
        }

        let path = self.directory.join(name);
        let format = self.resolve_parser(name, parser.as_ref())?;
        debug!(path = %path.display(), %format, "Parsing config file");

        let config = match format.parse_file(&path) {
            Ok(config) => config,
            Err(Error::Io { path, source }) => match on_missing {
                OnMissing::Raise => return Err(Error::Configuration { path, source }),
                OnMissing::Default(config) => {
                    warn!(path = %path.display(), error = %source, "Config file unreadable, using default");
                    config
                }
            },
            Err(e) => return Err(e),
        };

        Ok(self.store(name, config))
    }

    /// Shorthand for [`read_config`](Self::read_config) with detection and
    /// an empty default.
    pub fn read(&self, name: &str) -> Result<Arc<Config>> {
        self.read_config(name, None, OnMissing::default())
    }

    /// Evict `name` from the cache, or every entry when `name` is `None`.
    pub fn reload(&self, name: Option<&str>) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        match name {
            Some(name) => {
                cache.remove(name);
            }
            None => cache.clear(),
        }
        debug!(directory = %self.directory.display(), name, "Config cache invalidated");
    }

    pub fn reset(&self, name: Option<&str>) {
        self.reload(name);
    }

    pub fn clear(&self, name: Option<&str>) {
        self.reload(name);
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.cached(name).is_some()
    }

    /// Names currently cached, sorted.
    pub fn cached_names(&self) -> Vec<String> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    fn cached(&self, name: &str) -> Option<Arc<Config>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Insert unless another caller got there first; the first entry wins.
    fn store(&self, name: &str, config: Config) -> Arc<Config> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            cache
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(config)),
        )
    }
}

fn first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line).ok()?;
    Some(line)
}
