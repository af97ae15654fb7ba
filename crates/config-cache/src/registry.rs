//! Registry of readers, one per directory
//!
//! A [`ReaderRegistry`] starts empty and creates readers lazily. Readers
//! are never removed. [`ReaderRegistry::global`] is the process-wide
//! instance used by [`get_instance`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use tracing::info;

use crate::error::Result;
use crate::format::ParserChoice;
use crate::path;
use crate::reader::CachedConfigReader;

static GLOBAL: LazyLock<ReaderRegistry> = LazyLock::new(ReaderRegistry::new);

/// Maps absolute directory paths to shared readers.
#[derive(Debug, Default)]
pub struct ReaderRegistry {
    readers: Mutex<HashMap<PathBuf, Arc<CachedConfigReader>>>,
}

impl ReaderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static ReaderRegistry {
        &GLOBAL
    }

    /// Return the reader for `directory`, creating it on first use.
    ///
    /// `parser` sets the default parser of a newly created reader and is
    /// ignored when a reader for the directory already exists.
    pub fn get_instance(
        &self,
        directory: impl AsRef<Path>,
        parser: Option<ParserChoice>,
    ) -> Result<Arc<CachedConfigReader>> {
        let directory = path::absolute(directory.as_ref())?;
        let mut readers = self.readers.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(reader) = readers.get(&directory) {
            return Ok(Arc::clone(reader));
        }

        let default_parser = match parser {
            Some(choice) => choice.resolve()?,
            None => CachedConfigReader::DEFAULT_PARSER,
        };
        info!(directory = %directory.display(), %default_parser, "Creating config reader");

        let reader = Arc::new(CachedConfigReader::new(directory.clone(), default_parser));
        readers.insert(directory, Arc::clone(&reader));
        Ok(reader)
    }

    pub fn len(&self) -> usize {
        self.readers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Directories with a registered reader, sorted.
    pub fn directories(&self) -> Vec<PathBuf> {
        let readers = self.readers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut dirs: Vec<_> = readers.keys().cloned().collect();
        dirs.sort();
        dirs
    }
}

/// Reader for `directory` from the process-wide registry.
pub fn get_instance(
    directory: impl AsRef<Path>,
    parser: Option<ParserChoice>,
) -> Result<Arc<CachedConfigReader>> {
    ReaderRegistry::global().get_instance(directory, parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;
    use tempfile::TempDir;

    #[test]
    fn test_new_registry_is_empty() {
        let registry = ReaderRegistry::new();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parser_only_applies_on_creation() {
        let dir = TempDir::new().unwrap();
        let registry = ReaderRegistry::new();
        let first = registry
            .get_instance(dir.path(), Some(Format::Json.into()))
            .unwrap();
        let second = registry
            .get_instance(dir.path(), Some(Format::Ini.into()))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.default_parser(), Format::Json);
    }

    #[test]
    fn test_unknown_parser_name() {
        let dir = TempDir::new().unwrap();
        let registry = ReaderRegistry::new();
        assert!(registry.get_instance(dir.path(), Some("toml".into())).is_err());
        assert!(registry.is_empty());
    }
}
