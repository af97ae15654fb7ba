//! Format-agnostic configuration loading with per-directory caching
//!
//! Loads YAML, JSON and INI files into a uniform [`Config`] mapping with
//! dotted-path access and typed getters. Files are parsed once per
//! [`CachedConfigReader`] and served from cache until reloaded.

pub mod config;
pub mod error;
pub mod format;
pub mod parsers;
pub mod path;
pub mod reader;
pub mod registry;
pub mod value;

pub use config::Config;
pub use error::{Error, Result};
pub use format::{Format, ParserChoice};
pub use reader::{CachedConfigReader, OnMissing};
pub use registry::{ReaderRegistry, get_instance};
pub use value::{Scalar, Value};
