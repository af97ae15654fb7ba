//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect YAML, JSON and INI configuration files
#[derive(Parser, Debug)]
#[command(name = "cfgcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory the file names are relative to
    #[arg(short, long, global = true, env = "CFGCACHE_DIR", default_value = ".")]
    pub dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the value at a dotted key
    ///
    /// Examples:
    ///   cfgcache get app.yaml server.port --type int
    ///   cfgcache get hosts.ini main.peers --type json
    Get {
        /// Configuration file name
        file: String,

        /// Dotted key, e.g. server.port
        key: String,

        /// Parser to use instead of detection (yaml, ini, conf, json)
        #[arg(short, long)]
        parser: Option<String>,

        /// How to interpret the value
        #[arg(short = 't', long = "type", value_enum, default_value_t = ValueKind::Str)]
        kind: ValueKind,
    },

    /// Print the whole file as JSON
    Dump {
        /// Configuration file name
        file: String,

        /// Parser to use instead of detection (yaml, ini, conf, json)
        #[arg(short, long)]
        parser: Option<String>,
    },

    /// Print the parser that would be used for a file
    Detect {
        /// Configuration file name
        file: String,
    },
}

/// Typed getter to apply in `get`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Str,
    Int,
    Float,
    Bool,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get_with_type() {
        let cli = Cli::try_parse_from(["cfgcache", "get", "a.ini", "s.k", "--type", "bool"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Get {
                file: "a.ini".into(),
                key: "s.k".into(),
                parser: None,
                kind: ValueKind::Bool,
            }
        );
    }

    #[test]
    fn test_global_dir_flag() {
        let cli = Cli::try_parse_from(["cfgcache", "detect", "x", "-d", "/etc/app"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("/etc/app"));
    }
}
