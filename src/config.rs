//! Command line options and the optional configuration file.
//!
//! The configuration file lives at `$XDG_CONFIG_HOME/tabview/config.toml`
//! or `~/.config/tabview/config.toml`. Command line options override it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ViewError};
use crate::fileio::ParserConfig;
use crate::style::Theme;

const APP_DIR: &str = "tabview";

/// A terminal viewer for CSV and other delimited text
#[derive(Parser, Debug, Default)]
#[command(name = "tabview", version, about)]
pub struct Cli {
    /// File to view, stdin if missing or `-`
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Field delimiter: comma, tab, semicolon, pipe or a single character
    #[arg(short, long, value_name = "DELIM")]
    pub delimiter: Option<String>,

    /// Show the first row as a header
    #[arg(short = 's', long = "header", conflicts_with = "no_header")]
    pub header: bool,

    /// Show the first row as data
    #[arg(short = 'n', long = "no-header")]
    pub no_header: bool,

    /// Keep leading and trailing whitespace of the fields
    #[arg(short = 't', long = "no-trim")]
    pub no_trim: bool,

    /// Reject rows with a different number of fields
    #[arg(short = 'c', long = "strict")]
    pub strict: bool,

    /// Use no colors
    #[arg(short, long)]
    pub monochrome: bool,

    /// Built-in theme (light, dark, mono) or path of a TOML theme file
    #[arg(long, value_name = "NAME|PATH")]
    pub theme: Option<String>,

    /// Configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write logs to this file, filtered by RUST_LOG
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Whether the first row is a header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderPolicy {
    /// Decided by the header heuristic
    #[default]
    Auto,
    Show,
    Hide,
}

/// Contents of the configuration file. All keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub delimiter: Option<String>,
    pub trim: Option<bool>,
    pub strict_columns: Option<bool>,
    pub header: Option<HeaderPolicy>,
    pub monochrome: Option<bool>,
    pub theme: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ViewError::Config(e.to_string()))
    }

    /// Reads a configuration file. A missing file is only an error if it was
    /// requested explicitly.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!(path = %path.display(), "reading configuration");
                Self::from_toml(&content)
                    .map_err(|e| ViewError::Config(format!("{}: {}", path.display(), e)))
            }
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ViewError::Config(format!("{}: {}", path.display(), e))),
        }
    }
}

/// Base config directory: `$XDG_CONFIG_HOME/tabview` or `~/.config/tabview`
pub fn config_dir() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .map(|config| config.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Parse a delimiter string into a byte
pub fn parse_delimiter(s: &str) -> Result<u8> {
    match s.to_lowercase().as_str() {
        "comma" | "," => Ok(b','),
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "semicolon" | ";" => Ok(b';'),
        "pipe" | "|" => Ok(b'|'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(ViewError::Config(format!(
            "invalid delimiter '{}', use comma, tab, semicolon, pipe or a single character",
            s
        ))),
    }
}

/// The merged settings of the command line and the configuration file
#[derive(Debug, Clone)]
pub struct Settings {
    pub file: Option<PathBuf>,
    pub parser: ParserConfig,
    pub header: HeaderPolicy,
    pub theme: Theme,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Loads the configuration file (the one given on the command line or
    /// the default one) and merges it with the command line.
    pub fn load(cli: Cli) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => FileConfig::load(path, true)?,
            None => match config_file() {
                Some(path) => FileConfig::load(&path, false)?,
                None => FileConfig::default(),
            },
        };
        Self::merge(cli, file_config)
    }

    pub fn merge(cli: Cli, file_config: FileConfig) -> Result<Self> {
        let defaults = ParserConfig::default();

        let delimiter = match cli.delimiter.as_deref().or(file_config.delimiter.as_deref()) {
            Some(s) => parse_delimiter(s)?,
            None => defaults.delimiter,
        };

        let parser = ParserConfig {
            delimiter,
            trim: !cli.no_trim && file_config.trim.unwrap_or(defaults.trim),
            strict_columns: cli.strict || file_config.strict_columns.unwrap_or(defaults.strict_columns),
        };

        let header = if cli.header {
            HeaderPolicy::Show
        } else if cli.no_header {
            HeaderPolicy::Hide
        } else {
            file_config.header.unwrap_or_default()
        };

        let theme = if cli.monochrome || file_config.monochrome.unwrap_or(false) {
            Theme::mono()
        } else {
            match cli.theme.as_deref().or(file_config.theme.as_deref()) {
                Some(name) => Theme::resolve(name)?,
                None => Theme::default(),
            }
        };

        Ok(Self {
            file: cli.file,
            parser,
            header,
            theme,
            log_file: cli.log_file.or(file_config.log_file),
        })
    }
}
