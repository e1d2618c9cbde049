use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the ini-nest library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] SourceError),

    #[error("{}", option_message(.raw, .kind))]
    InvalidConfigOption { raw: String, kind: OptionErrorKind },

    #[error("Invalid section type '{found}'")]
    InvalidSectionType { found: &'static str },

    #[error("option '{option}' was given without a section")]
    AmbiguousScope { option: String },

    #[error("expected a sequence of strings, found '{found}'")]
    InvalidInput { found: &'static str },

    #[error("no section: '{0}'")]
    NoSection(String),

    #[error("no option '{option}' in section '{section}'")]
    NoOption { section: String, option: String },

    #[error("failed to write config file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] toml::de::Error),

    #[error("null values cannot appear inside a sequence when deserializing")]
    NullInSequence,
}

/// Why a value could not be decoded as a set of sub-options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionErrorKind {
    /// The value was not a string at all.
    WrongType { found: &'static str },
    /// The string is not made of `key: value` lines.
    Malformed,
}

fn option_message(raw: &str, kind: &OptionErrorKind) -> String {
    match kind {
        OptionErrorKind::WrongType { found } => {
            format!("option value must be a string, found '{found}'")
        }
        OptionErrorKind::Malformed => format!(
            "'{raw}' cannot be converted to dict. alternatively, \
             use ConfigParser::get(section, option) to get the value."
        ),
    }
}

/// Failures of the configuration source: files and INI text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("required config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}line {line}: {message}", .path.as_ref().map(|p| format!("{}: ", p.display())).unwrap_or_default())]
    Syntax {
        path: Option<PathBuf>,
        line: usize,
        message: String,
    },

    #[error("no sections found in {}", display_paths(.0))]
    NoSections(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "configuration".to_string();
    }
    paths
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl Error {
    /// Returns true for errors caused by the shape of a value handed to the
    /// codec rather than by the configuration source.
    #[must_use]
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfigOption { .. }
                | Self::InvalidSectionType { .. }
                | Self::AmbiguousScope { .. }
                | Self::InvalidInput { .. }
        )
    }

    pub(crate) fn malformed_option(raw: &str) -> Self {
        Self::InvalidConfigOption {
            raw: raw.to_string(),
            kind: OptionErrorKind::Malformed,
        }
    }
}
