use std::path::{Path, PathBuf};

use super::ConfigParser;
use crate::codec::flatten_section;
use crate::store::{file, IniStore};
use crate::{Error, Map, Result, SourceError, Value};

/// A configuration source in the loading pipeline.
#[derive(Debug)]
enum ConfigSource {
    File { path: PathBuf, required: bool },
    Text(String),
    Dict(Map),
}

/// Builder for assembling a [`ConfigParser`] from several sources.
///
/// Sources are applied in registration order. A later source overrides
/// earlier ones option by option; sections it introduces are appended.
///
/// ## Example
///
/// ```no_run
/// use ini_nest::ConfigParser;
///
/// let config = ConfigParser::builder()
///     .with_file("config/default.ini", true)
///     .with_file("config/local.ini", false)
///     .build()?;
/// # Ok::<(), ini_nest::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigParserBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an INI file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are skipped.
    pub fn with_file(mut self, path: impl AsRef<Path>, required: bool) -> Self {
        self.sources.push(ConfigSource::File {
            path: path.as_ref().to_path_buf(),
            required,
        });
        self
    }

    /// Adds several optional INI files.
    pub fn with_files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            self = self.with_file(path, false);
        }
        self
    }

    /// Adds INI text.
    pub fn with_str(mut self, text: impl Into<String>) -> Self {
        self.sources.push(ConfigSource::Text(text.into()));
        self
    }

    /// Adds decoded sections: a map of section name to a map of options.
    pub fn with_dict(mut self, dict: Map) -> Self {
        self.sources.push(ConfigSource::Dict(dict));
        self
    }

    /// Loads every source and merges them into one parser.
    ///
    /// Fails with [`Error::InvalidConfig`] if a required file is missing, a
    /// file cannot be read or parsed, or files were registered but no
    /// sections came out of them.
    pub fn build(self) -> Result<ConfigParser> {
        let mut store = IniStore::new();
        let mut paths = Vec::new();

        for source in self.sources {
            match source {
                ConfigSource::File { path, required } => {
                    if let Some(loaded) = file::load(&path, required)? {
                        store.merge(loaded);
                    }
                    paths.push(path);
                }
                ConfigSource::Text(text) => store.merge(IniStore::parse(&text)?),
                ConfigSource::Dict(dict) => store.merge(store_from_dict(&dict)?),
            }
        }

        if store.is_empty() && !paths.is_empty() {
            return Err(SourceError::NoSections(paths).into());
        }

        log::debug!("built config with {} section(s)", store.len());
        Ok(ConfigParser::from_store(store))
    }
}

/// Flattens decoded sections into raw option strings.
pub(super) fn store_from_dict(dict: &Map) -> Result<IniStore> {
    let mut store = IniStore::new();
    for (name, section) in dict {
        let Value::Map(section) = section else {
            return Err(Error::InvalidSectionType {
                found: section.type_name(),
            });
        };
        store.extend_section(name.clone(), flatten_section(section));
    }
    Ok(store)
}
