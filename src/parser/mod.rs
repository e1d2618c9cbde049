//! The configuration facade.

mod builder;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;

pub use builder::ConfigParserBuilder;

use crate::codec::{decode_entry, decode_option, decode_section, flatten_value};
use crate::store::IniStore;
use crate::value::map_to_toml;
use crate::{Error, Map, Result, Value};

/// An INI configuration whose option values decode into nested [`Value`]s.
///
/// Raw option strings stay in an [`IniStore`]; every decoding call builds
/// fresh values from them.
///
/// ## Example
///
/// ```
/// use ini_nest::{ConfigParser, Value};
///
/// let config: ConfigParser = "\
/// [my_config]
/// profile =
///     name: Luna
///     Hobby: Marine fish
/// projects = ['hello', 1, 3]
/// Active = True
/// ".parse()?;
///
/// let section = config.section_to_dict("my_config")?;
/// assert_eq!(section["Active"], Value::Bool(true));
/// assert_eq!(section["profile"].as_map().unwrap()["name"], Value::from("Luna"));
/// # Ok::<(), ini_nest::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigParser {
    store: IniStore,
}

impl ConfigParser {
    /// Creates a new builder.
    pub fn builder() -> ConfigParserBuilder {
        ConfigParserBuilder::new()
    }

    pub(crate) fn from_store(store: IniStore) -> Self {
        Self { store }
    }

    /// Reads one INI file. See [`ConfigParser::from_files`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_files([path])
    }

    /// Reads INI files in order, later files overriding earlier ones.
    ///
    /// Missing files are skipped, but if no file yields a section the result
    /// is [`Error::InvalidConfig`]: a nonexistent path and an empty file are
    /// equally unusable.
    pub fn from_files<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let paths: Vec<_> = paths.into_iter().collect();
        if paths.is_empty() {
            return Err(crate::SourceError::NoSections(Vec::new()).into());
        }
        Self::builder().with_files(paths).build()
    }

    /// Builds a parser from decoded sections, flattening every value into
    /// its raw option string.
    pub fn from_dict(dict: &Map) -> Result<Self> {
        builder::store_from_dict(dict).map(Self::from_store)
    }

    /// Section names in order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.store.sections()
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.store.has_section(section)
    }

    /// Option names of a section in order.
    pub fn options(&self, section: &str) -> Result<Vec<&str>> {
        self.store
            .options(section)
            .map(|options| options.collect())
            .ok_or_else(|| Error::NoSection(section.to_string()))
    }

    /// The raw, undecoded value of an option.
    pub fn get(&self, section: &str, option: &str) -> Result<&str> {
        if !self.store.has_section(section) {
            return Err(Error::NoSection(section.to_string()));
        }
        self.store
            .get(section, option)
            .ok_or_else(|| Error::NoOption {
                section: section.to_string(),
                option: option.to_string(),
            })
    }

    /// Decodes a single option the way a whole section is decoded: sub-options
    /// when option-shaped, otherwise a typed scalar.
    pub fn get_value(&self, section: &str, option: &str) -> Result<Value> {
        self.get(section, option).map(decode_entry)
    }

    /// Adds an empty section. Returns `false` if it already existed.
    pub fn add_section(&mut self, section: impl Into<String>) -> bool {
        self.store.add_section(section)
    }

    /// Stores `value` under an existing section, flattened to its raw form.
    pub fn set(&mut self, section: &str, option: impl Into<String>, value: &Value) -> Result<()> {
        self.store.set(section, option, flatten_value(value))?;
        Ok(())
    }

    pub fn store(&self) -> &IniStore {
        &self.store
    }

    /// Decodes the configuration, a section, or one option of a section.
    ///
    /// - no arguments: a map of every section name to its decoded options
    /// - `section`: that section's decoded options
    /// - `section` and `option`: the option's sub-options; fails with
    ///   [`Error::InvalidConfigOption`] if the value is not option-shaped
    ///
    /// An `option` without a `section` is rejected with
    /// [`Error::AmbiguousScope`].
    pub fn to_dict(&self, section: Option<&str>, option: Option<&str>) -> Result<Value> {
        match (section, option) {
            (None, None) => Ok(Value::Map(self.all_to_dict())),
            (Some(section), None) => self.section_to_dict(section).map(Value::Map),
            (Some(section), Some(option)) => self.option_to_dict(section, option).map(Value::Map),
            (None, Some(option)) => Err(Error::AmbiguousScope {
                option: option.to_string(),
            }),
        }
    }

    /// Every section, decoded.
    pub fn all_to_dict(&self) -> Map {
        self.store
            .iter()
            .map(|(name, options)| (name.to_string(), Value::Map(decode_section(options))))
            .collect()
    }

    pub fn section_to_dict(&self, section: &str) -> Result<Map> {
        self.store
            .section(section)
            .map(decode_section)
            .ok_or_else(|| Error::NoSection(section.to_string()))
    }

    pub fn option_to_dict(&self, section: &str, option: &str) -> Result<Map> {
        decode_option(self.get(section, option)?)
    }

    /// Deserializes the whole decoded configuration into `T`.
    ///
    /// `None` values are left out, so they read as missing `Option` fields.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        let table = map_to_toml(&self.all_to_dict())?;
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Deserializes one decoded section into `T`.
    pub fn deserialize_section<T: DeserializeOwned>(&self, section: &str) -> Result<T> {
        let table = map_to_toml(&self.section_to_dict(section)?)?;
        Ok(toml::Value::Table(table).try_into()?)
    }

    /// Writes the configuration as INI text.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_string()).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for ConfigParser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::from_store(IniStore::parse(s)?))
    }
}

impl fmt::Display for ConfigParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.store, f)
    }
}
