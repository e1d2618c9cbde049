//! Ordered storage of raw INI sections.
//!
//! Only what the codec needs: `[section]` headers, `key = value` / `key: value`
//! lines, indented continuation lines and full-line comments. There is no
//! interpolation and no `DEFAULT` section.

pub mod file;

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;

use crate::{Error, Result, SourceError};

/// Options of one section, in file order.
pub type Section = IndexMap<String, String>;

/// An ordered collection of sections holding raw option strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniStore {
    sections: IndexMap<String, Section>,
}

impl IniStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses INI text.
    ///
    /// ```
    /// use ini_nest::IniStore;
    ///
    /// let store = IniStore::parse("[fish]\nclownfish = 2\nCorals =\n    toadstool: 2\n").unwrap();
    /// assert_eq!(store.get("fish", "clownfish"), Some("2"));
    /// assert_eq!(store.get("fish", "Corals"), Some("\ntoadstool: 2"));
    /// ```
    pub fn parse(text: &str) -> std::result::Result<Self, SourceError> {
        parse_source(text, None)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Section names in order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn has_option(&self, section: &str, option: &str) -> bool {
        self.section(section)
            .is_some_and(|options| options.contains_key(option))
    }

    pub fn options(&self, section: &str) -> Option<impl Iterator<Item = &str>> {
        self.section(section)
            .map(|options| options.keys().map(String::as_str))
    }

    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.section(section)?.get(option).map(String::as_str)
    }

    /// Adds an empty section. Returns `false` if it already existed.
    pub fn add_section(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.sections.contains_key(&name) {
            return false;
        }
        self.sections.insert(name, Section::new());
        true
    }

    /// Sets an option in an existing section, returning the previous value.
    pub fn set(
        &mut self,
        section: &str,
        option: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>> {
        let options = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::NoSection(section.to_string()))?;
        Ok(options.insert(option.into(), value.into()))
    }

    /// Adds options to a section, creating it if needed. Existing options are
    /// overwritten in place.
    pub fn extend_section<I>(&mut self, name: impl Into<String>, options: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.sections.entry(name.into()).or_default().extend(options);
    }

    pub fn remove_section(&mut self, name: &str) -> Option<Section> {
        self.sections.shift_remove(name)
    }

    pub fn remove_option(&mut self, section: &str, option: &str) -> Option<String> {
        self.sections.get_mut(section)?.shift_remove(option)
    }

    /// Layers `overlay` on top of this store: options are overridden one by
    /// one, new sections are appended.
    pub fn merge(&mut self, overlay: IniStore) {
        for (name, options) in overlay.sections {
            self.extend_section(name, options);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Section)> {
        self.sections.iter().map(|(name, options)| (name.as_str(), options))
    }
}

pub(crate) fn parse_source(
    text: &str,
    path: Option<&Path>,
) -> std::result::Result<IniStore, SourceError> {
    let syntax = |line: usize, message: String| SourceError::Syntax {
        path: path.map(Path::to_path_buf),
        line,
        message,
    };

    let mut store = IniStore::new();
    let mut current_section: Option<String> = None;
    let mut current_option: Option<String> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(['#', ';']) {
            continue;
        }

        let indented = line.starts_with(char::is_whitespace);
        if let (true, Some(section), Some(option)) = (indented, &current_section, &current_option) {
            if let Some(value) = store
                .sections
                .get_mut(section)
                .and_then(|options| options.get_mut(option))
            {
                value.push('\n');
                value.push_str(trimmed);
                continue;
            }
        }

        if let Some(name) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            let name = name.trim();
            if name.is_empty() {
                return Err(syntax(line_no, "empty section name".into()));
            }
            if !store.add_section(name) {
                return Err(syntax(line_no, format!("duplicate section '{name}'")));
            }
            current_section = Some(name.to_string());
            current_option = None;
            continue;
        }

        let Some(section) = &current_section else {
            return Err(syntax(line_no, "option outside of any section".into()));
        };
        let Some(pos) = trimmed.find(['=', ':']) else {
            return Err(syntax(line_no, format!("expected 'key = value', found '{trimmed}'")));
        };
        let key = trimmed[..pos].trim();
        let value = trimmed[pos + 1..].trim();
        if key.is_empty() {
            return Err(syntax(line_no, "empty option name".into()));
        }

        let options = store.sections.entry(section.clone()).or_default();
        if options.contains_key(key) {
            return Err(syntax(
                line_no,
                format!("duplicate option '{key}' in section '{section}'"),
            ));
        }
        options.insert(key.to_string(), value.to_string());
        current_option = Some(key.to_string());
    }

    Ok(store)
}

/// Writes INI text that [`IniStore::parse`] reads back unchanged, given
/// option names free of `=` and `:` and values without blank or comment lines.
impl fmt::Display for IniStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, options) in &self.sections {
            writeln!(f, "[{name}]")?;
            for (key, value) in options {
                let value = value.replace('\n', "\n\t");
                if value.is_empty() || value.starts_with('\n') {
                    writeln!(f, "{key} ={value}")?;
                } else {
                    writeln!(f, "{key} = {value}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
