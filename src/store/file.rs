//! File-based loading of INI stores.

use std::path::Path;

use super::{parse_source, IniStore};
use crate::SourceError;

/// Loads and parses an INI file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
pub fn load(path: &Path, required: bool) -> Result<Option<IniStore>, SourceError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => {
            log::debug!("loading config file {}", path.display());
            parse_source(&contents, Some(path)).map(Some)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                Err(SourceError::FileNotFound(path.to_path_buf()))
            } else {
                log::debug!("skipping missing config file {}", path.display());
                Ok(None)
            }
        }
        Err(e) => Err(SourceError::Read {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nhost = localhost").unwrap();

        let store = load(file.path(), true).unwrap().unwrap();
        assert_eq!(store.get("server", "host"), Some("localhost"));
    }

    #[test]
    fn test_load_required_missing() {
        let result = load(Path::new("/nonexistent/path/config.ini"), true);
        assert!(matches!(result, Err(SourceError::FileNotFound(_))));
    }

    #[test]
    fn test_load_optional_missing() {
        let result = load(Path::new("/nonexistent/path/config.ini"), false).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_syntax_error_carries_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "orphan = 1").unwrap();

        match load(file.path(), true) {
            Err(SourceError::Syntax { path, line, .. }) => {
                assert_eq!(path.as_deref(), Some(file.path()));
                assert_eq!(line, 1);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }
}
