//! INI configuration whose option values decode into nested values.
//!
//! A raw option such as
//!
//! ```ini
//! [my_config]
//! profile =
//!     name: Luna
//!     profession: software engineer
//! projects = ['hello', 1, 3]
//! ```
//!
//! decodes into a map `{profile: {name: "Luna", ...}, projects: ["hello", 1, 3]}`,
//! and [`codec::flatten_section`] turns such a map back into raw options.

pub mod codec;
mod error;
mod parser;
pub mod store;
mod value;

pub use error::{Error, OptionErrorKind, Result, SourceError};
pub use parser::{ConfigParser, ConfigParserBuilder};
pub use store::IniStore;
pub use value::{Map, Value};
