//! Conversion between raw option strings and decoded values.
//!
//! Decoding reads a raw value either as `key: value` lines (one sub-option per
//! line, only the first colon significant) or as a single typed scalar.
//! Flattening is the inverse, so that for well-formed sections
//! `decode_section(flatten_section(m)) == m`.

mod normalize;
mod option;
mod scalar;
mod section;

#[cfg(test)]
mod proptests;

pub use normalize::normalize;
pub use option::{decode_option, decode_option_value, option_shape, OptionShape};
pub use scalar::evaluate;
pub use section::{
    decode_entry, decode_section, decode_section_value, flatten_section, flatten_value,
};
