//! Bencode encoding and decoding (BEP-3)
//!
//! Bencode is the binary-safe encoding BitTorrent uses for metainfo files
//! and tracker responses. Four types exist: integers, byte strings, lists,
//! and dictionaries with byte-string keys.
//!
//! Dictionaries decode into a [`std::collections::BTreeMap`] keyed on raw
//! bytes, so re-encoding always emits keys in ascending byte order. That
//! canonical ordering is what makes the info-hash well defined.

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_prefix};
pub use encode::encode;
pub use error::BencodeError;
pub use value::Value;

#[cfg(test)]
mod tests;
