//! JSON loading that reports where a document went wrong, e.g.
//! `[3].parameters[0].type`.
use serde::de::DeserializeOwned;
use serde_json::de::{Read, SliceRead, StrRead};

use crate::error::LoadError;

fn deserialize<'de, R, T>(read: R, what: &'static str) -> Result<T, LoadError>
where
    R: Read<'de>,
    T: DeserializeOwned,
{
    let mut de = serde_json::Deserializer::new(read);
    let value = serde_path_to_error::deserialize(&mut de).map_err(|err| LoadError::Json {
        what,
        message: format!("at JSON path {} → {}", err.path(), err.inner()),
    })?;
    // reject trailing garbage after the top-level value
    de.end().map_err(|err| LoadError::Json { what, message: err.to_string() })?;
    Ok(value)
}

pub fn from_str_with_path<T: DeserializeOwned>(src: &str, what: &'static str) -> Result<T, LoadError> {
    deserialize(StrRead::new(src), what)
}

pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8], what: &'static str) -> Result<T, LoadError> {
    deserialize(SliceRead::new(bytes), what)
}
