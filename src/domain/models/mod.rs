pub mod admin;
pub mod check_in;
pub mod registration;

use serde::{Deserialize, Deserializer};

/// Reads an explicit `null` the same as a missing field.
///
/// Record files are edited by hand; one `null` must not make the whole file
/// unreadable.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
