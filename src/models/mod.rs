pub mod continent;
pub mod paper;
pub mod stats;

pub use continent::*;
pub use paper::*;
pub use stats::*;

use serde::{Deserialize, Deserializer};

/// Crawled records frequently carry `null` where a list is expected.
/// Treat explicit nulls like missing fields.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
