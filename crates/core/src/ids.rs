//! Flexible identifier and nullable-field parsing for request DTOs.
//!
//! Browser forms submit the value of an unselected dropdown as `""`, and
//! identifiers may arrive as JSON numbers or numeric strings. The helpers
//! here normalise all of those into `Option<DbId>`:
//!
//! | JSON input        | `optional_id`  | `patch_id`       |
//! |-------------------|----------------|------------------|
//! | field absent      | `None`         | `None`           |
//! | `null` / `""`     | `None`         | `Some(None)`     |
//! | `7` / `"7"`       | `Some(7)`      | `Some(Some(7))`  |
//! | `"abc"`           | error          | error            |

use serde::{Deserialize, Deserializer};

use crate::types::DbId;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(DbId),
    Text(String),
}

/// Parse an identifier given as text. Surrounding whitespace is ignored.
///
/// Returns `None` for anything that is not a positive integer.
pub fn parse_id(text: &str) -> Option<DbId> {
    text.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}

fn resolve<E: serde::de::Error>(raw: Option<RawId>) -> Result<Option<DbId>, E> {
    match raw {
        None => Ok(None),
        Some(RawId::Int(id)) if id > 0 => Ok(Some(id)),
        Some(RawId::Int(id)) => Err(E::custom(format!("invalid id {id}"))),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => parse_id(&text)
            .map(Some)
            .ok_or_else(|| E::custom(format!("invalid id '{text}'"))),
    }
}

/// `deserialize_with` target for an optional reference id.
///
/// Combine with `#[serde(default)]` so an absent field is `None`.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    resolve(Option::<RawId>::deserialize(deserializer)?)
}

/// `deserialize_with` target for a patchable reference id.
///
/// Only invoked when the field is present, so the outer `Some` marks
/// "supplied" and the inner value is the new reference (or a clear).
/// Combine with `#[serde(default)]`.
pub fn patch_id<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    resolve(Option::<RawId>::deserialize(deserializer)?).map(Some)
}

/// `deserialize_with` target for a patchable text field.
///
/// `null` and `""` both mean "clear". Combine with `#[serde(default)]`.
pub fn patch_text<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(Some(value.filter(|s| !s.is_empty())))
}
