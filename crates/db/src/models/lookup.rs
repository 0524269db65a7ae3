//! Lookup models (categories, colors, styles).

use serde::{Deserialize, Serialize};
use sketchbook_core::error::CoreError;
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::{DbId, Timestamp};
use sketchbook_core::validation::{normalize_hex, require_text, MAX_NAME_LEN};
use sqlx::FromRow;
use validator::Validate;

/// A row from `categories`, `colors` or `styles`.
///
/// Only colors have a `hex` column; for the other kinds it is selected as
/// `NULL` and omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Lookup {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    pub created_at: Timestamp,
}

/// All three lookup collections, each sorted by name.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LookupSet {
    pub categories: Vec<Lookup>,
    pub colors: Vec<Lookup>,
    pub styles: Vec<Lookup>,
}

/// DTO for `POST /api/lookups/{type}`.
#[derive(Debug, Deserialize)]
pub struct CreateLookup {
    pub name: Option<String>,
    pub hex: Option<String>,
}

/// Validated insert for a lookup row.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewLookup {
    #[validate(length(max = MAX_NAME_LEN))]
    pub name: String,
    pub hex: Option<String>,
}

impl CreateLookup {
    /// Validate and normalise for insertion into `kind`.
    ///
    /// `hex` is dropped for kinds that do not store it.
    pub fn into_new(self, kind: LookupKind) -> Result<NewLookup, CoreError> {
        let name = require_text("name", self.name.as_deref())?;
        let hex = if kind.has_hex() {
            normalize_hex(self.hex.as_deref())?
        } else {
            None
        };
        let new = NewLookup { name, hex };
        new.validate()?;
        Ok(new)
    }
}

/// An expanded lookup reference as embedded in a sketch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupRef {
    pub id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}
