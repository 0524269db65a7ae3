//! Sketch models.

use serde::{Deserialize, Serialize};
use sketchbook_core::error::CoreError;
use sketchbook_core::ids::{optional_id, patch_id, patch_text};
use sketchbook_core::types::{DbId, Timestamp};
use sketchbook_core::validation::{require_text, validate_image, MAX_TITLE_LEN};
use sqlx::FromRow;
use validator::Validate;

use crate::models::lookup::LookupRef;

/// A `sketches` row joined with its category, color and style.
///
/// The lookup columns are nullable because the joins are `LEFT JOIN`s.
#[derive(Debug, Clone, FromRow)]
pub struct SketchRow {
    pub id: DbId,
    pub title: String,
    pub category_id: DbId,
    pub category_name: Option<String>,
    pub color_id: Option<DbId>,
    pub color_name: Option<String>,
    pub color_hex: Option<String>,
    pub style_id: Option<DbId>,
    pub style_name: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A sketch with its lookup references expanded.
///
/// The reference fields keep their `*_id` names but hold `{id, name[, hex]}`
/// objects. A reference to a missing lookup row expands to `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sketch {
    pub id: DbId,
    pub title: String,
    pub category_id: Option<LookupRef>,
    pub color_id: Option<LookupRef>,
    pub style_id: Option<LookupRef>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn expand(id: Option<DbId>, name: Option<String>, hex: Option<String>) -> Option<LookupRef> {
    match (id, name) {
        (Some(id), Some(name)) => Some(LookupRef { id, name, hex }),
        _ => None,
    }
}

impl From<SketchRow> for Sketch {
    fn from(row: SketchRow) -> Self {
        Sketch {
            id: row.id,
            title: row.title,
            category_id: expand(Some(row.category_id), row.category_name, None),
            color_id: expand(row.color_id, row.color_name, row.color_hex),
            style_id: expand(row.style_id, row.style_name, None),
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for `POST /api/sketches`.
///
/// Reference ids accept numbers, numeric strings, `""` and `null`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateSketch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub category_id: Option<DbId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub color_id: Option<DbId>,
    #[serde(default, deserialize_with = "optional_id")]
    pub style_id: Option<DbId>,
    pub image: Option<String>,
}

/// Validated insert for a sketch row.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewSketch {
    #[validate(length(max = MAX_TITLE_LEN))]
    pub title: String,
    pub category_id: DbId,
    pub color_id: Option<DbId>,
    pub style_id: Option<DbId>,
    pub image: Option<String>,
}

impl CreateSketch {
    pub fn into_new(self) -> Result<NewSketch, CoreError> {
        let title = require_text("title", self.title.as_deref())?;
        let category_id = self
            .category_id
            .ok_or_else(|| CoreError::Validation("category_id is required".into()))?;
        let image = self.image.filter(|s| !s.is_empty());
        if let Some(image) = &image {
            validate_image(image)?;
        }
        let new = NewSketch {
            title,
            category_id,
            color_id: self.color_id,
            style_id: self.style_id,
            image,
        };
        new.validate()?;
        Ok(new)
    }
}

/// DTO for `PUT /api/sketches/{id}`.
///
/// Every field is optional; an absent field is left unchanged. For the
/// nullable columns, `null` or `""` clears the value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSketch {
    #[serde(default, deserialize_with = "patch_text")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_id")]
    pub category_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch_id")]
    pub color_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch_id")]
    pub style_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "patch_text")]
    pub image: Option<Option<String>>,
}

/// Validated patch for a sketch row.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct SketchPatch {
    #[validate(length(max = MAX_TITLE_LEN))]
    pub title: Option<String>,
    pub category_id: Option<DbId>,
    pub color_id: Option<Option<DbId>>,
    pub style_id: Option<Option<DbId>>,
    pub image: Option<Option<String>>,
}

impl UpdateSketch {
    pub fn into_patch(self) -> Result<SketchPatch, CoreError> {
        let title = match self.title {
            None => None,
            Some(value) => Some(require_text("title", value.as_deref())?),
        };
        let category_id = match self.category_id {
            None => None,
            Some(None) => {
                return Err(CoreError::Validation("category_id is required".into()));
            }
            Some(Some(id)) => Some(id),
        };
        if let Some(Some(image)) = &self.image {
            validate_image(image)?;
        }
        let patch = SketchPatch {
            title,
            category_id,
            color_id: self.color_id,
            style_id: self.style_id,
            image: self.image,
        };
        patch.validate()?;
        Ok(patch)
    }
}

/// Query parameters for `GET /api/sketches`.
///
/// Each value may be a lookup id or a lookup name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SketchListParams {
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub style_id: Option<String>,
}

/// Resolved filter: every set field must match exactly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SketchFilter {
    pub category_id: Option<DbId>,
    pub color_id: Option<DbId>,
    pub style_id: Option<DbId>,
}
