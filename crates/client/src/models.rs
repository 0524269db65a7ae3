//! Wire shapes exchanged with the sketchbook server.

use serde::{Deserialize, Serialize};
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::types::{DbId, Timestamp};

/// A category, color or style.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Lookup {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    pub created_at: Timestamp,
}

/// Response of `GET /api/lookups`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LookupSet {
    #[serde(default)]
    pub categories: Vec<Lookup>,
    #[serde(default)]
    pub colors: Vec<Lookup>,
    #[serde(default)]
    pub styles: Vec<Lookup>,
}

impl LookupSet {
    pub fn of(&self, kind: LookupKind) -> &[Lookup] {
        match kind {
            LookupKind::Category => &self.categories,
            LookupKind::Color => &self.colors,
            LookupKind::Style => &self.styles,
        }
    }
}

/// An expanded reference embedded in a sketch.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LookupRef {
    pub id: DbId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
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

impl Sketch {
    pub fn reference(&self, kind: LookupKind) -> Option<&LookupRef> {
        match kind {
            LookupKind::Category => self.category_id.as_ref(),
            LookupKind::Color => self.color_id.as_ref(),
            LookupKind::Style => self.style_id.as_ref(),
        }
    }
}

/// Editable fields as held by a form: ids are kept as the selected
/// option's value, with `""` meaning nothing selected.
///
/// Sent as-is for updates; the server reads `""` as a clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SketchFields {
    pub title: String,
    pub category_id: String,
    pub color_id: String,
    pub style_id: String,
}

impl SketchFields {
    pub fn reference_mut(&mut self, kind: LookupKind) -> &mut String {
        match kind {
            LookupKind::Category => &mut self.category_id,
            LookupKind::Color => &mut self.color_id,
            LookupKind::Style => &mut self.style_id,
        }
    }

    /// Copy the current values of an existing sketch.
    pub fn from_sketch(sketch: &Sketch) -> Self {
        let id_of = |r: &Option<LookupRef>| r.as_ref().map(|r| r.id.to_string()).unwrap_or_default();
        Self {
            title: sketch.title.clone(),
            category_id: id_of(&sketch.category_id),
            color_id: id_of(&sketch.color_id),
            style_id: id_of(&sketch.style_id),
        }
    }
}

/// Body of `POST /api/sketches`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSketch {
    #[serde(flatten)]
    pub fields: SketchFields,
    pub image: String,
}

/// List filter. Values may be lookup names or ids; `""` means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SketchQuery {
    pub category_id: String,
    pub color_id: String,
    pub style_id: String,
}

impl SketchQuery {
    pub fn value_mut(&mut self, kind: LookupKind) -> &mut String {
        match kind {
            LookupKind::Category => &mut self.category_id,
            LookupKind::Color => &mut self.color_id,
            LookupKind::Style => &mut self.style_id,
        }
    }

    /// Query-string pairs for the values that are set.
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        [
            ("category_id", self.category_id.as_str()),
            ("color_id", self.color_id.as_str()),
            ("style_id", self.style_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .collect()
    }
}
