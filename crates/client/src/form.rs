//! New-sketch form state: draft fields, lookups for the dropdowns, and
//! brush settings for the drawing surface.

use std::sync::Arc;

use sketchbook_core::error::CoreError;
use sketchbook_core::lookup::LookupKind;
use sketchbook_core::validation::normalize_hex;

use crate::api::SketchApi;
use crate::error::ClientError;
use crate::models::{Lookup, LookupSet, NewSketch, Sketch, SketchFields};

/// Smallest brush size.
pub const MIN_BRUSH_SIZE: u8 = 1;
/// Largest brush size.
pub const MAX_BRUSH_SIZE: u8 = 20;
/// Brush size on a fresh form.
pub const DEFAULT_BRUSH_SIZE: u8 = 4;
/// Brush color on a fresh form.
pub const DEFAULT_BRUSH_COLOR: &str = "#000000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    color: String,
    size: u8,
    erasing: bool,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            color: DEFAULT_BRUSH_COLOR.to_string(),
            size: DEFAULT_BRUSH_SIZE,
            erasing: false,
        }
    }
}

impl Brush {
    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing
    }

    /// Set the stroke color. Accepts the same hex forms as color lookups.
    pub fn set_color(&mut self, color: &str) -> Result<(), CoreError> {
        match normalize_hex(Some(color))? {
            Some(hex) => {
                self.color = hex;
                Ok(())
            }
            None => Err(CoreError::Validation("brush color is required".into())),
        }
    }

    /// Set the stroke width, clamped to the supported range.
    pub fn set_size(&mut self, size: i32) {
        self.size = size.clamp(i32::from(MIN_BRUSH_SIZE), i32::from(MAX_BRUSH_SIZE)) as u8;
    }

    pub fn toggle_eraser(&mut self) -> bool {
        self.erasing = !self.erasing;
        self.erasing
    }
}

pub struct SketchForm {
    api: Arc<dyn SketchApi>,
    draft: SketchFields,
    lookups: LookupSet,
    brush: Brush,
}

impl SketchForm {
    pub fn new(api: Arc<dyn SketchApi>) -> Self {
        Self {
            api,
            draft: SketchFields::default(),
            lookups: LookupSet::default(),
            brush: Brush::default(),
        }
    }

    pub fn draft(&self) -> &SketchFields {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut SketchFields {
        &mut self.draft
    }

    pub fn lookups(&self) -> &LookupSet {
        &self.lookups
    }

    pub fn brush(&self) -> &Brush {
        &self.brush
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        &mut self.brush
    }

    /// Fetch the dropdown options. On failure the previous options stay.
    pub async fn load_lookups(&mut self) {
        match self.api.list_lookups().await {
            Ok(lookups) => self.lookups = lookups,
            Err(err) => tracing::error!(error = %err, "Failed to load lookups"),
        }
    }

    /// Add a new dropdown option and reload the options.
    ///
    /// A blank name does nothing and returns `Ok(None)`. Errors are
    /// returned so the caller can alert the user.
    pub async fn add_lookup(
        &mut self,
        kind: LookupKind,
        name: &str,
    ) -> Result<Option<Lookup>, ClientError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let lookup = self
            .api
            .create_lookup(kind, name, None)
            .await
            .inspect_err(|err| tracing::error!(error = %err, %kind, "Failed to add lookup"))?;
        tracing::info!(lookup_id = lookup.id, %kind, "Lookup added");

        self.load_lookups().await;
        Ok(Some(lookup))
    }

    /// Save the draft with the exported canvas image.
    ///
    /// On success the draft is cleared and the saved sketch returned. On
    /// failure the draft is kept.
    pub async fn submit(&mut self, image: String) -> Result<Sketch, ClientError> {
        if self.draft.title.trim().is_empty() {
            return Err(ClientError::Incomplete("title"));
        }
        if self.draft.category_id.trim().is_empty() {
            return Err(ClientError::Incomplete("category_id"));
        }

        let body = NewSketch {
            fields: self.draft.clone(),
            image,
        };
        let sketch = self
            .api
            .create_sketch(&body)
            .await
            .inspect_err(|err| tracing::error!(error = %err, "Failed to save sketch"))?;
        tracing::info!(sketch_id = sketch.id, "Sketch saved");

        self.draft = SketchFields::default();
        Ok(sketch)
    }
}
