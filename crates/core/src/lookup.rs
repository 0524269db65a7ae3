//! Lookup kinds (categories, colors, styles) and their route segments.

use std::fmt;

use crate::error::CoreError;

/// Route segment for the category collection.
pub const SEGMENT_CATEGORIES: &str = "categories";
/// Route segment for the color collection.
pub const SEGMENT_COLORS: &str = "colors";
/// Route segment for the style collection.
pub const SEGMENT_STYLES: &str = "styles";

/// All valid lookup route segments.
pub const VALID_SEGMENTS: &[&str] = &[SEGMENT_CATEGORIES, SEGMENT_COLORS, SEGMENT_STYLES];

/// One of the three lookup collections a sketch can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Category,
    Color,
    Style,
}

impl LookupKind {
    pub const ALL: [LookupKind; 3] = [LookupKind::Category, LookupKind::Color, LookupKind::Style];

    /// Parse the `:type` segment of `/api/lookups/:type`.
    pub fn from_segment(segment: &str) -> Result<Self, CoreError> {
        match segment {
            SEGMENT_CATEGORIES => Ok(LookupKind::Category),
            SEGMENT_COLORS => Ok(LookupKind::Color),
            SEGMENT_STYLES => Ok(LookupKind::Style),
            other => Err(CoreError::Validation(format!(
                "Invalid type: '{other}'. Valid types: {}",
                VALID_SEGMENTS.join(", ")
            ))),
        }
    }

    pub fn segment(self) -> &'static str {
        match self {
            LookupKind::Category => SEGMENT_CATEGORIES,
            LookupKind::Color => SEGMENT_COLORS,
            LookupKind::Style => SEGMENT_STYLES,
        }
    }

    /// Backing table name. Matches the route segment.
    pub fn table(self) -> &'static str {
        self.segment()
    }

    /// Singular display name used in messages and logs.
    pub fn label(self) -> &'static str {
        match self {
            LookupKind::Category => "Category",
            LookupKind::Color => "Color",
            LookupKind::Style => "Style",
        }
    }

    /// Whether documents of this kind carry a `hex` value.
    pub fn has_hex(self) -> bool {
        matches!(self, LookupKind::Color)
    }
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}
